//! The list controller: which products are shown, what is loading, and which
//! responses still matter.
//!
//! `ListState` does no I/O. Each user action returns the [`Request`] to
//! perform (if any), and the caller feeds the response back through
//! [`ListState::page_loaded`] or [`ListState::search_loaded`] together with
//! the [`Ticket`] the request carried. Responses may come back in any order;
//! a response whose ticket is older than the current [`Generation`] is
//! dropped without touching the list, the error or the loading state.

use shelf_client::{FetchError, Product};

/// Products requested per page.
pub const PAGE_SIZE: usize = 20;

/// How close (in rows) to the end of the list a scroll must land to load the
/// next page.
pub const BOTTOM_TOLERANCE: u16 = 5;

const LOAD_FAILED: &str = "Failed to load products. Please try again.";
const INITIAL_LOAD_FAILED: &str = "Failed to load initial products. Please try again.";
const SEARCH_FAILED: &str = "Failed to search products. Please try again.";

/// Monotonic counter bumped once per edit of the search text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    fn next(self) -> Self {
        Generation(self.0 + 1)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Identifies a dispatched request. Handed back with its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: Generation,
}

impl Ticket {
    /// Generation current when the request was dispatched.
    pub fn generation(&self) -> Generation {
        self.generation
    }
}

/// What the list is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Paginated catalog; `offset` is the `skip` of the last page requested.
    Browse { offset: usize },
    /// Results for a non-empty query, not paginated.
    Search { query: String },
}

/// The fetch currently owning the loading indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Idle,
    LoadingInitial,
    LoadingMore,
    Searching,
}

/// Activity plus the error slot, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    LoadingInitial,
    LoadingMore,
    Searching,
    /// Idle with an error on display.
    Error,
}

/// Why a page was requested. Decides whether the response replaces or
/// extends the list, and which message a failure shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// First page at startup.
    Initial,
    /// First page after the search text was cleared.
    Reload,
    /// Next page while browsing.
    More,
}

/// I/O the caller should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// `GET /products?skip={offset}&limit={limit}`
    Page {
        offset: usize,
        limit: usize,
        kind: PageKind,
        ticket: Ticket,
    },
    /// `GET /products/search?q={text}`
    Search { text: String, ticket: Ticket },
}

/// What applying a response did to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// `items` now holds exactly the response.
    Replaced,
    /// The response was added after the existing items.
    Appended,
    /// The request failed; the error slot was set.
    Failed,
    /// A newer action superseded the request; nothing changed.
    Stale,
}

/// How long an error message stays on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Until a later response succeeds.
    #[default]
    ClearOnSuccess,
    /// Until replaced by a newer error.
    Sticky,
}

/// Behaviour switches for [`ListState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Empty the list as soon as a non-empty query is typed, before its
    /// results arrive.
    pub clear_on_keystroke: bool,
    pub error_policy: ErrorPolicy,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            clear_on_keystroke: true,
            error_policy: ErrorPolicy::default(),
        }
    }
}

/// Products on display plus the bookkeeping that decides what to fetch next.
#[derive(Debug, Clone)]
pub struct ListState {
    items: Vec<Product>,
    mode: Mode,
    activity: Activity,
    error: Option<String>,
    generation: Generation,
    page_size: usize,
    options: SearchOptions,
}

impl Default for ListState {
    fn default() -> Self {
        Self::new(PAGE_SIZE, SearchOptions::default())
    }
}

impl ListState {
    /// An empty list. `page_size` is clamped to at least one.
    pub fn new(page_size: usize, options: SearchOptions) -> Self {
        Self {
            items: Vec::new(),
            mode: Mode::Browse { offset: 0 },
            activity: Activity::Idle,
            error: None,
            generation: Generation::default(),
            page_size: page_size.max(1),
            options,
        }
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    pub fn is_loading(&self) -> bool {
        self.activity != Activity::Idle
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The active query, if searching.
    pub fn query(&self) -> Option<&str> {
        match &self.mode {
            Mode::Search { query } => Some(query),
            Mode::Browse { .. } => None,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.activity {
            Activity::LoadingInitial => Phase::LoadingInitial,
            Activity::LoadingMore => Phase::LoadingMore,
            Activity::Searching => Phase::Searching,
            Activity::Idle if self.error.is_some() => Phase::Error,
            Activity::Idle => Phase::Idle,
        }
    }

    /// Load the first page. Called once, when the list first appears.
    pub fn start(&mut self) -> Request {
        self.first_page(PageKind::Initial)
    }

    /// The view was scrolled to within [`BOTTOM_TOLERANCE`] of the end.
    ///
    /// Returns the next page request while browsing with nothing in flight;
    /// `None` otherwise, so a burst of scroll events yields one fetch.
    pub fn scrolled_near_bottom(&mut self) -> Option<Request> {
        let Mode::Browse { offset } = &mut self.mode else {
            return None;
        };
        if self.activity != Activity::Idle {
            return None;
        }
        let next = *offset + self.page_size;
        *offset = next;
        self.activity = Activity::LoadingMore;
        Some(Request::Page {
            offset: next,
            limit: self.page_size,
            kind: PageKind::More,
            ticket: self.ticket(),
        })
    }

    /// The search text changed to `text`. Every edit supersedes whatever
    /// is in flight.
    ///
    /// A text that is blank after trimming goes back to browsing from the
    /// first page; anything else is searched for as typed.
    pub fn query_changed(&mut self, text: &str) -> Request {
        self.generation = self.generation.next();

        if text.trim().is_empty() {
            self.items.clear();
            return self.first_page(PageKind::Reload);
        }

        if self.options.clear_on_keystroke {
            self.items.clear();
        }
        self.mode = Mode::Search {
            query: text.to_string(),
        };
        self.activity = Activity::Searching;
        Request::Search {
            text: text.to_string(),
            ticket: self.ticket(),
        }
    }

    /// Apply the response to a [`Request::Page`].
    pub fn page_loaded(
        &mut self,
        ticket: Ticket,
        kind: PageKind,
        result: Result<Vec<Product>, FetchError>,
    ) -> Outcome {
        let owner = match kind {
            PageKind::Initial | PageKind::Reload => Activity::LoadingInitial,
            PageKind::More => Activity::LoadingMore,
        };
        if !self.is_current(ticket, owner) {
            tracing::debug!(
                ticket = ticket.generation.0,
                current = self.generation.0,
                ?kind,
                "dropping stale page"
            );
            return Outcome::Stale;
        }
        self.activity = Activity::Idle;

        match result {
            Ok(products) => {
                self.succeeded();
                if kind == PageKind::More {
                    self.items.extend(products);
                    Outcome::Appended
                } else {
                    self.items = products;
                    Outcome::Replaced
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, ?kind, "page fetch failed");
                let message = match kind {
                    PageKind::Initial => INITIAL_LOAD_FAILED,
                    PageKind::Reload | PageKind::More => LOAD_FAILED,
                };
                self.error = Some(message.to_string());
                Outcome::Failed
            }
        }
    }

    /// Apply the response to a [`Request::Search`].
    pub fn search_loaded(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<Product>, FetchError>,
    ) -> Outcome {
        if !self.is_current(ticket, Activity::Searching) {
            tracing::debug!(
                ticket = ticket.generation.0,
                current = self.generation.0,
                "dropping stale search results"
            );
            return Outcome::Stale;
        }
        self.activity = Activity::Idle;

        match result {
            Ok(products) => {
                self.succeeded();
                self.items = products;
                Outcome::Replaced
            }
            Err(err) => {
                tracing::warn!(error = %err, "search failed");
                self.error = Some(SEARCH_FAILED.to_string());
                Outcome::Failed
            }
        }
    }

    fn first_page(&mut self, kind: PageKind) -> Request {
        self.mode = Mode::Browse { offset: 0 };
        self.activity = Activity::LoadingInitial;
        Request::Page {
            offset: 0,
            limit: self.page_size,
            kind,
            ticket: self.ticket(),
        }
    }

    fn ticket(&self) -> Ticket {
        Ticket {
            generation: self.generation,
        }
    }

    // Only one activity is in flight per generation, so a matching
    // generation and owner identify the request that set the activity.
    fn is_current(&self, ticket: Ticket, owner: Activity) -> bool {
        ticket.generation == self.generation && self.activity == owner
    }

    fn succeeded(&mut self) {
        if self.options.error_policy == ErrorPolicy::ClearOnSuccess {
            self.error = None;
        }
    }
}
