//! The catalog browser model: a search box over an infinitely scrolling
//! product pane.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use ratatui::layout::{Alignment, Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use shelf_client::{Catalog, FetchError, Product};
use shelf_core::{terminal_events, Command, Component, Model, Subscription, TerminalEvent};
use shelf_widgets::{product_pane, search_box, spinner, ProductPane, SearchBox, Spinner};

use crate::list_state::{
    ListState, Outcome, PageKind, Request, SearchOptions, Ticket, BOTTOM_TOLERANCE, PAGE_SIZE,
};

/// Everything [`Shelf`] needs at startup.
pub struct Flags {
    pub catalog: Arc<dyn Catalog>,
    pub page_size: usize,
    pub search: SearchOptions,
}

impl Flags {
    /// Defaults for everything but the catalog.
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self {
            catalog,
            page_size: PAGE_SIZE,
            search: SearchOptions::default(),
        }
    }
}

#[derive(Debug)]
pub enum Msg {
    Search(search_box::Message),
    Pane(product_pane::Message),
    Spinner(spinner::Message),
    PageLoaded {
        ticket: Ticket,
        kind: PageKind,
        result: Result<Vec<Product>, FetchError>,
    },
    SearchLoaded {
        ticket: Ticket,
        result: Result<Vec<Product>, FetchError>,
    },
    Resized,
    Quit,
}

pub struct Shelf {
    catalog: Arc<dyn Catalog>,
    list: ListState,
    search: SearchBox,
    pane: ProductPane,
    spinner: Spinner,
}

impl Shelf {
    pub fn list(&self) -> &ListState {
        &self.list
    }

    pub fn pane(&self) -> &ProductPane {
        &self.pane
    }

    pub fn search(&self) -> &SearchBox {
        &self.search
    }

    fn dispatch(&self, request: Request) -> Command<Msg> {
        match request {
            Request::Page {
                offset,
                limit,
                kind,
                ticket,
            } => {
                tracing::debug!(
                    offset,
                    limit,
                    ?kind,
                    generation = ticket.generation().get(),
                    "requesting page"
                );
                Command::perform(self.catalog.fetch_page(offset, limit), move |result| {
                    Msg::PageLoaded {
                        ticket,
                        kind,
                        result,
                    }
                })
            }
            Request::Search { text, ticket } => {
                tracing::debug!(query = %text, generation = ticket.generation().get(), "searching");
                Command::perform(self.catalog.search(&text), move |result| {
                    Msg::SearchLoaded { ticket, result }
                })
            }
        }
    }

    fn query_changed(&mut self, text: &str) -> Command<Msg> {
        let request = self.list.query_changed(text);
        if self.list.items().is_empty() {
            self.pane.replace(Vec::new());
        }
        self.dispatch(request)
    }

    fn scrolled(&mut self, msg: product_pane::Message) -> Command<Msg> {
        let cmd = self.pane.update(msg).map(Msg::Pane);
        if !self.pane.near_bottom(BOTTOM_TOLERANCE) {
            return cmd;
        }
        match self.list.scrolled_near_bottom() {
            Some(request) => Command::batch([cmd, self.dispatch(request)]),
            None => cmd,
        }
    }

    fn applied(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Replaced => self.pane.replace(self.list.items().to_vec()),
            Outcome::Appended => self.pane.set_products(self.list.items().to_vec()),
            Outcome::Failed | Outcome::Stale => {}
        }
    }

    /// Bring the spinner and the pane footer in line with the list state.
    fn refresh_footer(&mut self) {
        self.spinner.set_spinning(self.list.is_loading());
        let mut footer = Vec::new();
        if self.list.is_loading() {
            footer.push(self.spinner.line().centered());
        }
        if let Some(error) = self.list.error() {
            let line = Line::styled(error.to_string(), Style::default().fg(Color::Red));
            footer.push(line.centered());
        }
        self.pane.set_footer(footer);
    }

    fn status_line(&self) -> Line<'static> {
        let key = Style::default().fg(Color::Cyan);
        let mut spans = vec![
            Span::styled("↑↓", key),
            Span::raw(" scroll  "),
            Span::styled("PgUp/PgDn", key),
            Span::raw(" page  "),
            Span::styled("Ctrl-U", key),
            Span::raw(" clear  "),
            Span::styled("Esc", key),
            Span::raw(" quit"),
        ];
        let count = self.list.items().len();
        let summary = match self.list.query() {
            Some(query) => format!("   {count} results for {query:?}"),
            None => format!("   {count} products"),
        };
        spans.push(Span::styled(summary, Style::default().fg(Color::DarkGray)));
        Line::from(spans)
    }
}

impl Model for Shelf {
    type Message = Msg;
    type Flags = Flags;

    fn init(flags: Flags) -> (Self, Command<Msg>) {
        let mut search = SearchBox::new("Search products...");
        search.focus();
        let mut shelf = Shelf {
            catalog: flags.catalog,
            list: ListState::new(flags.page_size, flags.search),
            search,
            pane: ProductPane::new(),
            spinner: Spinner::new("loading").with_label("Loading..."),
        };
        let request = shelf.list.start();
        let cmd = shelf.dispatch(request);
        shelf.refresh_footer();
        (shelf, cmd)
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        let cmd = match msg {
            Msg::Search(search_box::Message::Changed(text)) => self.query_changed(&text),
            Msg::Search(msg) => self.search.update(msg).map(Msg::Search),
            Msg::Pane(msg) => self.scrolled(msg),
            Msg::Spinner(msg) => self.spinner.update(msg).map(Msg::Spinner),
            Msg::PageLoaded {
                ticket,
                kind,
                result,
            } => {
                let outcome = self.list.page_loaded(ticket, kind, result);
                self.applied(outcome);
                Command::none()
            }
            Msg::SearchLoaded { ticket, result } => {
                let outcome = self.list.search_loaded(ticket, result);
                self.applied(outcome);
                Command::none()
            }
            Msg::Resized => Command::none(),
            Msg::Quit => Command::quit(),
        };
        self.refresh_footer();
        cmd
    }

    fn view(&self, frame: &mut Frame) {
        let [title, search, list, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let heading = Paragraph::new(Line::styled(
            "Product List",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(heading, title);

        self.search.view(frame, search);
        self.pane.view(frame, list);
        frame.render_widget(Paragraph::new(self.status_line()), status);
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        let mut subs = vec![terminal_events(map_event)];
        subs.extend(
            self.spinner
                .subscriptions()
                .into_iter()
                .map(|sub| sub.map(Msg::Spinner)),
        );
        subs
    }
}

/// Route terminal input: navigation keys and the wheel scroll the pane,
/// everything else edits the search box.
fn map_event(event: TerminalEvent) -> Option<Msg> {
    match event {
        TerminalEvent::Key(key) if key.kind != KeyEventKind::Release => Some(map_key(key)),
        TerminalEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => {
                Some(Msg::Pane(product_pane::Message::MouseWheel { up: true }))
            }
            MouseEventKind::ScrollDown => {
                Some(Msg::Pane(product_pane::Message::MouseWheel { up: false }))
            }
            _ => None,
        },
        TerminalEvent::Paste(text) => Some(Msg::Search(search_box::Message::Paste(text))),
        TerminalEvent::Resize(..) => Some(Msg::Resized),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Msg {
    match key.code {
        KeyCode::Esc => Msg::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Msg::Quit,
        KeyCode::Up
        | KeyCode::Down
        | KeyCode::PageUp
        | KeyCode::PageDown
        | KeyCode::Home
        | KeyCode::End => Msg::Pane(product_pane::Message::KeyPress(key)),
        _ => Msg::Search(search_box::Message::KeyPress(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list_state::{ErrorPolicy, Phase};
    use crossterm::event::{KeyEventState, MouseEvent};
    use shelf_client::FetchFuture;
    use shelf_core::testing::TestProgram;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Page { offset: usize, limit: usize },
        Search(String),
    }

    /// In-memory catalog: pages are numbered products, searches return
    /// canned lists, and chosen page offsets fail.
    #[derive(Default)]
    struct ScriptedCatalog {
        calls: Mutex<Vec<Call>>,
        searches: HashMap<String, Vec<Product>>,
        failing_offsets: Vec<usize>,
    }

    impl ScriptedCatalog {
        fn with_search(mut self, text: &str, ids: &[u64]) -> Self {
            self.searches
                .insert(text.to_string(), ids.iter().copied().map(product).collect());
            self
        }

        fn failing_at(mut self, offset: usize) -> Self {
            self.failing_offsets.push(offset);
            self
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Catalog for ScriptedCatalog {
        fn fetch_page(&self, offset: usize, limit: usize) -> FetchFuture {
            self.calls.lock().unwrap().push(Call::Page { offset, limit });
            let result = if self.failing_offsets.contains(&offset) {
                Err(FetchError::Status {
                    status: 503,
                    url: format!("/products?skip={offset}"),
                })
            } else {
                Ok((offset + 1..=offset + limit)
                    .map(|id| product(id as u64))
                    .collect())
            };
            Box::pin(async move { result })
        }

        fn search(&self, text: &str) -> FetchFuture {
            self.calls.lock().unwrap().push(Call::Search(text.to_string()));
            let products = self.searches.get(text).cloned().unwrap_or_default();
            Box::pin(async move { Ok(products) })
        }
    }

    fn product(id: u64) -> Product {
        Product {
            id,
            title: format!("Product {id}"),
            price: id as f64,
            thumbnail: format!("https://cdn.example.com/{id}.webp"),
        }
    }

    fn start(catalog: &Arc<ScriptedCatalog>) -> TestProgram<Shelf> {
        TestProgram::<Shelf>::new(Flags::new(catalog.clone()))
    }

    fn ids(prog: &TestProgram<Shelf>) -> Vec<u64> {
        prog.model().list().items().iter().map(|p| p.id).collect()
    }

    fn press(prog: &mut TestProgram<Shelf>, code: KeyCode) {
        prog.send(map_key(KeyEvent::new(code, KeyModifiers::NONE)));
        prog.drain_messages();
    }

    fn paste(prog: &mut TestProgram<Shelf>, text: &str) {
        prog.send(Msg::Search(search_box::Message::Paste(text.into())));
        prog.drain_messages();
    }

    #[tokio::test]
    async fn mount_loads_first_page() {
        let catalog = Arc::new(ScriptedCatalog::default());
        let mut prog = start(&catalog);
        assert_eq!(prog.pending_tasks(), 1);
        assert!(prog.render_string(60, 20).contains("Loading..."));

        prog.resolve(0).await;
        assert_eq!(ids(&prog), (1..=20).collect::<Vec<_>>());
        assert_eq!(catalog.calls(), vec![Call::Page { offset: 0, limit: 20 }]);
        assert!(!prog.render_string(60, 20).contains("Loading..."));
    }

    #[tokio::test]
    async fn scrolling_to_the_end_appends_next_page() {
        let catalog = Arc::new(ScriptedCatalog::default());
        let mut prog = start(&catalog);
        prog.resolve(0).await;
        prog.render(60, 20);

        press(&mut prog, KeyCode::End);
        assert_eq!(prog.pending_tasks(), 1);
        press(&mut prog, KeyCode::End);
        assert_eq!(prog.pending_tasks(), 1);

        prog.resolve(0).await;
        assert_eq!(ids(&prog), (1..=40).collect::<Vec<_>>());
        assert_eq!(
            catalog.calls(),
            vec![
                Call::Page { offset: 0, limit: 20 },
                Call::Page { offset: 20, limit: 20 },
            ]
        );
        assert_eq!(prog.model().pane().products().len(), 40);
    }

    #[tokio::test]
    async fn scrolling_far_from_the_end_fetches_nothing() {
        let catalog = Arc::new(ScriptedCatalog::default());
        let mut prog = start(&catalog);
        prog.resolve(0).await;
        prog.render(60, 20);

        press(&mut prog, KeyCode::Down);
        assert_eq!(prog.pending_tasks(), 0);
        assert_eq!(prog.model().pane().offset(), 1);
    }

    #[tokio::test]
    async fn mouse_wheel_scrolls_the_pane() {
        let catalog = Arc::new(ScriptedCatalog::default());
        let mut prog = start(&catalog);
        prog.resolve(0).await;
        prog.render(60, 20);

        let wheel = TerminalEvent::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 5,
            row: 5,
            modifiers: KeyModifiers::NONE,
        });
        prog.send(map_event(wheel).unwrap());
        assert_eq!(prog.model().pane().offset(), 3);
    }

    #[tokio::test]
    async fn latest_search_wins_when_responses_cross() {
        let catalog = Arc::new(
            ScriptedCatalog::default()
                .with_search("phone", &[101, 102, 103])
                .with_search("phone2", &[201]),
        );
        let mut prog = start(&catalog);
        prog.resolve(0).await;

        paste(&mut prog, "phone");
        assert!(prog.model().pane().products().is_empty());
        press(&mut prog, KeyCode::Char('2'));
        assert_eq!(prog.pending_tasks(), 2);

        prog.resolve(0).await;
        assert!(ids(&prog).is_empty());
        assert_eq!(prog.model().list().phase(), Phase::Searching);

        prog.resolve(0).await;
        assert_eq!(ids(&prog), vec![201]);
        assert!(prog.render_string(60, 20).contains("Product 201"));
    }

    #[tokio::test]
    async fn late_earlier_search_is_ignored() {
        let catalog = Arc::new(
            ScriptedCatalog::default()
                .with_search("phone", &[101, 102, 103])
                .with_search("phone2", &[201]),
        );
        let mut prog = start(&catalog);
        prog.resolve(0).await;

        paste(&mut prog, "phone");
        press(&mut prog, KeyCode::Char('2'));
        prog.resolve(1).await;
        prog.resolve(0).await;
        assert_eq!(ids(&prog), vec![201]);
    }

    #[tokio::test]
    async fn every_keystroke_searches() {
        let catalog = Arc::new(ScriptedCatalog::default());
        let mut prog = start(&catalog);
        prog.resolve(0).await;

        for c in "lamp".chars() {
            press(&mut prog, KeyCode::Char(c));
        }
        assert_eq!(prog.pending_tasks(), 4);
        assert_eq!(
            catalog.calls()[1..],
            [
                Call::Search("l".into()),
                Call::Search("la".into()),
                Call::Search("lam".into()),
                Call::Search("lamp".into()),
            ]
        );
    }

    #[tokio::test]
    async fn clearing_search_restores_first_page() {
        let catalog = Arc::new(ScriptedCatalog::default().with_search("phone", &[101]));
        let mut prog = start(&catalog);
        prog.resolve(0).await;
        paste(&mut prog, "phone");
        prog.resolve(0).await;
        assert_eq!(ids(&prog), vec![101]);

        prog.send(map_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)));
        prog.drain_messages();
        assert!(ids(&prog).is_empty());
        prog.resolve(0).await;

        assert_eq!(ids(&prog), (1..=20).collect::<Vec<_>>());
        assert_eq!(
            catalog.calls().last(),
            Some(&Call::Page { offset: 0, limit: 20 })
        );
    }

    #[tokio::test]
    async fn no_pagination_during_search() {
        let catalog = Arc::new(ScriptedCatalog::default().with_search("a", &[1, 2]));
        let mut prog = start(&catalog);
        prog.resolve(0).await;
        paste(&mut prog, "a");
        prog.resolve(0).await;

        press(&mut prog, KeyCode::End);
        press(&mut prog, KeyCode::PageDown);
        assert_eq!(prog.pending_tasks(), 0);
    }

    #[tokio::test]
    async fn initial_failure_is_shown_in_red() {
        let catalog = Arc::new(ScriptedCatalog::default().failing_at(0));
        let mut prog = start(&catalog);
        prog.resolve(0).await;

        let screen = prog.render_string(70, 20);
        assert!(screen.contains("Failed to load initial products. Please try again."));
        assert!(!screen.contains("Loading..."));
    }

    #[tokio::test]
    async fn sticky_errors_outlive_later_success() {
        let catalog = Arc::new(
            ScriptedCatalog::default()
                .failing_at(0)
                .with_search("x", &[7]),
        );
        let flags = Flags {
            search: SearchOptions {
                error_policy: ErrorPolicy::Sticky,
                ..SearchOptions::default()
            },
            ..Flags::new(catalog.clone())
        };
        let mut prog = TestProgram::<Shelf>::new(flags);
        prog.resolve(0).await;
        paste(&mut prog, "x");
        prog.resolve(0).await;

        assert_eq!(ids(&prog), vec![7]);
        assert!(prog.model().list().error().is_some());
    }

    #[tokio::test]
    async fn view_shows_title_search_and_products() {
        let catalog = Arc::new(ScriptedCatalog::default());
        let mut prog = start(&catalog);
        prog.resolve(0).await;

        let screen = prog.render_string(80, 20);
        assert!(screen.contains("Product List"));
        assert!(screen.contains("Search products..."));
        assert!(screen.contains("Product 1"));
        assert!(screen.contains("$1"));
        assert!(screen.contains("20 products"));
    }

    #[test]
    fn quit_keys() {
        let esc = map_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        let ctrl_c = map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(matches!(esc, Msg::Quit));
        assert!(matches!(ctrl_c, Msg::Quit));

        let catalog = Arc::new(ScriptedCatalog::default());
        let mut prog = start(&catalog);
        prog.send(esc);
        assert!(prog.has_quit());
    }

    #[test]
    fn typing_goes_to_search_and_navigation_to_pane() {
        let typed = map_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(matches!(typed, Msg::Search(_)));
        let home = map_key(KeyEvent::new(KeyCode::Home, KeyModifiers::NONE));
        assert!(matches!(home, Msg::Pane(_)));
    }

    #[test]
    fn key_releases_and_focus_are_dropped() {
        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(map_event(TerminalEvent::Key(release)).is_none());
        assert!(map_event(TerminalEvent::Focus(true)).is_none());
        assert!(matches!(
            map_event(TerminalEvent::Resize(80, 24)),
            Some(Msg::Resized)
        ));
    }

    #[tokio::test]
    async fn resize_does_not_paginate() {
        let catalog = Arc::new(ScriptedCatalog::default());
        let mut prog = start(&catalog);
        prog.resolve(0).await;
        prog.render(60, 200);

        prog.send(Msg::Resized);
        assert_eq!(prog.pending_tasks(), 0);
    }
}
