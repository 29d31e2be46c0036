use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::{layout::Rect, Frame};

/// A reusable sub-model that renders into a given [`Rect`].
///
/// Components look like [`Model`](crate::Model) except that
/// [`view`](Component::view) receives the area to draw into, so a parent can
/// place them inside its own layout. The parent wraps the component's
/// message type in one of its own variants and lifts returned commands with
/// [`Command::map`]:
///
/// ```rust,ignore
/// fn update(&mut self, msg: Msg) -> Command<Msg> {
///     match msg {
///         Msg::Search(m) => self.search.update(m).map(Msg::Search),
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    /// The component's internal message type.
    type Message: Send + 'static;

    /// Process a message, mutate state, and return a [`Command`].
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into `area`. Implementations must stay inside it.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Subscriptions the parent should include (mapped) in its own list.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }

    /// Whether this component currently has keyboard focus.
    fn focused(&self) -> bool {
        false
    }
}
