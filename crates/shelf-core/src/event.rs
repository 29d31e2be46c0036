use crossterm::event::{KeyEvent, MouseEvent};

/// Terminal input delivered through the
/// [`terminal_events`](crate::subscriptions::terminal_events) subscription.
///
/// Variants wrap the crossterm payloads so key codes, modifiers and mouse
/// kinds can be matched with the full crossterm API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// A keyboard event.
    Key(KeyEvent),
    /// A mouse event (wheel scrolling is the one the catalog pane uses).
    Mouse(MouseEvent),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
    /// Bracketed paste content.
    Paste(String),
    /// Focus gained (`true`) or lost (`false`).
    Focus(bool),
}

impl From<crossterm::event::Event> for TerminalEvent {
    fn from(event: crossterm::event::Event) -> Self {
        use crossterm::event::Event;
        match event {
            Event::Key(k) => TerminalEvent::Key(k),
            Event::Mouse(m) => TerminalEvent::Mouse(m),
            Event::Resize(w, h) => TerminalEvent::Resize(w, h),
            Event::Paste(s) => TerminalEvent::Paste(s),
            Event::FocusGained => TerminalEvent::Focus(true),
            Event::FocusLost => TerminalEvent::Focus(false),
        }
    }
}
