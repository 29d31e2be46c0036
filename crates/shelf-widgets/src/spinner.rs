//! Animated loading indicator.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use shelf_core::subscription::subscribe;
use shelf_core::{Command, Component, Every, Subscription};
use std::time::Duration;

/// Built-in frame sets.
pub mod frames {
    /// Braille dot spinner cycling through ten positions.
    pub const DOTS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    /// Classic ASCII line spinner.
    pub const LINE: &[&str] = &["|", "/", "-", "\\"];
}

const FRAME_INTERVAL: Duration = Duration::from_millis(80);

/// Messages for the spinner component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Advance to the next frame.
    Tick,
}

/// A spinner with a label, e.g. `⠙ Loading...`.
///
/// It only subscribes to its timer while spinning, so an idle UI does not
/// wake up.
pub struct Spinner {
    frames: &'static [&'static str],
    frame_index: usize,
    label: String,
    style: Style,
    spinning: bool,
    key: &'static str,
}

impl Spinner {
    /// Create a stopped spinner whose timer subscription is identified by `key`.
    pub fn new(key: &'static str) -> Self {
        Self {
            frames: frames::DOTS,
            frame_index: 0,
            label: String::new(),
            style: Style::default().fg(Color::Yellow),
            spinning: false,
            key,
        }
    }

    pub fn with_frames(mut self, frames: &'static [&'static str]) -> Self {
        self.frames = frames;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Start or stop the animation. Starting again resumes from the current frame.
    pub fn set_spinning(&mut self, spinning: bool) {
        self.spinning = spinning;
    }

    /// The current frame followed by the label, as a styled line.
    pub fn line(&self) -> Line<'static> {
        let frame = self.frames.get(self.frame_index).copied().unwrap_or_default();
        if self.label.is_empty() {
            Line::from(Span::styled(frame.to_string(), self.style))
        } else {
            Line::from(Span::styled(format!("{frame} {}", self.label), self.style))
        }
    }
}

impl Component for Spinner {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Tick => {
                if self.spinning && !self.frames.is_empty() {
                    self.frame_index = (self.frame_index + 1) % self.frames.len();
                }
            }
        }
        Command::none()
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if self.spinning && area.width > 0 && area.height > 0 {
            frame.render_widget(Paragraph::new(self.line()), area);
        }
    }

    fn subscriptions(&self) -> Vec<Subscription<Message>> {
        if self.spinning {
            vec![subscribe(Every::new(FRAME_INTERVAL, self.key)).map(|_| Message::Tick)]
        } else {
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_only_advance_while_spinning() {
        let mut spinner = Spinner::new("loading").with_frames(frames::LINE);
        spinner.update(Message::Tick);
        assert_eq!(spinner.line().to_string(), "|");

        spinner.set_spinning(true);
        spinner.update(Message::Tick);
        assert_eq!(spinner.line().to_string(), "/");
    }

    #[test]
    fn frames_wrap_around() {
        let mut spinner = Spinner::new("loading").with_frames(frames::LINE);
        spinner.set_spinning(true);
        for _ in 0..frames::LINE.len() {
            spinner.update(Message::Tick);
        }
        assert_eq!(spinner.line().to_string(), "|");
    }

    #[test]
    fn label_follows_frame() {
        let spinner = Spinner::new("loading")
            .with_frames(frames::LINE)
            .with_label("Loading...");
        assert_eq!(spinner.line().to_string(), "| Loading...");
    }

    #[test]
    fn subscribes_only_while_spinning() {
        let mut spinner = Spinner::new("loading");
        assert!(spinner.subscriptions().is_empty());
        spinner.set_spinning(true);
        assert_eq!(spinner.subscriptions().len(), 1);
    }
}
