//! Single-line search input that reports every edit.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use shelf_core::{Command, Component};
use unicode_width::UnicodeWidthChar;

/// Messages for the search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A keyboard event to process.
    KeyPress(KeyEvent),
    /// Insert pasted text at the cursor.
    Paste(String),
    /// Emitted after any edit that changed the value. Carries the new value.
    Changed(String),
}

#[derive(Debug, Clone)]
struct SearchBoxStyle {
    text: Style,
    placeholder: Style,
    cursor: Style,
    border: Style,
    focused_border: Style,
}

impl Default for SearchBoxStyle {
    fn default() -> Self {
        Self {
            text: Style::default(),
            placeholder: Style::default().fg(Color::DarkGray),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            border: Style::default().fg(Color::DarkGray),
            focused_border: Style::default().fg(Color::Cyan),
        }
    }
}

/// A bordered one-line text input.
///
/// Every edit that changes the value returns
/// `Command::message(Message::Changed(value))`; cursor movement does not.
/// The parent reacts to `Changed`, which is where live search hooks in.
pub struct SearchBox {
    value: Vec<char>,
    cursor: usize,
    focus: bool,
    placeholder: String,
    style: SearchBoxStyle,
}

impl SearchBox {
    /// Create an empty search box showing `placeholder` while empty.
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            value: Vec::new(),
            cursor: 0,
            focus: false,
            placeholder: placeholder.into(),
            style: SearchBoxStyle::default(),
        }
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    /// Current value.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Set the value and put the cursor at the end. Does not emit `Changed`.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.chars().collect();
        self.cursor = self.value.len();
    }

    fn changed(&self) -> Command<Message> {
        Command::message(Message::Changed(self.value()))
    }

    fn insert(&mut self, text: &str) -> Command<Message> {
        // Control characters (newlines from a paste, tabs) would break the
        // single-line layout.
        let chars: Vec<char> = text.chars().filter(|c| !c.is_control()).collect();
        if chars.is_empty() {
            return Command::none();
        }
        let n = chars.len();
        self.value.splice(self.cursor..self.cursor, chars);
        self.cursor += n;
        self.changed()
    }

    fn delete_backward(&mut self) -> Command<Message> {
        if self.cursor == 0 {
            return Command::none();
        }
        self.cursor -= 1;
        self.value.remove(self.cursor);
        self.changed()
    }

    fn delete_forward(&mut self) -> Command<Message> {
        if self.cursor >= self.value.len() {
            return Command::none();
        }
        self.value.remove(self.cursor);
        self.changed()
    }

    fn clear(&mut self) -> Command<Message> {
        if self.value.is_empty() {
            return Command::none();
        }
        self.value.clear();
        self.cursor = 0;
        self.changed()
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('a') if ctrl => {
                self.cursor = 0;
                Command::none()
            }
            KeyCode::Char('e') if ctrl => {
                self.cursor = self.value.len();
                Command::none()
            }
            KeyCode::Char('u') if ctrl => self.clear(),
            KeyCode::Char(c)
                if key.modifiers == KeyModifiers::NONE || key.modifiers == KeyModifiers::SHIFT =>
            {
                self.insert(c.encode_utf8(&mut [0; 4]))
            }
            KeyCode::Backspace => self.delete_backward(),
            KeyCode::Delete => self.delete_forward(),
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                Command::none()
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.value.len());
                Command::none()
            }
            KeyCode::Home => {
                self.cursor = 0;
                Command::none()
            }
            KeyCode::End => {
                self.cursor = self.value.len();
                Command::none()
            }
            _ => Command::none(),
        }
    }

    fn visible_spans(&self, width: usize) -> Vec<Span<'_>> {
        if self.value.is_empty() {
            let placeholder = Span::styled(self.placeholder.as_str(), self.style.placeholder);
            return if self.focus {
                vec![Span::styled(" ", self.style.cursor), placeholder]
            } else {
                vec![placeholder]
            };
        }

        // Keep the cursor cell on screen: scroll so it sits in the last
        // column once the text is wider than the box. Widths are display
        // columns, so wide characters take two.
        let cursor_width = self.value.get(self.cursor).map_or(1, |c| cell_width(*c)).max(1);
        let mut start = self.cursor;
        let mut used = cursor_width;
        while start > 0 && used + cell_width(self.value[start - 1]) <= width {
            start -= 1;
            used += cell_width(self.value[start]);
        }
        let mut end = start;
        let mut used = 0;
        while end < self.value.len() && used + cell_width(self.value[end]) <= width {
            used += cell_width(self.value[end]);
            end += 1;
        }
        let before: String = self.value[start..self.cursor].iter().collect();
        let mut spans = vec![Span::styled(before, self.style.text)];

        if self.focus {
            let at_cursor = self.value.get(self.cursor).map_or(' ', |c| *c);
            spans.push(Span::styled(at_cursor.to_string(), self.style.cursor));
            if self.cursor + 1 < end {
                let after: String = self.value[self.cursor + 1..end].iter().collect();
                spans.push(Span::styled(after, self.style.text));
            }
        } else if self.cursor < end {
            let after: String = self.value[self.cursor..end].iter().collect();
            spans.push(Span::styled(after, self.style.text));
        }
        spans
    }
}

fn cell_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}

impl Component for SearchBox {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus => self.handle_key(key),
            Message::Paste(text) if self.focus => self.insert(&text),
            _ => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let border = if self.focus {
            self.style.focused_border
        } else {
            self.style.border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Search ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let line = Line::from(self.visible_spans(inner.width as usize));
        frame.render_widget(Paragraph::new(line), inner);
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
