//! Scrollable product list with a status footer and near-bottom detection.

use std::cell::Cell;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};
use ratatui::Frame;
use shelf_client::Product;
use shelf_core::{Command, Component};
use unicode_width::UnicodeWidthStr;

/// Rows each product occupies: title/price, then thumbnail URL.
pub const ROWS_PER_PRODUCT: usize = 2;

/// Messages for the product pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Navigation keys: Up/Down, PageUp/PageDown, Home/End.
    KeyPress(KeyEvent),
    /// Mouse wheel. `up` is true for scroll-up.
    MouseWheel { up: bool },
}

/// Rows scrolled per mouse wheel notch.
const WHEEL_ROWS: u16 = 3;

#[derive(Debug, Clone)]
struct ProductPaneStyle {
    title: Style,
    price: Style,
    thumbnail: Style,
    border: Style,
    scrollbar: Style,
}

impl Default for ProductPaneStyle {
    fn default() -> Self {
        Self {
            title: Style::default().add_modifier(Modifier::BOLD),
            price: Style::default().fg(Color::Green),
            thumbnail: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::DarkGray),
            scrollbar: Style::default(),
        }
    }
}

/// The scroll container of the catalog browser.
///
/// The pane keeps its own copy of the products it shows; the owner pushes a
/// new list with [`replace`](ProductPane::replace) (scrolls back to the top)
/// or [`set_products`](ProductPane::set_products) (keeps the position, used
/// after appending a page). Footer lines (loading indicator, error message)
/// scroll with the content, below the last product.
pub struct ProductPane {
    products: Vec<Product>,
    footer: Vec<Line<'static>>,
    offset: u16,
    style: ProductPaneStyle,
    /// Inner height from the last render.
    visible_height: Cell<u16>,
}

impl Default for ProductPane {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductPane {
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
            footer: Vec::new(),
            offset: 0,
            style: ProductPaneStyle::default(),
            visible_height: Cell::new(24),
        }
    }

    /// Show `products` and scroll back to the top.
    pub fn replace(&mut self, products: Vec<Product>) {
        self.products = products;
        self.offset = 0;
    }

    /// Show `products` keeping the current scroll position.
    pub fn set_products(&mut self, products: Vec<Product>) {
        self.products = products;
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Lines rendered below the products (status, errors).
    pub fn set_footer(&mut self, footer: Vec<Line<'static>>) {
        self.footer = footer;
    }

    /// Current top row.
    pub fn offset(&self) -> u16 {
        self.offset
    }

    /// Inner height seen at the last render.
    pub fn visible_height(&self) -> u16 {
        self.visible_height.get()
    }

    /// Record the inner height without rendering (layout known ahead of time).
    pub fn set_visible_height(&self, height: u16) {
        self.visible_height.set(height);
    }

    /// Total content rows: products plus footer.
    pub fn content_rows(&self) -> usize {
        self.products.len() * ROWS_PER_PRODUCT + self.footer.len()
    }

    /// Whether the bottom of the visible window is within `tolerance` rows of
    /// the end of the content. Always true when everything fits.
    pub fn near_bottom(&self, tolerance: u16) -> bool {
        let seen = usize::from(self.offset) + usize::from(self.visible_height.get());
        seen + usize::from(tolerance) >= self.content_rows()
    }

    fn max_offset(&self) -> u16 {
        let rows = u16::try_from(self.content_rows()).unwrap_or(u16::MAX);
        rows.saturating_sub(self.visible_height.get())
    }

    fn scroll_down(&mut self, rows: u16) {
        self.offset = self.offset.saturating_add(rows).min(self.max_offset());
    }

    fn scroll_up(&mut self, rows: u16) {
        self.offset = self.offset.saturating_sub(rows);
    }

    fn product_lines(&self, product: &Product, width: usize) -> [Line<'static>; 2] {
        let price = format!("${}", product.price);
        let room = width.saturating_sub(price.width() + 1);
        let title = truncate(&product.title, room);
        let gap = width.saturating_sub(title.width() + price.width()).max(1);
        [
            Line::from(vec![
                Span::styled(title, self.style.title),
                Span::raw(" ".repeat(gap)),
                Span::styled(price, self.style.price),
            ]),
            Line::from(Span::styled(
                truncate(&product.thumbnail, width),
                self.style.thumbnail,
            )),
        ]
    }
}

/// Cut `text` to at most `width` display columns, marking the cut with `…`.
fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    if width > 0 {
        out.push('…');
    }
    out
}

impl Component for ProductPane {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        let page = self.visible_height.get().max(1);
        match msg {
            Message::KeyPress(key) => match key.code {
                KeyCode::Up => self.scroll_up(1),
                KeyCode::Down => self.scroll_down(1),
                KeyCode::PageUp => self.scroll_up(page),
                KeyCode::PageDown => self.scroll_down(page),
                KeyCode::Home => self.offset = 0,
                KeyCode::End => self.offset = self.max_offset(),
                _ => {}
            },
            Message::MouseWheel { up: true } => self.scroll_up(WHEEL_ROWS),
            Message::MouseWheel { up: false } => self.scroll_down(WHEEL_ROWS),
        }
        Command::none()
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.style.border)
            .title(" Products ");
        let inner = block.inner(area);
        self.visible_height.set(inner.height);

        let width = inner.width.saturating_sub(1) as usize;
        let offset = self.offset.min(self.max_offset());
        let first = usize::from(offset) / ROWS_PER_PRODUCT;
        let wanted = usize::from(inner.height) / ROWS_PER_PRODUCT + 2;

        // Only the products that can be on screen are laid out.
        let mut lines: Vec<Line<'static>> = self
            .products
            .iter()
            .skip(first)
            .take(wanted)
            .flat_map(|product| self.product_lines(product, width))
            .collect();
        let shown_until = (first + wanted).min(self.products.len());
        if shown_until == self.products.len() {
            lines.extend(self.footer.iter().cloned());
        }

        let skip = usize::from(offset) - first * ROWS_PER_PRODUCT;
        let paragraph = Paragraph::new(lines)
            .block(block)
            .scroll((u16::try_from(skip).unwrap_or(0), 0));
        frame.render_widget(paragraph, area);

        if self.content_rows() > usize::from(inner.height) {
            let mut state =
                ScrollbarState::new(usize::from(self.max_offset())).position(usize::from(offset));
            let scrollbar =
                Scrollbar::new(ScrollbarOrientation::VerticalRight).style(self.style.scrollbar);
            frame.render_stateful_widget(scrollbar, area, &mut state);
        }
    }
}
