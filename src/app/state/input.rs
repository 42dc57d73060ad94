use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;
use std::ops::Deref;
use tui_textarea::{CursorMove, TextArea};

/// Single-line text field holding the search query.
pub struct QueryInput<'a>(TextArea<'a>);

impl Default for QueryInput<'_> {
    fn default() -> Self {
        let mut area = TextArea::default();
        area.set_cursor_line_style(Style::default());
        area.set_placeholder_text("Search blocks and patterns");
        Self(area)
    }
}

impl QueryInput<'_> {
    pub fn text(&self) -> String {
        self.0.lines().join("")
    }

    /// Feeds a key to the field. Newlines are refused so the query stays on
    /// one line. Returns whether the text changed.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        let newline = match key.code {
            KeyCode::Enter => true,
            KeyCode::Char('m') => key.modifiers.contains(KeyModifiers::CONTROL),
            _ => false,
        };
        if newline {
            return false;
        }
        self.0.input(key)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_style(&mut self, text: Style, placeholder: Style) {
        self.0.set_style(text);
        self.0.set_placeholder_style(placeholder);
    }
}

impl Clone for QueryInput<'_> {
    fn clone(&self) -> Self {
        let mut input = Self::default();
        input.0 = TextArea::new(self.0.lines().to_vec());
        input.0.set_cursor_line_style(Style::default());
        input.0.set_placeholder_text(self.0.placeholder_text());
        let (row, col) = self.0.cursor();
        input
            .0
            .move_cursor(CursorMove::Jump(row as u16, col as u16));
        input
    }
}

impl std::fmt::Debug for QueryInput<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryInput")
            .field("text", &self.text())
            .field("cursor", &self.0.cursor())
            .finish()
    }
}

impl PartialEq for QueryInput<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.0.lines() == other.0.lines() && self.0.cursor() == other.0.cursor()
    }
}

impl<'a> Deref for QueryInput<'a> {
    type Target = TextArea<'a>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Widget for &QueryInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self.0, area, buf);
    }
}
