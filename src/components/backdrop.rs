use crate::app::trigger::KeyBinding;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

/// The screen behind the overlay: the trigger hint and catalog size.
pub struct Backdrop<'a> {
    pub theme: &'a Theme,
    pub binding: KeyBinding,
    pub blocks: usize,
    pub patterns: usize,
}

impl Widget for Backdrop<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default().style(self.theme.base).render(area, buf);

        let lines = vec![
            Line::from(vec![
                Span::styled("Press ", self.theme.backdrop_hint),
                Span::styled(self.binding.to_string(), self.theme.backdrop_key),
            ]),
            Line::from(Span::styled(
                "to search blocks and patterns",
                self.theme.backdrop_hint,
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("{} blocks · {} patterns", self.blocks, self.patterns),
                self.theme.footer_text,
            )),
            Line::from(vec![
                Span::styled(" q ", self.theme.footer_key),
                Span::styled(" quit", self.theme.footer_text),
            ]),
        ];

        let height = (lines.len() as u16).min(area.height);
        let centered = Rect {
            y: area.y + (area.height - height) / 2,
            height,
            ..area
        };
        if centered.width > 0 && centered.height > 0 {
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .render(centered, buf);
        }
    }
}
