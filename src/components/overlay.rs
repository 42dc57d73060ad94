use super::helpers::{card_rect, draw_drop_shadow};
use crate::app::state::Phase;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

const CARD_WIDTH_PERCENT: u16 = 70;
const CARD_MAX_HEIGHT: u16 = 22;
const PROMPT: &str = "› ";
const TITLE: &str = " SEARCH ";
const RESULTS_PERCENT: u16 = 40;
const RESULTS_MAX_WIDTH: u16 = 40;

pub const NO_RESULTS: &str = "No results found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayLayout {
    pub card: Rect,
    pub prompt: Rect,
    pub input: Rect,
    pub divider: Option<Rect>,
    pub results: Option<Rect>,
    pub preview: Option<Rect>,
    pub message: Option<Rect>,
}

/// Where each part of the overlay card goes. `None` while closed.
#[must_use]
pub fn overlay_layout(area: Rect, phase: Phase) -> Option<OverlayLayout> {
    if !phase.is_open() || area.width == 0 || area.height == 0 {
        return None;
    }

    let height = if phase == Phase::OpenEmpty {
        3
    } else {
        CARD_MAX_HEIGHT.min(area.height.saturating_sub(2)).max(3)
    };
    let card = card_rect(CARD_WIDTH_PERCENT, height, area);
    let inner = Block::default().borders(Borders::ALL).inner(card);

    let prompt_width = (PROMPT.chars().count() as u16).min(inner.width);
    let prompt = Rect {
        width: prompt_width,
        height: inner.height.min(1),
        ..inner
    };
    let input = Rect {
        x: inner.x + prompt_width,
        width: inner.width - prompt_width,
        ..prompt
    };

    let mut layout = OverlayLayout {
        card,
        prompt,
        input,
        divider: None,
        results: None,
        preview: None,
        message: None,
    };
    if phase == Phase::OpenEmpty || inner.height < 3 {
        return Some(layout);
    }

    layout.divider = Some(Rect {
        y: inner.y + 1,
        height: 1,
        ..inner
    });
    let body = Rect {
        y: inner.y + 2,
        height: inner.height - 2,
        ..inner
    };

    match phase {
        Phase::OpenResults => {
            let share = u32::from(body.width) * u32::from(RESULTS_PERCENT) / 100;
            let list_width = u16::try_from(share)
                .unwrap_or(u16::MAX)
                .min(RESULTS_MAX_WIDTH);
            layout.results = Some(Rect {
                width: list_width,
                ..body
            });
            layout.preview = Some(Rect {
                x: body.x + list_width,
                width: body.width - list_width,
                ..body
            });
        }
        Phase::OpenNoResults => layout.message = Some(body),
        Phase::Closed | Phase::OpenEmpty => {}
    }
    Some(layout)
}

/// The card chrome: shadow, border, prompt, divider and the empty-results
/// message. Input, list and preview are drawn into the layout's rects.
pub struct OverlayFrame<'a> {
    pub theme: &'a Theme,
    pub layout: &'a OverlayLayout,
}

impl Widget for OverlayFrame<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = self.layout;
        draw_drop_shadow(buf, layout.card, area);
        Clear.render(layout.card, buf);

        let hints = [("Esc", "close"), ("↑↓", "move"), ("Enter", "select"), ("PgUp/PgDn", "scroll")];
        let mut footer = vec![Span::raw(" ")];
        for (key, desc) in hints {
            footer.push(Span::styled(format!(" {key} "), self.theme.footer_key));
            footer.push(Span::styled(format!(" {desc} "), self.theme.footer_text));
        }

        Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(TITLE, self.theme.overlay_title),
                Span::raw(" "),
            ]))
            .title_bottom(Line::from(footer))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus)
            .style(self.theme.base)
            .render(layout.card, buf);

        if layout.prompt.width > 0 && layout.prompt.height > 0 {
            buf.set_span(
                layout.prompt.x,
                layout.prompt.y,
                &Span::styled(PROMPT, self.theme.query_prompt),
                layout.prompt.width,
            );
        }

        if let Some(divider) = layout.divider {
            let rule = "─".repeat(usize::from(divider.width));
            buf.set_span(
                divider.x,
                divider.y,
                &Span::styled(rule, self.theme.divider),
                divider.width,
            );
        }

        if let Some(message) = layout.message {
            Paragraph::new(Line::from(Span::styled(NO_RESULTS, self.theme.no_results)))
                .alignment(Alignment::Center)
                .render(
                    Rect {
                        y: message.y + message.height / 3,
                        height: message.height.min(1),
                        ..message
                    },
                    buf,
                );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_has_no_layout() {
        assert!(overlay_layout(Rect::new(0, 0, 100, 40), Phase::Closed).is_none());
    }

    #[test]
    fn test_empty_query_shows_input_only() {
        let layout = overlay_layout(Rect::new(0, 0, 100, 40), Phase::OpenEmpty).unwrap();
        assert_eq!(layout.card.height, 3);
        assert_eq!(layout.input.height, 1);
        assert!(layout.divider.is_none());
        assert!(layout.results.is_none());
        assert!(layout.preview.is_none());
        assert!(layout.message.is_none());
    }

    #[test]
    fn test_results_split() {
        let layout = overlay_layout(Rect::new(0, 0, 200, 40), Phase::OpenResults).unwrap();
        let results = layout.results.unwrap();
        let preview = layout.preview.unwrap();
        assert_eq!(results.width, RESULTS_MAX_WIDTH);
        assert_eq!(preview.x, results.right());
        assert_eq!(preview.right(), layout.input.right());

        let narrow = overlay_layout(Rect::new(0, 0, 60, 40), Phase::OpenResults).unwrap();
        let results = narrow.results.unwrap();
        let body_width = results.width + narrow.preview.unwrap().width;
        assert_eq!(results.width, body_width * RESULTS_PERCENT / 100);
    }

    #[test]
    fn test_no_results_message() {
        let area = Rect::new(0, 0, 80, 30);
        let layout = overlay_layout(area, Phase::OpenNoResults).unwrap();
        assert!(layout.results.is_none());
        assert!(layout.message.is_some());

        let theme = Theme::default();
        let mut buf = Buffer::empty(area);
        OverlayFrame {
            theme: &theme,
            layout: &layout,
        }
        .render(area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains(NO_RESULTS));
        assert!(text.contains("SEARCH"));
        assert!(!text.contains("INSERT"));
    }

    #[test]
    fn test_tiny_terminal() {
        let layout = overlay_layout(Rect::new(0, 0, 4, 2), Phase::OpenResults).unwrap();
        assert!(layout.results.is_none());
        assert!(layout.card.height <= 2);
    }
}
