use crate::domain::catalog::Catalog;
use crate::domain::models::EntryId;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// What the preview pane shows for the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview<'a> {
    pub label: &'static str,
    pub title: &'a str,
    pub description: &'a str,
    pub body: Option<&'a str>,
}

impl<'a> Preview<'a> {
    /// `None` when nothing is selected or the id is not in the catalog.
    #[must_use]
    pub fn resolve(catalog: &'a Catalog, selected: Option<&EntryId>) -> Option<Self> {
        let entry = catalog.get(selected?)?;
        Some(Self {
            label: entry.kind.label(),
            title: entry.display_title(),
            description: entry.display_description(),
            body: entry.content(),
        })
    }

    pub fn lines(&self, theme: &Theme) -> Vec<Line<'a>> {
        let badge = if self.body.is_some() {
            theme.badge_pattern
        } else {
            theme.badge_block
        };

        let mut lines = vec![
            Line::from(Span::styled(format!(" {} ", self.label), badge)),
            Line::from(""),
            Line::from(Span::styled(self.title, theme.preview_title)),
        ];
        lines.extend(
            self.description
                .lines()
                .map(|l| Line::from(Span::styled(l, theme.preview_description))),
        );
        if let Some(body) = self.body {
            lines.push(Line::from(""));
            lines.extend(
                body.lines()
                    .map(|l| Line::from(Span::styled(l, theme.preview_body))),
            );
        }
        lines
    }

    pub fn paragraph(&self, theme: &Theme) -> Paragraph<'a> {
        Paragraph::new(self.lines(theme)).wrap(Wrap { trim: false })
    }

    /// Screen rows the preview takes once wrapped to `width`.
    pub fn wrapped_height(&self, theme: &Theme, width: u16) -> usize {
        if width == 0 {
            return 0;
        }
        self.paragraph(theme).line_count(width)
    }

    /// The furthest scroll at which the last row is still inside `pane`.
    pub fn max_scroll(&self, theme: &Theme, pane: Rect) -> u16 {
        let text = text_area(pane);
        if text.width == 0 || text.height == 0 {
            return 0;
        }
        let rows = self.wrapped_height(theme, text.width);
        u16::try_from(rows.saturating_sub(usize::from(text.height))).unwrap_or(u16::MAX)
    }
}

fn pane_block(theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::LEFT)
        .border_style(theme.divider)
}

/// Where the text goes inside the pane: past the divider, one column of
/// padding either side.
fn text_area(pane: Rect) -> Rect {
    let inner = Block::default().borders(Borders::LEFT).inner(pane);
    Rect {
        x: inner.x.saturating_add(1),
        width: inner.width.saturating_sub(2),
        ..inner
    }
}

pub struct PreviewPane<'a> {
    pub theme: &'a Theme,
    pub preview: Option<Preview<'a>>,
    pub scroll: u16,
}

impl Widget for PreviewPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        pane_block(self.theme).render(area, buf);

        let Some(preview) = self.preview else {
            return;
        };
        let text = text_area(area);
        if text.width == 0 || text.height == 0 {
            return;
        }

        preview
            .paragraph(self.theme)
            .scroll((self.scroll, 0))
            .render(text, buf);
    }
}
