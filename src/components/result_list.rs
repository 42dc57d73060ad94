use crate::domain::catalog::Catalog;
use crate::domain::models::{EntryId, PLACEHOLDER_TITLE};
use crate::search::SearchResult;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{HighlightSpacing, List, ListItem, ListState, StatefulWidget},
};

pub struct ResultList<'a> {
    pub theme: &'a Theme,
    pub catalog: &'a Catalog,
    pub results: &'a [SearchResult],
    pub selected_id: Option<&'a EntryId>,
}

impl StatefulWidget for ResultList<'_> {
    type State = ListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut ListState) {
        let items: Vec<ListItem> = self
            .results
            .iter()
            .map(|result| {
                let title = self
                    .catalog
                    .get(&result.id)
                    .map_or(PLACEHOLDER_TITLE, |e| e.display_title());
                let is_selected = self.selected_id == Some(&result.id);
                let style = if is_selected {
                    self.theme.list_selected
                } else {
                    self.theme.list_item
                };

                ListItem::new(Line::from(vec![
                    Span::styled(format!(" {:<2} ", initials(title)), self.theme.avatar),
                    Span::styled(format!(" {title}"), style),
                ]))
                .style(style)
            })
            .collect();

        let list = List::new(items)
            .highlight_symbol("> ")
            .highlight_spacing(HighlightSpacing::Always)
            .highlight_style(self.theme.list_marker);

        StatefulWidget::render(list, area, buf, state);
    }
}

/// Maps a terminal row inside the list area to a result index.
pub fn row_at(area: Rect, offset: usize, len: usize, column: u16, row: u16) -> Option<usize> {
    if column < area.left() || column >= area.right() || row < area.top() || row >= area.bottom() {
        return None;
    }
    let idx = offset + usize::from(row - area.y);
    (idx < len).then_some(idx)
}

/// Up to two uppercase initials for the avatar column.
pub fn initials(title: &str) -> String {
    let letters: String = title
        .split_whitespace()
        .filter_map(|w| w.chars().find(|c| c.is_alphanumeric()))
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    if letters.is_empty() {
        "?".to_string()
    } else {
        letters
    }
}
