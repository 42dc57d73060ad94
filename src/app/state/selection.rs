use crate::domain::catalog::Catalog;
use crate::domain::models::{Entry, EntryId};
use crate::search::{SearchIndex, SearchResult};
use ratatui::widgets::ListState;

/// Where the overlay is. A closed overlay never carries a query or results.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Closed,
    OpenEmpty,
    OpenResults,
    OpenNoResults,
}

impl Phase {
    pub fn is_open(self) -> bool {
        self != Phase::Closed
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionState {
    phase: Phase,
    query: String,
    selected_id: Option<EntryId>,
    results: Vec<SearchResult>,
    results_list: ListState,
    preview_scroll: u16,
}

impl SelectionState {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase.is_open()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected_id(&self) -> Option<&EntryId> {
        self.selected_id.as_ref()
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.results_list.selected()
    }

    pub fn results_scroll(&self) -> usize {
        self.results_list.offset()
    }

    pub fn results_list_mut(&mut self) -> &mut ListState {
        &mut self.results_list
    }

    pub fn preview_scroll(&self) -> u16 {
        self.preview_scroll
    }

    pub fn toggle_overlay(&mut self, index: &SearchIndex) {
        if self.is_open() {
            self.close();
        } else {
            self.phase = Phase::OpenEmpty;
            // The query is always empty while closed; re-derive from it anyway.
            self.refresh(index);
            tracing::debug!("overlay opened");
        }
    }

    pub fn type_query(&mut self, text: &str, index: &SearchIndex) {
        if !self.is_open() {
            tracing::debug!("ignoring query input while closed");
            return;
        }
        if self.query == text {
            return;
        }
        self.query = text.to_string();
        self.refresh(index);
    }

    /// Forces the overlay closed and drops the query. The selection survives
    /// so the same entry is previewed again after re-opening.
    pub fn close(&mut self) {
        if self.phase != Phase::Closed {
            tracing::debug!("overlay closed");
        }
        self.phase = Phase::Closed;
        self.query.clear();
        self.results.clear();
        self.results_list = ListState::default();
    }

    pub fn select(&mut self, id: EntryId) {
        if !self.is_open() {
            tracing::debug!(%id, "ignoring selection while closed");
            return;
        }
        if self.selected_id.as_ref() != Some(&id) {
            self.preview_scroll = 0;
        }
        self.selected_id = Some(id);
    }

    pub fn selected_entry<'c>(&self, catalog: &'c Catalog) -> Option<&'c Entry> {
        self.selected_id.as_ref().and_then(|id| catalog.get(id))
    }

    pub fn highlight_next(&mut self) {
        if self.results.is_empty() {
            return;
        }
        let next = match self.results_list.selected() {
            Some(i) if i + 1 < self.results.len() => i + 1,
            _ => 0,
        };
        self.highlight(next);
    }

    pub fn highlight_prev(&mut self) {
        if self.results.is_empty() {
            return;
        }
        let prev = match self.results_list.selected() {
            Some(0) | None => self.results.len() - 1,
            Some(i) => i - 1,
        };
        self.highlight(prev);
    }

    pub fn select_highlighted(&mut self) {
        if let Some(result) = self
            .results_list
            .selected()
            .and_then(|i| self.results.get(i))
        {
            self.select(result.id.clone());
        }
    }

    pub fn scroll_preview_down(&mut self, amount: u16, max: u16) {
        self.preview_scroll = self.preview_scroll.saturating_add(amount).min(max);
    }

    /// Pulls the preview back after the pane grew or the text reflowed.
    pub fn clamp_preview_scroll(&mut self, max: u16) {
        self.preview_scroll = self.preview_scroll.min(max);
    }

    pub fn scroll_preview_up(&mut self, amount: u16) {
        self.preview_scroll = self.preview_scroll.saturating_sub(amount);
    }

    fn highlight(&mut self, i: usize) {
        self.results_list.select(Some(i));
        self.select_highlighted();
    }

    fn refresh(&mut self, index: &SearchIndex) {
        self.results = index.query(&self.query);
        // New search, fresh view.
        self.results_list = ListState::default();
        self.phase = if self.query.trim().is_empty() {
            Phase::OpenEmpty
        } else if self.results.is_empty() {
            Phase::OpenNoResults
        } else {
            Phase::OpenResults
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::RawEntry;

    fn fixture() -> (Catalog, SearchIndex) {
        let raw = |id: &str, title: &str| RawEntry {
            id: Some(id.to_string()),
            title: Some(title.to_string()),
            ..Default::default()
        };
        let catalog = Catalog::load(
            &[raw("1", "Button"), raw("2", "Buttons"), raw("3", "Cover")],
            &[],
        );
        let index = SearchIndex::build(catalog.entries()).unwrap();
        (catalog, index)
    }

    #[test]
    fn test_initial_state() {
        let state = SelectionState::default();
        assert_eq!(state.phase(), Phase::Closed);
        assert_eq!(state.query(), "");
        assert!(state.selected_id().is_none());
        assert!(state.results().is_empty());
    }

    #[test]
    fn test_toggle_round_trip() {
        let (_, index) = fixture();
        let mut state = SelectionState::default();

        state.toggle_overlay(&index);
        assert_eq!(state.phase(), Phase::OpenEmpty);

        state.toggle_overlay(&index);
        assert_eq!(state.phase(), Phase::Closed);
    }

    #[test]
    fn test_type_query_moves_between_open_phases() {
        let (_, index) = fixture();
        let mut state = SelectionState::default();
        state.toggle_overlay(&index);

        state.type_query("button", &index);
        assert_eq!(state.phase(), Phase::OpenResults);
        assert_eq!(state.results().len(), 2);

        state.type_query("qqqqqqqq", &index);
        assert_eq!(state.phase(), Phase::OpenNoResults);
        assert!(state.results().is_empty());

        state.type_query("  ", &index);
        assert_eq!(state.phase(), Phase::OpenEmpty);
        assert_eq!(state.query(), "  ");
    }

    #[test]
    fn test_type_query_ignored_while_closed() {
        let (_, index) = fixture();
        let mut state = SelectionState::default();
        state.type_query("button", &index);
        assert_eq!(state.phase(), Phase::Closed);
        assert_eq!(state.query(), "");
    }

    #[test]
    fn test_selection_persists_across_queries() {
        let (_, index) = fixture();
        let mut state = SelectionState::default();
        state.toggle_overlay(&index);
        state.select(EntryId::from("2"));
        state.type_query("anything", &index);
        assert_eq!(state.selected_id(), Some(&EntryId::from("2")));
    }

    #[test]
    fn test_close_clears_query_but_keeps_selection() {
        let (_, index) = fixture();
        let mut state = SelectionState::default();
        state.toggle_overlay(&index);
        state.type_query("cover", &index);
        state.select(EntryId::from("3"));

        state.close();
        assert_eq!(state.phase(), Phase::Closed);
        assert_eq!(state.query(), "");
        assert!(state.results().is_empty());
        assert_eq!(state.selected_id(), Some(&EntryId::from("3")));

        state.toggle_overlay(&index);
        assert_eq!(state.phase(), Phase::OpenEmpty);
        assert_eq!(state.selected_id(), Some(&EntryId::from("3")));
    }

    #[test]
    fn test_toggle_closed_clears_query() {
        let (_, index) = fixture();
        let mut state = SelectionState::default();
        state.toggle_overlay(&index);
        state.type_query("button", &index);
        state.toggle_overlay(&index);
        assert_eq!(state.query(), "");
        state.toggle_overlay(&index);
        assert_eq!(state.phase(), Phase::OpenEmpty);
    }

    #[test]
    fn test_unknown_selection_resolves_to_nothing() {
        let (catalog, index) = fixture();
        let mut state = SelectionState::default();
        state.toggle_overlay(&index);
        state.select(EntryId::from("nope"));
        assert_eq!(state.selected_id(), Some(&EntryId::from("nope")));
        assert!(state.selected_entry(&catalog).is_none());

        state.select(EntryId::from("1"));
        assert_eq!(
            state.selected_entry(&catalog).map(Entry::display_title),
            Some("Button")
        );
    }

    #[test]
    fn test_highlight_wraps_and_selects() {
        let (_, index) = fixture();
        let mut state = SelectionState::default();
        state.toggle_overlay(&index);
        state.type_query("button", &index);
        assert_eq!(state.highlighted(), None);

        state.highlight_next();
        assert_eq!(state.highlighted(), Some(0));
        assert_eq!(state.selected_id(), Some(&EntryId::from("1")));

        state.highlight_next();
        state.highlight_next();
        assert_eq!(state.highlighted(), Some(0));

        state.highlight_prev();
        assert_eq!(state.highlighted(), Some(1));
        assert_eq!(state.selected_id(), Some(&EntryId::from("2")));
    }

    #[test]
    fn test_scroll_resets() {
        let (_, index) = fixture();
        let mut state = SelectionState::default();
        state.toggle_overlay(&index);
        state.type_query("button", &index);
        state.highlight_next();
        *state.results_list_mut().offset_mut() = 1;

        state.type_query("butto", &index);
        assert_eq!(state.results_scroll(), 0);
        assert_eq!(state.highlighted(), None);

        state.select(EntryId::from("1"));
        state.scroll_preview_down(5, 10);
        assert_eq!(state.preview_scroll(), 5);
        state.select(EntryId::from("1"));
        assert_eq!(state.preview_scroll(), 5);
        state.clamp_preview_scroll(2);
        assert_eq!(state.preview_scroll(), 2);
        state.select(EntryId::from("3"));
        assert_eq!(state.preview_scroll(), 0);
    }
}
