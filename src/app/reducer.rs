use super::{action::Action, state::AppState};
use crate::components::preview::Preview;

pub fn update(state: &mut AppState, action: Action) {
    match action {
        // --- Overlay ---
        Action::ToggleOverlay => {
            state.selection.toggle_overlay(&state.index);
            if !state.selection.is_open() {
                state.query_input.reset();
            }
        }
        Action::CloseOverlay => {
            state.selection.close();
            state.query_input.reset();
        }

        // --- Query ---
        Action::QueryInput(key) => {
            if state.selection.is_open() && state.query_input.input(key) {
                let text = state.query_input.text();
                state.selection.type_query(&text, &state.index);
            }
        }
        Action::ClearQuery => {
            state.query_input.reset();
            state.selection.type_query("", &state.index);
        }

        // --- Selection ---
        Action::Select(id) => {
            state.selection.select(id);
        }
        Action::HighlightNext => {
            state.selection.highlight_next();
        }
        Action::HighlightPrev => {
            state.selection.highlight_prev();
        }
        Action::SelectHighlighted => {
            state.selection.select_highlighted();
        }
        Action::ScrollPreviewDown(amount) => {
            let max_scroll = Preview::resolve(&state.catalog, state.selection.selected_id())
                .map_or(0, |p| p.max_scroll(&state.theme, state.preview_area));
            state.selection.scroll_preview_down(amount, max_scroll);
        }
        Action::ScrollPreviewUp(amount) => {
            state.selection.scroll_preview_up(amount);
        }

        // --- System ---
        Action::Quit => {
            state.should_quit = true;
        }
        Action::Tick | Action::Resize(..) => {}
    }
}
