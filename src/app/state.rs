use super::trigger::TriggerBinding;
use crate::domain::catalog::Catalog;
use crate::search::SearchIndex;
use crate::theme::{PaletteType, Theme};
use ratatui::layout::Rect;
use std::sync::Arc;

pub mod input;
pub mod selection;

// Re-exports
pub use input::QueryInput;
pub use selection::{Phase, SelectionState};

#[derive(Debug, Clone, PartialEq)]
pub struct AppState<'a> {
    pub should_quit: bool,

    // --- Catalog (immutable for the session) ---
    pub catalog: Arc<Catalog>,
    pub index: Arc<SearchIndex>,

    // --- Overlay ---
    pub selection: SelectionState,
    pub query_input: QueryInput<'a>,

    // --- Config ---
    pub trigger: TriggerBinding,
    pub palette_type: PaletteType,
    pub theme: Theme,

    // --- Layout (as of the last frame) ---
    pub preview_area: Rect,
}

impl AppState<'_> {
    #[must_use]
    pub fn new(
        catalog: Arc<Catalog>,
        index: Arc<SearchIndex>,
        trigger: TriggerBinding,
        palette_type: PaletteType,
    ) -> Self {
        Self {
            catalog,
            index,
            trigger,
            palette_type,
            theme: Theme::from_palette_type(palette_type),
            ..Default::default()
        }
    }

    pub fn phase(&self) -> Phase {
        self.selection.phase()
    }
}

impl Default for AppState<'_> {
    fn default() -> Self {
        Self {
            should_quit: false,
            catalog: Arc::new(Catalog::default()),
            index: Arc::new(SearchIndex::default()),
            selection: SelectionState::default(),
            query_input: QueryInput::default(),
            trigger: TriggerBinding::default(),
            palette_type: PaletteType::CatppuccinMocha,
            theme: Theme::default(),
            preview_area: Rect::default(),
        }
    }
}
