use crate::domain::models::EntryId;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // --- System / Terminal ---
    Tick,
    Resize(u16, u16),
    Quit,

    // --- Overlay ---
    ToggleOverlay, // Trigger combination (Ctrl+J by default)
    CloseOverlay,  // Esc while open, never toggles

    // --- Query ---
    QueryInput(crossterm::event::KeyEvent), // Forwarded to the query text area
    ClearQuery,

    // --- Selection ---
    Select(EntryId), // Click on a result row
    HighlightNext,
    HighlightPrev,
    SelectHighlighted,
    ScrollPreviewUp(u16),
    ScrollPreviewDown(u16),
}
