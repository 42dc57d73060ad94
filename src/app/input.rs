use crate::app::{action::Action, state::AppState};
use crate::components::overlay::overlay_layout;
use crate::components::result_list::row_at;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::layout::{Rect, Size};

const PREVIEW_PAGE: u16 = 10;
const WHEEL_STEP: u16 = 3;

pub fn map_event_to_action(
    event: Event,
    app_state: &AppState<'_>,
    terminal_size: Size,
) -> Option<Action> {
    match event {
        Event::Key(key) => map_key(key, app_state),
        Event::Mouse(mouse) => {
            if !app_state.selection.is_open() {
                return None;
            }
            let area = Rect::new(0, 0, terminal_size.width, terminal_size.height);
            let layout = overlay_layout(area, app_state.phase())?;
            let pos = ratatui::layout::Position::new(mouse.column, mouse.row);
            let over_results = layout.results.filter(|r| r.contains(pos));
            let over_preview = layout.preview.filter(|r| r.contains(pos));

            match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    let results = app_state.selection.results();
                    let idx = row_at(
                        over_results?,
                        app_state.selection.results_scroll(),
                        results.len(),
                        mouse.column,
                        mouse.row,
                    )?;
                    Some(Action::Select(results[idx].id.clone()))
                }
                MouseEventKind::ScrollUp if over_preview.is_some() => {
                    Some(Action::ScrollPreviewUp(WHEEL_STEP))
                }
                MouseEventKind::ScrollDown if over_preview.is_some() => {
                    Some(Action::ScrollPreviewDown(WHEEL_STEP))
                }
                MouseEventKind::ScrollUp if over_results.is_some() => Some(Action::HighlightPrev),
                MouseEventKind::ScrollDown if over_results.is_some() => Some(Action::HighlightNext),
                _ => None,
            }
        }
        Event::Resize(w, h) => Some(Action::Resize(w, h)),
        _ => None,
    }
}

fn map_key(key: KeyEvent, app_state: &AppState<'_>) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let open = app_state.selection.is_open();
    if let Some(action) = app_state.trigger.resolve(&key, open) {
        return Some(action);
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if !open {
        return match key.code {
            KeyCode::Char('q') if key.modifiers.is_empty() => Some(Action::Quit),
            KeyCode::Char('c') if ctrl => Some(Action::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Up => Some(Action::HighlightPrev),
        KeyCode::Down => Some(Action::HighlightNext),
        KeyCode::Char('p') if ctrl => Some(Action::HighlightPrev),
        KeyCode::Char('n') if ctrl => Some(Action::HighlightNext),
        KeyCode::Char('u') if ctrl => Some(Action::ClearQuery),
        KeyCode::Enter => Some(Action::SelectHighlighted),
        KeyCode::PageUp => Some(Action::ScrollPreviewUp(PREVIEW_PAGE)),
        KeyCode::PageDown => Some(Action::ScrollPreviewDown(PREVIEW_PAGE)),
        _ => Some(Action::QueryInput(key)),
    }
}
