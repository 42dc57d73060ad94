use crate::app::state::AppState;
use crate::components::backdrop::Backdrop;
use crate::components::helpers::dim_area;
use crate::components::overlay::{overlay_layout, OverlayFrame};
use crate::components::preview::{Preview, PreviewPane};
use crate::components::result_list::ResultList;
use crate::domain::models::EntryKind;

use ratatui::Frame;
use std::sync::Arc;

pub fn draw(f: &mut Frame, app_state: &mut AppState) {
    let area = f.area();
    if area.width == 0 || area.height == 0 {
        return;
    }

    let theme = app_state.theme.clone();
    let patterns = app_state
        .catalog
        .entries()
        .iter()
        .filter(|e| matches!(e.kind, EntryKind::Pattern { .. }))
        .count();

    // --- Backdrop ---
    f.render_widget(
        Backdrop {
            theme: &theme,
            binding: app_state.trigger.toggle,
            blocks: app_state.catalog.len() - patterns,
            patterns,
        },
        area,
    );

    let layout = overlay_layout(area, app_state.phase());
    app_state.preview_area = layout.and_then(|l| l.preview).unwrap_or_default();
    let Some(layout) = layout else {
        return;
    };
    dim_area(f.buffer_mut(), area);

    // --- Card ---
    f.render_widget(
        OverlayFrame {
            theme: &theme,
            layout: &layout,
        },
        area,
    );

    // --- Query ---
    app_state
        .query_input
        .set_style(theme.query_text, theme.query_placeholder);
    f.render_widget(&app_state.query_input, layout.input);

    // --- Results ---
    if let Some(results_area) = layout.results {
        let mut list_state = app_state.selection.results_list_mut().clone();
        f.render_stateful_widget(
            ResultList {
                theme: &theme,
                catalog: &app_state.catalog,
                results: app_state.selection.results(),
                selected_id: app_state.selection.selected_id(),
            },
            results_area,
            &mut list_state,
        );
        *app_state.selection.results_list_mut() = list_state;
    }

    // --- Preview ---
    if let Some(preview_area) = layout.preview {
        let catalog = Arc::clone(&app_state.catalog);
        let preview = Preview::resolve(&catalog, app_state.selection.selected_id());
        let max_scroll = preview
            .as_ref()
            .map_or(0, |p| p.max_scroll(&theme, preview_area));
        app_state.selection.clamp_preview_scroll(max_scroll);

        f.render_widget(
            PreviewPane {
                theme: &theme,
                preview,
                scroll: app_state.selection.preview_scroll(),
            },
            preview_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::action::Action;
    use crate::app::reducer::update;
    use crate::domain::catalog::Catalog;
    use crate::domain::models::{EntryId, RawEntry};
    use crate::infrastructure::data;
    use crate::search::SearchIndex;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn hero_state() -> AppState<'static> {
        let catalog = Catalog::load(
            &[RawEntry {
                id: Some("a".to_string()),
                title: Some("Hero Banner".to_string()),
                ..Default::default()
            }],
            &[RawEntry {
                id: Some("b".to_string()),
                title: Some("Hero Pattern".to_string()),
                description: Some("Big header".to_string()),
                content: Some("<p>x</p>".to_string()),
                ..Default::default()
            }],
        );
        let index = SearchIndex::build(catalog.entries()).unwrap();
        AppState::new(
            Arc::new(catalog),
            Arc::new(index),
            Default::default(),
            Default::default(),
        )
    }

    fn screen(state: &mut AppState) -> String {
        screen_sized(state, 100, 30)
    }

    fn screen_sized(state: &mut AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_closed_shows_backdrop_only() {
        let mut state = hero_state();
        let text = screen(&mut state);
        assert!(text.contains("Press CTRL + J"));
        assert!(text.contains("1 blocks · 1 patterns"));
        assert!(!text.contains("SEARCH"));
    }

    #[test]
    fn test_open_with_results_and_preview() {
        let mut state = hero_state();
        update(&mut state, Action::ToggleOverlay);
        for c in "Hero".chars() {
            update(
                &mut state,
                Action::QueryInput(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)),
            );
        }
        update(&mut state, Action::Select(EntryId::from("b")));

        let text = screen(&mut state);
        assert!(text.contains("SEARCH"));
        assert!(text.contains("Hero Banner"));
        assert!(text.contains("Hero Pattern"));
        assert!(text.contains("Big header"));
        assert!(text.contains("<p>x</p>"));
    }

    #[test]
    fn test_long_pattern_scrolls_to_its_end_when_narrow() {
        let raw = data::load(None, None).unwrap();
        let catalog = Catalog::load(&raw.blocks, &raw.patterns);
        let index = SearchIndex::build(catalog.entries()).unwrap();
        let patterns: Vec<_> = catalog
            .entries()
            .iter()
            .filter_map(|e| {
                let content = e.content()?.to_string();
                Some((e.id.clone(), e.display_title().to_string(), content))
            })
            .collect();
        assert!(!patterns.is_empty());
        let catalog = Arc::new(catalog);
        let index = Arc::new(index);

        for (id, title, content) in patterns {
            let mut state = AppState::new(
                Arc::clone(&catalog),
                Arc::clone(&index),
                Default::default(),
                Default::default(),
            );
            update(&mut state, Action::ToggleOverlay);
            for c in title.chars() {
                update(
                    &mut state,
                    Action::QueryInput(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)),
                );
            }
            update(&mut state, Action::Select(id));

            // The first frame records the pane size the scroll limit is measured against.
            screen_sized(&mut state, 60, 20);
            update(&mut state, Action::ScrollPreviewDown(u16::MAX));
            let text = screen_sized(&mut state, 60, 20);

            // The closing comment, e.g. "/wp:columns" out of "<!-- /wp:columns -->".
            let closer = content.split_whitespace().rev().nth(1).unwrap();
            assert!(text.contains(closer), "{title}: {closer:?} never scrolled into view");
        }
    }

    #[test]
    fn test_scroll_is_pulled_back_when_pane_grows() {
        let mut state = hero_state();
        update(&mut state, Action::ToggleOverlay);
        for c in "Hero".chars() {
            update(
                &mut state,
                Action::QueryInput(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)),
            );
        }
        update(&mut state, Action::Select(EntryId::from("b")));
        screen_sized(&mut state, 40, 8);
        update(&mut state, Action::ScrollPreviewDown(u16::MAX));
        assert!(state.selection.preview_scroll() > 0);

        // Everything fits at full size, so the next frame resets the scroll.
        let text = screen_sized(&mut state, 100, 30);
        assert_eq!(state.selection.preview_scroll(), 0);
        assert!(text.contains("Pattern"));
    }

    #[test]
    fn test_open_with_no_results() {
        let mut state = hero_state();
        update(&mut state, Action::ToggleOverlay);
        for c in "qqqqqqqq".chars() {
            update(
                &mut state,
                Action::QueryInput(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)),
            );
        }
        let text = screen(&mut state);
        assert!(text.contains("No results found."));
    }
}
