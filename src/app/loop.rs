use crate::app::{
    action::Action,
    input::map_event_to_action,
    reducer,
    state::AppState,
    trigger::{CrosstermEvents, KeyListener},
    ui,
};

use anyhow::Result;
use crossterm::event::Event;
use ratatui::{backend::Backend, Terminal};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

const TICK_RATE: Duration = Duration::from_millis(250);

pub async fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app_state: AppState<'_>) -> Result<()> {
    let (event_tx, event_rx) = mpsc::channel(100);
    let listener = KeyListener::install(CrosstermEvents, event_tx);

    let res = run_loop_with_events(terminal, app_state, event_rx).await;
    listener.uninstall().await;
    res
}

pub async fn run_loop_with_events<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app_state: AppState<'_>,
    mut event_rx: mpsc::Receiver<Result<Event, std::io::Error>>,
) -> Result<()> {
    let mut interval = interval(TICK_RATE);

    loop {
        // --- 1. Render ---
        terminal.draw(|f| {
            ui::draw(f, &mut app_state);
        })?;

        // --- 2. Event Handling ---
        let action = tokio::select! {
            _ = interval.tick() => Some(Action::Tick),

            res = event_rx.recv() => match res {
                Some(Ok(event)) => map_event_to_action(event, &app_state, terminal.size()?),
                Some(Err(e)) => return Err(e.into()),
                None => {
                    tracing::debug!("event source closed");
                    break;
                }
            },
        };

        // --- 3. Update (Reducer) ---
        if let Some(action) = action {
            if action != Action::Tick {
                tracing::trace!(?action, "dispatch");
            }
            reducer::update(&mut app_state, action);
            if app_state.should_quit {
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "loop_tests.rs"]
mod tests;
