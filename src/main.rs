use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;

use jump::app::{config::Config, logging, r#loop::run_loop, state::AppState};
use jump::domain::catalog::Catalog;
use jump::infrastructure::data;
use jump::search::SearchIndex;

fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_panic_hook();

    // Everything that can fail on bad input happens before raw mode.
    let config = Config::load()?;
    logging::init(&config.log.level, config.log_file().as_deref())?;
    let trigger = config.trigger()?;

    let raw = data::load(
        config.catalog.blocks.as_deref(),
        config.catalog.patterns.as_deref(),
    )?;
    let catalog = Catalog::load(&raw.blocks, &raw.patterns);
    let index = SearchIndex::build_with(catalog.entries(), (&config.search).into())
        .context("failed to build search index")?;
    tracing::info!(entries = catalog.len(), "catalog ready");

    let app_state = AppState::new(Arc::new(catalog), Arc::new(index), trigger, config.theme);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, app_state).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "session ended with an error");
        eprintln!("{err:?}");
    }

    Ok(())
}
