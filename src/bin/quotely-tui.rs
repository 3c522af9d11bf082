//! Quotely TUI Application
//!
//! A terminal user interface for browsing random quotes and favorites.

use crossterm::event;
use log::warn;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::Stdout;
use std::time::Duration;

use quotely::tui::{handle_event, process_state, render, restore_terminal, setup_terminal, AppState};
use quotely::{logger, Config, QuoteClient, Store};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, config_err) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let log_rx = logger::init(config.log_level_filter());
    if let Some(e) = config_err {
        warn!("{e}; using default configuration");
    }

    let store = open_store(&config);
    let client = QuoteClient::with_timeout(&config.api_base_url, config.request_timeout())?;
    log::debug!("using API at {}", client.base_url());

    let mut terminal = setup_terminal()?;
    let mut state = AppState::new(store, client).with_log_receiver(log_rx);

    let result = run(&mut terminal, &mut state);

    restore_terminal(&mut terminal)?;
    result
}

/// Falls back to a store that lives only for this session.
fn open_store(config: &Config) -> Store {
    match config.resolve_store_path().and_then(Store::open) {
        Ok(store) => store,
        Err(e) => {
            warn!("{e}; changes will not be saved");
            Store::in_memory()
        }
    }
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut AppState<QuoteClient>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| render(f, state))?;

        process_state(state);

        if state.should_quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;
            handle_event(event, state);
        }
    }
}
