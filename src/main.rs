// src/main.rs

use color_eyre::eyre::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{error, info};

mod app;
mod config;
mod core;
mod error;
mod logging;
mod ui;

use crate::app::{App, AppCommand, ScanEvent};
use crate::config::Config;
use crate::core::accounts::AccountStore;
use crate::core::scanner::AnalysisEngine;
use crate::core::scoring::{RandomSource, SeededEntropy};
use crate::core::storage::{AccountBackend, JsonFileBackend, MemoryBackend};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let config = Config::from_env()?;
    logging::initialize_logging(&config.data_dir)?;
    info!(data_dir = %config.data_dir.display(), ephemeral = config.ephemeral, "Starting LinkLens.");

    let backend: Box<dyn AccountBackend> = if config.ephemeral {
        Box::new(MemoryBackend::default())
    } else {
        Box::new(JsonFileBackend::new(&config.data_dir)?)
    };
    let store = AccountStore::open(backend)?;

    // --- Setup ---
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let mut app = App::new(config, store);
    let result = run(&mut terminal, &mut app).await;

    // --- Restore Terminal ---
    stdout().execute(LeaveAlternateScreen)?;
    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;

    if let Err(e) = &result {
        error!(error = %e, "LinkLens exited with an error.");
    }
    result
}

async fn run(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(AppCommand::StartScan(url)) = app.handle_key(key) {
                        spawn_scan(app, url, tx.clone());
                    }
                }
            }
        }

        while let Ok(scan_event) = rx.try_recv() {
            app.apply_scan_event(scan_event);
        }
    }
    Ok(())
}

/// Runs one analysis in the background, forwarding progress and the result.
fn spawn_scan(app: &App, url: String, tx: UnboundedSender<ScanEvent>) {
    let rng: Box<dyn RandomSource> = match app.config.seed {
        // Offset by the scan count so repeated scans in one session differ.
        Some(seed) => Box::new(SeededEntropy::from_seed(seed.wrapping_add(app.scans_started))),
        None => Box::new(SeededEntropy::from_entropy()),
    };
    let mut engine = AnalysisEngine::new(rng, app.config.stage_delay);

    tokio::spawn(async move {
        let progress_tx = tx.clone();
        let outcome = engine
            .analyze_with_progress(&url, |progress| {
                let _ = progress_tx.send(ScanEvent::Progress(progress));
            })
            .await;
        let event = match outcome {
            Ok(analysis) => ScanEvent::Completed(analysis),
            Err(e) => ScanEvent::Failed(e),
        };
        let _ = tx.send(event);
    });
}
