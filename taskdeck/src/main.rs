//! `TaskDeck` — terminal-native personal task manager.
//!
//! Launches the TUI and talks to the task service over HTTP.
//! Configuration via CLI flags, environment variables, or config file
//! (`~/.config/taskdeck/config.toml`).
//!
//! ```bash
//! # Start as a guest against the default local service
//! cargo run --bin taskdeck
//!
//! # Sign in as a known user
//! cargo run --bin taskdeck -- --user-id u-7 --display-name Ada \
//!     --server-url http://127.0.0.1:5000
//! ```

use std::io;
use std::path::Path;
use std::time::Instant;

use chrono::Local;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use taskdeck::api::ApiClient;
use taskdeck::app::App;
use taskdeck::config::{CliArgs, ClientConfig};
use taskdeck::net::{self, ApiCommand};
use taskdeck::ui;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > config file > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::default()
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&config.log_level, cli.log_file.as_deref());

    tracing::info!("taskdeck starting");

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = run_app(&mut terminal, &config).await;

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("taskdeck exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the
/// terminal). Returns a [`WorkerGuard`] that must be held until shutdown
/// to ensure all buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("taskdeck.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Main application loop.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &ClientConfig,
) -> io::Result<()> {
    let mut app = App::new(config.to_session(), config.theme);

    let client = ApiClient::new(config.server_url.clone());
    let (cmd_tx, mut evt_rx, _worker) = net::spawn_api_worker(client);

    // Kick off the first load for the configured owner.
    let initial = app.initial_load();
    dispatch(&mut app, &cmd_tx, initial);

    loop {
        let today = Local::now().date_naive();

        // Step 1: Draw the UI frame.
        terminal.draw(|frame| ui::draw(frame, &app, today))?;

        // Step 2: Drain all pending API events (non-blocking).
        while let Ok(event) = evt_rx.try_recv() {
            app.apply_event(event, Instant::now());
        }

        // Step 3: Expire any stale notice.
        app.ui.tick_notice(Instant::now());

        // Step 4: Poll for terminal input events.
        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if let Some(command) = app.handle_key(key, Instant::now(), today) {
                dispatch(&mut app, &cmd_tx, command);
            }
        }

        if app.should_quit {
            let _ = cmd_tx.try_send(ApiCommand::Shutdown);
            return Ok(());
        }
    }
}

/// Forward a command to the API worker, surfacing channel failures as
/// notices instead of crashing the UI.
fn dispatch(app: &mut App, tx: &mpsc::Sender<ApiCommand>, command: ApiCommand) {
    match tx.try_send(command) {
        Ok(()) => {}
        Err(mpsc::error::TrySendError::Full(_)) => {
            app.ui.push_notice("busy, try again", Instant::now());
        }
        Err(mpsc::error::TrySendError::Closed(_)) => {
            app.ui.push_notice("service connection lost", Instant::now());
        }
    }
}
