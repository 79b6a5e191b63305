//! Booking club terminal client
//!
//! Run: `cargo run -p booking-tui` (set `BOOKING_API_URL` to point at the
//! backend, defaults to the local development server).

mod app;
mod config;
mod notify;
mod runtime;
mod ui;
mod views;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use booking_client::{BookingClient, ClientConfig};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::config::AppConfig;
use crate::runtime::{AppMsg, Dispatcher};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config_path = AppConfig::default_path();
    let config = AppConfig::load(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    // Logs go to a file; stdout belongs to the terminal UI.
    let _log_guard = init_logger(&config);
    tracing::info!(config = ?config_path, "starting booking client");

    // First run: persist the defaults so the file is there to edit.
    if !config_path.exists() {
        if let Err(e) = config.save(&config_path) {
            tracing::warn!(error = %e, "could not write default config");
        }
    }

    let client_config = match config.api_url.as_deref() {
        // env override is handled by ClientConfig::default
        Some(url) if std::env::var(booking_client::config::API_URL_ENV).is_err() => {
            ClientConfig::new(url)
        }
        _ => ClientConfig::default(),
    };
    tracing::info!(base_url = %client_config.base_url, "backend");
    let client = BookingClient::new(&client_config).context("building HTTP client")?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let dispatcher = Dispatcher::new(Arc::new(client), tx);
    let mut app = App::new(dispatcher, config.confirm_cancel);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, &mut rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn init_logger(config: &AppConfig) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_dir.as_deref() {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "booking-tui");
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Some(guard)
        }
        // no log dir configured: discard, the alternate screen would eat it
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(io::sink)
                .init();
            None
        }
    }
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    rx: &mut mpsc::UnboundedReceiver<AppMsg>,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if app.should_quit {
            return Ok(());
        }

        // Apply every settled backend response before the next frame.
        while let Ok(msg) = rx.try_recv() {
            app.handle_msg(msg);
        }
        app.tick();

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }
    }
}
