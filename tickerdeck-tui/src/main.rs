//! TickerDeck TUI — five-panel stock dashboard.
//!
//! Panels:
//! 1. Quote — ticker entry, time range, price metric, close chart
//! 2. News — headlines with per-headline sentiment and the aggregate band
//! 3. Trading — paper-trading ledger, trade history, P/L verdicts
//! 4. Compare — overlaid close curves for a symbol multi-select
//! 5. Help — keyboard reference
//!
//! The active ticker's chart auto-refreshes every 5 seconds; all network
//! calls run on the worker thread.

mod app;
mod input;
mod theme;
mod ui;
mod worker;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use tickerdeck_core::auth;
use tickerdeck_core::config::Config;

use crate::app::{AppState, Overlay};
use crate::worker::{WorkerCommand, WorkerResponse};

/// Chart auto-refresh cadence.
const REFRESH_INTERVAL: Duration = Duration::from_secs(5);

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let config_path = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tickerdeck")
        .join("config.toml");
    let config = Config::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    let authenticator = auth::from_config(&config);

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle = worker::spawn_worker(cmd_rx, resp_tx);

    let mut app = AppState::new(config, authenticator, cmd_tx.clone(), resp_rx);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Shutdown worker
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            handle_worker_response(app, resp);
        }

        // 3. Auto-refresh the active ticker's chart
        if app.overlay != Overlay::Login
            && app.quote.ticker.is_some()
            && !app.quote.fetch_in_progress
            && last_refresh.elapsed() >= REFRESH_INTERVAL
        {
            input::request_refresh(app);
            last_refresh = Instant::now();
        }

        // 4. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 5. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

fn handle_worker_response(app: &mut AppState, resp: WorkerResponse) {
    match resp {
        WorkerResponse::QuoteReady {
            symbol,
            range,
            series,
            resolved_from,
        } => {
            app.quote.fetch_in_progress = false;

            // A range change mid-flight makes this response stale.
            if range != app.quote.range {
                return;
            }

            app.set_ticker(symbol.clone(), resolved_from);
            if series.is_empty() {
                app.set_warning("No data available for this time range or stock.");
            }
            app.quote.series = Some(series);
            app.quote.last_updated = Some(chrono::Local::now().naive_local());

            // First sight of a ticker: pull its news once.
            if app.news.headlines.is_none() && !app.news.fetch_in_progress {
                app.news.fetch_in_progress = true;
                let _ = app.worker_tx.send(WorkerCommand::FetchNews {
                    symbol,
                    api_key: app.config.news_api_key(),
                });
            }
        }
        WorkerResponse::QuoteFailed { symbol, error } => {
            app.quote.fetch_in_progress = false;
            app.push_error(format!("Error loading chart: {error}"), symbol);
        }
        WorkerResponse::NewsReady {
            symbol,
            headlines,
            sentiment,
        } => {
            app.news.fetch_in_progress = false;
            // Ignore news for a ticker the user has already left.
            if app.quote.ticker.as_deref() == Some(symbol.as_str()) {
                if headlines.is_empty() {
                    app.set_warning(format!("No news found for {symbol}"));
                }
                app.news.headlines = Some(headlines);
                app.news.sentiment = Some(sentiment);
            }
        }
        WorkerResponse::NewsFailed { symbol, error } => {
            app.news.fetch_in_progress = false;
            app.push_error(format!("News unavailable: {error}"), symbol);
        }
        WorkerResponse::ComparisonSeries { symbol, series } => {
            if series.is_empty() {
                app.set_warning(format!("No data for {symbol}"));
            }
            app.compare.series.insert(symbol, series);
        }
        WorkerResponse::ComparisonFailed { symbol, error } => {
            // Isolated to this symbol; the loop keeps going.
            app.push_error(format!("Failed to load {symbol}: {error}"), symbol);
        }
        WorkerResponse::ComparisonSentiment { symbol, score } => {
            app.compare.sentiment.insert(symbol, score);
        }
        WorkerResponse::ComparisonDone => {
            app.compare.fetch_in_progress = false;
            app.set_status("Comparison updated");
        }
    }
}
