//! Keyboard input dispatch — overlays → global keys → panel handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use chrono::Utc;

use crate::app::{AppState, Overlay, Panel};
use crate::worker::WorkerCommand;

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::Login => {
            handle_login_overlay(app, key);
            return;
        }
        Overlay::TickerEntry => {
            handle_ticker_overlay(app, key);
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('1') => { app.active_panel = Panel::Quote; return; }
        KeyCode::Char('2') => { app.active_panel = Panel::News; return; }
        KeyCode::Char('3') => { app.active_panel = Panel::Trading; return; }
        KeyCode::Char('4') => { app.active_panel = Panel::Compare; return; }
        KeyCode::Char('5') => { app.active_panel = Panel::Help; return; }
        KeyCode::Tab => {
            app.active_panel = app.active_panel.next();
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        KeyCode::Char('/') => {
            app.ticker_input.clear();
            app.overlay = Overlay::TickerEntry;
            return;
        }
        KeyCode::Char('!') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
            return;
        }
        _ => {}
    }

    // 3. Panel-specific keys.
    match app.active_panel {
        Panel::Quote => handle_quote_key(app, key),
        Panel::News => handle_news_key(app, key),
        Panel::Trading => handle_trading_key(app, key),
        Panel::Compare => handle_compare_key(app, key),
        Panel::Help => {}
    }
}

fn handle_login_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            // No way past the login screen except credentials or quitting.
            app.running = false;
        }
        KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
            app.login.focus_password = !app.login.focus_password;
        }
        KeyCode::Enter => {
            if app.auth.verify(&app.login.username, &app.login.password) {
                app.overlay = Overlay::None;
                app.set_status(format!("Logged in as {}", app.login.username));
            } else {
                app.login.password.clear();
                app.set_warning("Invalid credentials");
            }
        }
        KeyCode::Backspace => {
            if app.login.focus_password {
                app.login.password.pop();
            } else {
                app.login.username.pop();
            }
        }
        KeyCode::Char(c) => {
            if app.login.focus_password {
                app.login.password.push(c);
            } else {
                app.login.username.push(c);
            }
        }
        _ => {}
    }
}

fn handle_ticker_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.ticker_input.clear();
            app.overlay = Overlay::None;
        }
        KeyCode::Enter => {
            let input = app.ticker_input.trim().to_string();
            if !input.is_empty() {
                app.quote.fetch_in_progress = true;
                app.set_status(format!("Looking up {input}..."));
                let _ = app.worker_tx.send(WorkerCommand::ResolveAndFetch {
                    input,
                    range: app.quote.range,
                    aliases: app.config.alias_map(),
                });
            }
            app.ticker_input.clear();
            app.overlay = Overlay::None;
        }
        KeyCode::Backspace => {
            app.ticker_input.pop();
        }
        KeyCode::Char(c) => {
            app.ticker_input.push(c);
        }
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('!') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_quote_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => {
            app.quote.range = app.quote.range.prev();
            request_refresh(app);
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.quote.range = app.quote.range.next();
            request_refresh(app);
        }
        KeyCode::Char('r') => {
            request_refresh(app);
        }
        _ => {}
    }
}

fn handle_news_key(app: &mut AppState, key: KeyEvent) {
    if key.code == KeyCode::Char('r') {
        request_news(app);
    }
}

fn handle_trading_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c @ '0'..='9') => {
            let digit = u32::from(c as u8 - b'0');
            let grown = app.trading.quantity.saturating_mul(10).saturating_add(digit);
            // Keep the entry within a sane order size.
            app.trading.quantity = grown.min(1_000_000);
        }
        KeyCode::Backspace => {
            app.trading.quantity /= 10;
        }
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => {
            app.trading.quantity = app.trading.quantity.saturating_add(1).min(1_000_000);
        }
        KeyCode::Char('-') | KeyCode::Down => {
            app.trading.quantity = app.trading.quantity.saturating_sub(1);
        }
        KeyCode::Char('b') => execute_trade(app, TradeAction::Buy),
        KeyCode::Char('s') => execute_trade(app, TradeAction::Sell),
        KeyCode::Char('e') => {
            app.trading.show_evaluation = !app.trading.show_evaluation;
        }
        _ => {}
    }
}

enum TradeAction {
    Buy,
    Sell,
}

fn execute_trade(app: &mut AppState, action: TradeAction) {
    let Some(price) = app.current_price() else {
        app.set_warning("No quote available — set a ticker first");
        return;
    };
    let qty = app.trading.quantity;
    let sigil = app
        .quote
        .series
        .as_ref()
        .map(|s| s.meta.currency_sigil())
        .unwrap_or("$");

    let result = match action {
        TradeAction::Buy => app.trading.ledger.buy(qty, price, Utc::now()),
        TradeAction::Sell => app.trading.ledger.sell(qty, price, Utc::now()),
    };

    match result {
        Ok(()) => {
            let verb = match action {
                TradeAction::Buy => "Bought",
                TradeAction::Sell => "Sold",
            };
            app.set_status(format!("{verb} {qty} shares at {sigil}{price:.2}"));
        }
        // Rejections leave the ledger untouched; just surface the message.
        Err(e) => app.set_warning(e.to_string()),
    }
}

fn handle_compare_key(app: &mut AppState, key: KeyEvent) {
    let count = app.compare.options.len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if count > 0 && app.compare.cursor + 1 < count {
                app.compare.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.compare.cursor = app.compare.cursor.saturating_sub(1);
        }
        KeyCode::Char(' ') => {
            if let Some(sym) = app.compare.options.get(app.compare.cursor).cloned() {
                if !app.compare.selected.remove(&sym) {
                    app.compare.selected.insert(sym);
                }
            }
        }
        KeyCode::Char('s') => {
            app.compare.show_sentiment = !app.compare.show_sentiment;
            if app.compare.show_sentiment {
                request_comparison(app);
            }
        }
        KeyCode::Enter | KeyCode::Char('f') => {
            request_comparison(app);
        }
        _ => {}
    }
}

/// Re-request the active ticker's series at the current range.
pub fn request_refresh(app: &mut AppState) {
    if let Some(ticker) = app.quote.ticker.clone() {
        app.quote.fetch_in_progress = true;
        let _ = app.worker_tx.send(WorkerCommand::FetchQuote {
            symbol: ticker,
            range: app.quote.range,
        });
    }
}

fn request_news(app: &mut AppState) {
    if let Some(ticker) = app.quote.ticker.clone() {
        app.news.fetch_in_progress = true;
        let _ = app.worker_tx.send(WorkerCommand::FetchNews {
            symbol: ticker,
            api_key: app.config.news_api_key(),
        });
    } else {
        app.set_warning("No ticker set — press / to enter one");
    }
}

fn request_comparison(app: &mut AppState) {
    let symbols = app.compare.selected_in_order();
    if symbols.is_empty() {
        app.set_warning("No comparison symbols selected");
        return;
    }
    app.compare.fetch_in_progress = true;
    let _ = app.worker_tx.send(WorkerCommand::FetchComparison {
        symbols,
        with_sentiment: app.compare.show_sentiment,
        api_key: app.config.news_api_key(),
    });
}
