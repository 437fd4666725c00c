//! Panel 3 — Trading: wallet, quantity entry, trade history with verdicts.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use tickerdeck_core::domain::TradeSide;
use tickerdeck_core::evaluation::{judge_position, judge_trade};
use tickerdeck_core::pnl::{net_pnl, trade_pnl};

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let sigil = app
        .quote
        .series
        .as_ref()
        .map(|s| s.meta.currency_sigil())
        .unwrap_or("$");
    let ledger = &app.trading.ledger;

    let mut lines: Vec<Line> = Vec::new();

    // Wallet and position summary.
    lines.push(Line::from(vec![
        Span::styled("Wallet balance: ", theme::muted()),
        Span::styled(format!("{sigil}{:.2}", ledger.cash()), theme::accent()),
        Span::raw("   "),
        Span::styled("Shares held: ", theme::muted()),
        Span::styled(format!("{}", ledger.net_shares()), theme::accent()),
    ]));

    match app.current_price() {
        Some(price) => {
            lines.push(Line::from(vec![
                Span::styled("Current price: ", theme::muted()),
                Span::styled(format!("{sigil}{price:.2}"), theme::text()),
                Span::raw("   "),
                Span::styled("Quantity: ", theme::muted()),
                Span::styled(format!("{}", app.trading.quantity), theme::panel_title(true)),
                Span::styled("  (digits/+/- to edit, b buy, s sell, e evaluate)", theme::muted()),
            ]));
        }
        None => {
            lines.push(Line::from(Span::styled(
                "No quote available — set a ticker on the Quote panel to trade.",
                theme::warning(),
            )));
        }
    }

    // Aggregate evaluation, toggled by the Evaluate action.
    if app.trading.show_evaluation {
        lines.push(Line::from(""));
        match app.current_price() {
            Some(price) if !ledger.trades().is_empty() => {
                let profit = net_pnl(ledger.trades(), price);
                let verdict = judge_position(profit);
                lines.push(Line::from(vec![
                    Span::styled("Net P/L (simulated): ", theme::muted()),
                    Span::styled(
                        format!("{sigil}{profit:.2}"),
                        Style::default().fg(theme::pnl_color(profit)),
                    ),
                    Span::raw("   "),
                    Span::styled(
                        verdict.label(),
                        Style::default().fg(theme::verdict_color(verdict)),
                    ),
                ]));
            }
            Some(_) => {
                lines.push(Line::from(Span::styled(
                    "Nothing to evaluate yet — no trades recorded.",
                    theme::muted(),
                )));
            }
            None => {
                lines.push(Line::from(Span::styled(
                    "Cannot evaluate without a current quote.",
                    theme::warning(),
                )));
            }
        }
    }

    // Trade history, most recent first.
    if !ledger.trades().is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Trade history",
            theme::panel_title(true),
        )));

        for trade in ledger.trades().iter().rev() {
            let side_color = match trade.side {
                TradeSide::Buy => theme::POSITIVE,
                TradeSide::Sell => theme::NEGATIVE,
            };
            let mut spans = vec![
                Span::styled(
                    format!("{:<4}", trade.side.label()),
                    Style::default().fg(side_color),
                ),
                Span::styled(
                    format!(
                        "{} @ {sigil}{:.2}  {}",
                        trade.quantity,
                        trade.price,
                        trade.timestamp.format("%H:%M:%S")
                    ),
                    theme::text(),
                ),
            ];

            if let Some(price) = app.current_price() {
                let pnl = trade_pnl(trade, price);
                let verdict = judge_trade(pnl);
                let direction = if pnl >= 0.0 { "↑" } else { "↓" };
                spans.push(Span::styled(
                    format!("   now {sigil}{price:.2}  P/L {sigil}{pnl:.2} {direction} "),
                    theme::muted(),
                ));
                spans.push(Span::styled(
                    verdict.label(),
                    Style::default().fg(theme::verdict_color(verdict)),
                ));
            }

            lines.push(Line::from(spans));
        }
    }

    f.render_widget(Paragraph::new(lines), area);
}
