//! Panel 1 — Quote: price metric, range selector, close-price chart.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use tickerdeck_core::domain::QuoteSeries;
use tickerdeck_core::range::TimeRange;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(ticker) = app.quote.ticker.as_deref() else {
        render_empty(f, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // metric
            Constraint::Length(1), // range selector
            Constraint::Min(5),    // chart
        ])
        .split(area);

    render_metric(f, chunks[0], app, ticker);
    render_range_selector(f, chunks[1], app.quote.range);

    match &app.quote.series {
        Some(series) if !series.is_empty() => render_chart(f, chunks[2], series, app.quote.range),
        Some(_) => {
            let msg = Paragraph::new(Line::from(Span::styled(
                "No data available for this time range or stock.",
                theme::warning(),
            )));
            f.render_widget(msg, chunks[2]);
        }
        None if app.quote.fetch_in_progress => {
            let msg = Paragraph::new(Line::from(Span::styled("Fetching...", theme::muted())));
            f.render_widget(msg, chunks[2]);
        }
        None => {}
    }
}

fn render_empty(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No ticker set. Press / and enter a symbol (e.g. AAPL, RELIANCE, GLENMARK).",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Company names like APPLE or TESLA are resolved to tickers; bare Indian",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "symbols are probed on NSE (.NS) and BSE (.BO) automatically.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_metric(f: &mut Frame, area: Rect, app: &AppState, ticker: &str) {
    let mut top: Vec<Span> = vec![Span::styled(ticker.to_string(), theme::panel_title(true))];

    if let Some(series) = &app.quote.series {
        let sigil = series.meta.currency_sigil();
        if let Some(price) = series.last_price() {
            top.push(Span::raw("  "));
            top.push(Span::styled(format!("{sigil}{price:.2}"), theme::accent()));
        }
        if let Some(pct) = series.percent_change() {
            let arrow = if pct >= 0.0 { "▲" } else { "▼" };
            top.push(Span::raw("  "));
            top.push(Span::styled(
                format!("{arrow} {pct:+.2}%"),
                Style::default().fg(theme::pnl_color(pct)),
            ));
        }
        if let Some(exchange) = &series.meta.exchange {
            top.push(Span::raw("  "));
            top.push(Span::styled(format!("[{exchange}]"), theme::muted()));
        }
    }

    let mut bottom: Vec<Span> = Vec::new();
    if let Some(note) = &app.quote.resolved_note {
        bottom.push(Span::styled(note.clone(), theme::muted()));
        bottom.push(Span::raw("  "));
    }
    if let Some(updated) = app.quote.last_updated {
        bottom.push(Span::styled(
            format!("updated {}", updated.format("%H:%M:%S")),
            theme::muted(),
        ));
    }

    let para = Paragraph::new(vec![Line::from(top), Line::from(bottom)]);
    f.render_widget(para, area);
}

fn render_range_selector(f: &mut Frame, area: Rect, active: TimeRange) {
    let mut spans: Vec<Span> = vec![Span::styled("Range: ", theme::muted())];
    for range in TimeRange::ALL_RANGES {
        let style = if range == active {
            theme::panel_title(true)
        } else {
            theme::muted()
        };
        spans.push(Span::styled(format!(" {} ", range.label()), style));
    }
    spans.push(Span::styled("  (h/l to change)", theme::muted()));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_chart(f: &mut Frame, area: Rect, series: &QuoteSeries, range: TimeRange) {
    let closes = series.closes();
    let min_y = closes.iter().copied().fold(f64::INFINITY, f64::min);
    let max_y = closes.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let padding = (max_y - min_y).abs() * 0.05;
    let y_min = min_y - padding;
    let y_max = max_y + padding;
    let x_max = closes.len().saturating_sub(1) as f64;

    let data: Vec<(f64, f64)> = closes
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect();

    let label = format!("{} ({})", series.meta.symbol, range.label());
    let dataset = Dataset::default()
        .name(label)
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(theme::ACCENT))
        .graph_type(GraphType::Line)
        .data(&data);

    // Intraday ranges label the axis with times, longer ranges with dates.
    let time_format = match range {
        TimeRange::Day | TimeRange::FiveDays => "%H:%M",
        _ => "%Y-%m-%d",
    };
    let x_labels: Vec<Span> = [series.quotes.first(), series.quotes.last()]
        .into_iter()
        .flatten()
        .map(|q| Span::styled(q.timestamp.format(time_format).to_string(), theme::muted()))
        .collect();

    let chart = Chart::new(vec![dataset])
        .x_axis(
            Axis::default()
                .title(Span::styled("Time", theme::muted()))
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Price", theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.2}"), theme::muted()),
                    Span::styled(format!("{y_max:.2}"), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}
