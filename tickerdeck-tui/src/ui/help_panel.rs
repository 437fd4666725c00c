//! Panel 5 — Help: keyboard reference.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::theme;

pub fn render(f: &mut Frame, area: Rect) {
    let entries: &[(&str, &str)] = &[
        ("1-5 / Tab", "switch panels"),
        ("/", "enter a ticker (names like APPLE resolve to AAPL)"),
        ("!", "error history"),
        ("q", "quit"),
        ("", ""),
        ("Quote panel", ""),
        ("h / l", "cycle time range (1D 5D 1M 6M 1Y 5Y ALL)"),
        ("r", "refresh now (auto-refreshes every 5s)"),
        ("", ""),
        ("News panel", ""),
        ("r", "fetch headlines and sentiment"),
        ("", ""),
        ("Trading panel", ""),
        ("digits / + / -", "edit quantity"),
        ("b / s", "buy / sell at the current price"),
        ("e", "toggle net P/L evaluation"),
        ("", ""),
        ("Compare panel", ""),
        ("j / k", "move cursor"),
        ("space", "toggle symbol"),
        ("f / Enter", "fetch curves"),
        ("s", "toggle per-symbol sentiment"),
    ];

    let lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| {
            if desc.is_empty() {
                Line::from(Span::styled(key.to_string(), theme::panel_title(true)))
            } else {
                Line::from(vec![
                    Span::styled(format!("  {key:<16}"), theme::accent()),
                    Span::styled(desc.to_string(), theme::text()),
                ])
            }
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}
