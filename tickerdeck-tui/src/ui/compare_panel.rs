//! Panel 4 — Compare: multi-select and overlaid close curves.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::worker::COMPARISON_RANGE;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(20)])
        .split(area);

    render_selector(f, chunks[0], app);
    render_chart(f, chunks[1], app);
}

fn render_selector(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled("Symbols", theme::panel_title(true))),
        Line::from(Span::styled(
            "space select, f fetch, s sentiment",
            theme::muted(),
        )),
        Line::from(""),
    ];

    for (i, sym) in app.compare.options.iter().enumerate() {
        let selected = app.compare.selected.contains(sym);
        let marker = if selected { "[x]" } else { "[ ]" };
        let style = if i == app.compare.cursor {
            theme::panel_title(true)
        } else if selected {
            theme::accent()
        } else {
            theme::muted()
        };

        let mut spans = vec![Span::styled(format!("{marker} {sym:<14}"), style)];

        if app.compare.show_sentiment {
            match app.compare.sentiment.get(sym) {
                Some(Some(score)) => {
                    let band = tickerdeck_core::sentiment::SentimentBand::from_score(*score);
                    spans.push(Span::styled(
                        format!("{score:+.2}"),
                        Style::default().fg(theme::band_color(band)),
                    ));
                }
                Some(None) => {
                    spans.push(Span::styled("no news", theme::muted()));
                }
                None => {}
            }
        }

        lines.push(Line::from(spans));
    }

    if app.compare.fetch_in_progress {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Fetching...", theme::muted())));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn render_chart(f: &mut Frame, area: Rect, app: &AppState) {
    let selected = app.compare.selected_in_order();
    let with_data: Vec<&String> = selected
        .iter()
        .filter(|sym| {
            app.compare
                .series
                .get(*sym)
                .is_some_and(|s| !s.is_empty())
        })
        .collect();

    if with_data.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Select symbols and press f to fetch their curves.",
                theme::muted(),
            )),
        ]);
        f.render_widget(msg, area);
        return;
    }

    // Collect all the point vectors first so the datasets can borrow them.
    let series_points: Vec<(String, Vec<(f64, f64)>)> = with_data
        .iter()
        .map(|sym| {
            let closes = app.compare.series[*sym].closes();
            let points = closes
                .iter()
                .enumerate()
                .map(|(i, &v)| (i as f64, v))
                .collect();
            ((*sym).clone(), points)
        })
        .collect();

    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    let mut x_max = 1.0f64;
    for (_, points) in &series_points {
        for &(x, y) in points {
            y_min = y_min.min(y);
            y_max = y_max.max(y);
            x_max = x_max.max(x);
        }
    }
    let padding = (y_max - y_min).abs() * 0.05;

    let datasets: Vec<Dataset> = series_points
        .iter()
        .enumerate()
        .map(|(i, (sym, points))| {
            Dataset::default()
                .name(sym.clone())
                .marker(symbols::Marker::Braille)
                .style(Style::default().fg(theme::series_color(i)))
                .graph_type(GraphType::Line)
                .data(points)
        })
        .collect();

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title(Span::styled(
                    format!("{} window", COMPARISON_RANGE.label()),
                    theme::muted(),
                ))
                .style(theme::muted())
                .bounds([0.0, x_max]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Price", theme::muted()))
                .style(theme::muted())
                .bounds([y_min - padding, y_max + padding])
                .labels(vec![
                    Span::styled(format!("{:.2}", y_min - padding), theme::muted()),
                    Span::styled(format!("{:.2}", y_max + padding), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}
