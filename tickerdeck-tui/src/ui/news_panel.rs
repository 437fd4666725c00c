//! Panel 2 — News: headlines, per-headline sentiment, aggregate band.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use tickerdeck_core::sentiment::{self, SentimentBand};

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(ticker) = app.quote.ticker.as_deref() else {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No ticker set. Press / and enter a symbol first.",
            theme::muted(),
        )));
        f.render_widget(msg, area);
        return;
    };

    if app.news.fetch_in_progress {
        let msg = Paragraph::new(Line::from(Span::styled(
            format!("Fetching news for {ticker}..."),
            theme::muted(),
        )));
        f.render_widget(msg, area);
        return;
    }

    let Some(headlines) = &app.news.headlines else {
        let msg = Paragraph::new(vec![
            Line::from(Span::styled(
                format!("No news loaded for {ticker}."),
                theme::muted(),
            )),
            Line::from(Span::styled("Press r to fetch.", theme::muted())),
        ]);
        f.render_widget(msg, area);
        return;
    };

    if headlines.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            format!("No news found for {ticker}."),
            theme::warning(),
        )));
        f.render_widget(msg, area);
        return;
    }

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            format!("News for {ticker}"),
            theme::panel_title(true),
        )),
        Line::from(""),
    ];

    if let Some(results) = &app.news.sentiment {
        for r in results {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<8}", r.label.label()),
                    Style::default().fg(theme::sentiment_color(r.label)),
                ),
                Span::styled(format!("({:+.2})  ", r.score), theme::muted()),
                Span::styled(r.headline.clone(), theme::text()),
            ]));
        }

        let avg = sentiment::sentiment_score(results);
        let band = SentimentBand::from_score(avg);
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Avg sentiment score: ", theme::muted()),
            Span::styled(format!("{avg:.2}"), theme::accent()),
            Span::raw("   "),
            Span::styled(
                band.label(),
                Style::default().fg(theme::band_color(band)),
            ),
        ]));
    } else {
        for h in headlines {
            lines.push(Line::from(vec![
                Span::styled("- ", theme::muted()),
                Span::styled(h.clone(), theme::text()),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}
