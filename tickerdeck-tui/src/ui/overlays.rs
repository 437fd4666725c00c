//! Overlays — login gate, ticker entry, error history.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

pub fn render_login(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(50, 40, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(" Login ")
        .title_style(theme::panel_title(true));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let masked = "*".repeat(app.login.password.len());
    let (user_style, pass_style) = if app.login.focus_password {
        (theme::muted(), theme::accent())
    } else {
        (theme::accent(), theme::muted())
    };

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Username: ", user_style),
            Span::styled(app.login.username.clone(), theme::text()),
            if !app.login.focus_password {
                Span::styled("_", theme::accent())
            } else {
                Span::raw("")
            },
        ]),
        Line::from(vec![
            Span::styled("Password: ", pass_style),
            Span::styled(masked, theme::text()),
            if app.login.focus_password {
                Span::styled("_", theme::accent())
            } else {
                Span::raw("")
            },
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Tab switches fields, Enter submits, Esc quits.",
            theme::muted(),
        )),
    ];

    f.render_widget(Paragraph::new(lines), inner);
}

pub fn render_ticker_entry(f: &mut Frame, area: Rect, input: &str) {
    let popup = centered_rect(50, 20, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(" Enter ticker ")
        .title_style(theme::panel_title(true));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let lines = vec![
        Line::from(vec![
            Span::styled("> ", theme::accent()),
            Span::styled(input.to_string(), theme::text()),
            Span::styled("_", theme::accent()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "e.g. AAPL, RELIANCE, GLENMARK — Enter to fetch, Esc to cancel",
            theme::muted(),
        )),
    ];

    f.render_widget(Paragraph::new(lines), inner);
}

pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(70, 60, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" Errors ({}) ", app.error_history.len()))
        .title_style(theme::panel_title(true));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No errors this session.",
            theme::muted(),
        )));
        f.render_widget(msg, inner);
        return;
    }

    let lines: Vec<Line> = app
        .error_history
        .iter()
        .skip(app.error_scroll)
        .take(inner.height as usize)
        .map(|record| {
            Line::from(vec![
                Span::styled(
                    format!("{} ", record.timestamp.format("%H:%M:%S")),
                    theme::muted(),
                ),
                Span::styled(format!("[{}] ", record.context), theme::warning()),
                Span::styled(record.message.clone(), theme::text()),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}
