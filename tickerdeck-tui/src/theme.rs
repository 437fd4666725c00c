//! Color tokens and style helpers for the dashboard.
//!
//! Dark-terminal palette: cyan accent for focus and prices, green/red for
//! gains and losses, orange for warnings, steel blue for secondary text.

use ratatui::style::{Color, Modifier, Style};

use tickerdeck_core::evaluation::Verdict;
use tickerdeck_core::sentiment::{SentimentBand, SentimentLabel};

pub const ACCENT: Color = Color::Cyan;
pub const POSITIVE: Color = Color::Green;
pub const NEGATIVE: Color = Color::Red;
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT: Color = Color::White;

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED)
    }
}

/// Gains render green, losses red. Zero counts as a gain so flat P/L
/// doesn't read as a loss.
pub fn pnl_color(value: f64) -> Color {
    if value >= 0.0 {
        POSITIVE
    } else {
        NEGATIVE
    }
}

pub fn verdict_color(verdict: Verdict) -> Color {
    match verdict {
        Verdict::Good => POSITIVE,
        Verdict::Neutral => MUTED,
        Verdict::Bad => NEGATIVE,
    }
}

pub fn sentiment_color(label: SentimentLabel) -> Color {
    match label {
        SentimentLabel::Positive => POSITIVE,
        SentimentLabel::Neutral => MUTED,
        SentimentLabel::Negative => NEGATIVE,
    }
}

pub fn band_color(band: SentimentBand) -> Color {
    match band {
        SentimentBand::StrongPositive => POSITIVE,
        SentimentBand::MildPositive => Color::LightGreen,
        SentimentBand::Neutral => MUTED,
        SentimentBand::MildNegative => WARNING,
        SentimentBand::StrongNegative => NEGATIVE,
    }
}

/// Per-series line colors for the comparison chart, cycled by index.
pub fn series_color(index: usize) -> Color {
    const SERIES: [Color; 6] = [
        Color::Cyan,
        Color::Yellow,
        Color::Magenta,
        Color::Green,
        Color::LightBlue,
        Color::LightRed,
    ];
    SERIES[index % SERIES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pnl_color_sign() {
        assert_eq!(pnl_color(12.0), POSITIVE);
        assert_eq!(pnl_color(0.0), POSITIVE);
        assert_eq!(pnl_color(-0.01), NEGATIVE);
    }

    #[test]
    fn verdict_colors() {
        assert_eq!(verdict_color(Verdict::Good), POSITIVE);
        assert_eq!(verdict_color(Verdict::Neutral), MUTED);
        assert_eq!(verdict_color(Verdict::Bad), NEGATIVE);
    }

    #[test]
    fn series_colors_cycle() {
        assert_eq!(series_color(0), series_color(6));
        assert_ne!(series_color(0), series_color(1));
    }
}
