//! Headline sentiment — lexicon scorer, aggregate score, interpretation bands.

use serde::{Deserialize, Serialize};

const POSITIVE_WORDS: &[&str] = &[
    "growth", "profit", "gain", "rise", "up", "strong", "bullish", "upgrade", "beat", "surge",
];

const NEGATIVE_WORDS: &[&str] = &[
    "loss", "fall", "down", "weak", "bearish", "downgrade", "miss", "decline", "drop", "crash",
];

/// Per-headline sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn label(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        }
    }
}

/// One scored headline. `score` is in [-1, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlineSentiment {
    pub headline: String,
    pub label: SentimentLabel,
    pub score: f64,
}

/// Score a single headline: (positive hits − negative hits) over total
/// hits, 0.0 when no lexicon word matches. Substring matching, so
/// "upgraded" counts for "upgrade".
pub fn score_headline(headline: &str) -> (SentimentLabel, f64) {
    let lower = headline.to_lowercase();
    let mut score = 0i32;
    let mut matched = 0i32;

    for word in lower.split_whitespace() {
        if POSITIVE_WORDS.iter().any(|pw| word.contains(pw)) {
            score += 1;
            matched += 1;
        } else if NEGATIVE_WORDS.iter().any(|nw| word.contains(nw)) {
            score -= 1;
            matched += 1;
        }
    }

    let normalized = if matched > 0 {
        f64::from(score) / f64::from(matched)
    } else {
        0.0
    };

    let label = if normalized > 0.1 {
        SentimentLabel::Positive
    } else if normalized < -0.1 {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    };

    (label, normalized.clamp(-1.0, 1.0))
}

/// Score every headline, 1:1 with the input.
pub fn analyze(headlines: &[String]) -> Vec<HeadlineSentiment> {
    headlines
        .iter()
        .map(|h| {
            let (label, score) = score_headline(h);
            HeadlineSentiment {
                headline: h.clone(),
                label,
                score,
            }
        })
        .collect()
}

/// Aggregate score: mean of the per-headline scores, 0.0 for no headlines.
pub fn sentiment_score(results: &[HeadlineSentiment]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    results.iter().map(|r| r.score).sum::<f64>() / results.len() as f64
}

/// Interpretation band for the aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentBand {
    StrongPositive,
    MildPositive,
    Neutral,
    MildNegative,
    StrongNegative,
}

impl SentimentBand {
    /// Band edges: `>= 0.5` strong positive, `> 0.1` mild positive,
    /// `> -0.1` neutral, `> -0.5` mild negative, else strong negative.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.5 {
            SentimentBand::StrongPositive
        } else if score > 0.1 {
            SentimentBand::MildPositive
        } else if score > -0.1 {
            SentimentBand::Neutral
        } else if score > -0.5 {
            SentimentBand::MildNegative
        } else {
            SentimentBand::StrongNegative
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SentimentBand::StrongPositive => "Strong Positive",
            SentimentBand::MildPositive => "Mild Positive",
            SentimentBand::Neutral => "Neutral",
            SentimentBand::MildNegative => "Mild Negative",
            SentimentBand::StrongNegative => "Strong Negative",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_headline_scores_positive() {
        let (label, score) = score_headline("Shares surge on strong profit growth");
        assert_eq!(label, SentimentLabel::Positive);
        assert!(score > 0.0);
    }

    #[test]
    fn negative_headline_scores_negative() {
        let (label, score) = score_headline("Stock crashes after earnings miss and downgrade");
        assert_eq!(label, SentimentLabel::Negative);
        assert!(score < 0.0);
    }

    #[test]
    fn unmatched_headline_is_neutral_zero() {
        let (label, score) = score_headline("Company announces annual general meeting");
        assert_eq!(label, SentimentLabel::Neutral);
        assert_eq!(score, 0.0);
    }

    #[test]
    fn mixed_headline_averages_hits() {
        // one positive ("gain"), one negative ("loss") → 0/2 = 0
        let (label, score) = score_headline("Quarterly gain offsets earlier loss");
        assert_eq!(label, SentimentLabel::Neutral);
        assert_eq!(score, 0.0);
    }

    #[test]
    fn analyze_aligns_one_to_one() {
        let headlines = vec![
            "Profit surge".to_string(),
            "Shares drop".to_string(),
            "Board meeting scheduled".to_string(),
        ];
        let results = analyze(&headlines);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].label, SentimentLabel::Positive);
        assert_eq!(results[1].label, SentimentLabel::Negative);
        assert_eq!(results[2].label, SentimentLabel::Neutral);
        assert_eq!(results[0].headline, headlines[0]);
    }

    #[test]
    fn aggregate_is_the_mean() {
        let results = vec![
            HeadlineSentiment {
                headline: "a".into(),
                label: SentimentLabel::Positive,
                score: 0.6,
            },
            HeadlineSentiment {
                headline: "b".into(),
                label: SentimentLabel::Negative,
                score: -0.2,
            },
        ];
        let avg = sentiment_score(&results);
        assert!((avg - 0.2).abs() < 1e-10);
        assert_eq!(SentimentBand::from_score(avg), SentimentBand::MildPositive);
    }

    #[test]
    fn empty_results_score_zero() {
        assert_eq!(sentiment_score(&[]), 0.0);
    }

    #[test]
    fn band_edges() {
        assert_eq!(SentimentBand::from_score(0.5), SentimentBand::StrongPositive);
        assert_eq!(SentimentBand::from_score(0.49), SentimentBand::MildPositive);
        assert_eq!(SentimentBand::from_score(0.1), SentimentBand::Neutral);
        assert_eq!(SentimentBand::from_score(-0.1), SentimentBand::MildNegative);
        assert_eq!(SentimentBand::from_score(-0.5), SentimentBand::StrongNegative);
        assert_eq!(SentimentBand::from_score(0.0), SentimentBand::Neutral);
    }
}
