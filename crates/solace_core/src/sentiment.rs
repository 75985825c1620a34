//! Keyword-based English polarity scoring.
//!
//! The engine only consumes the three-way label; the scores are passed
//! through to callers (the HTTP response, the conversation log).
//! In production, this can be replaced with any `SentimentAnalyzer`.

use crate::labels::SentimentLabel;
use serde::{Deserialize, Serialize};

/// Normalization constant for the compound score.
const ALPHA: f32 = 15.0;

const VALENCE: &[(&str, f32)] = &[
    // positive
    ("happy", 2.7),
    ("great", 3.1),
    ("awesome", 3.1),
    ("amazing", 2.8),
    ("love", 3.2),
    ("loved", 2.9),
    ("excited", 2.2),
    ("proud", 2.1),
    ("good", 1.9),
    ("glad", 2.0),
    ("grateful", 1.9),
    ("thanks", 1.9),
    ("thank", 1.5),
    ("hope", 1.9),
    ("hopeful", 2.3),
    ("relieved", 1.5),
    ("calm", 1.3),
    ("wonderful", 2.7),
    ("nice", 1.8),
    ("better", 1.9),
    ("confident", 2.2),
    ("fun", 2.3),
    ("joy", 2.8),
    // negative
    ("sad", -2.1),
    ("depressed", -2.3),
    ("angry", -2.3),
    ("upset", -1.6),
    ("stressed", -1.4),
    ("anxious", -1.0),
    ("terrible", -2.1),
    ("awful", -2.0),
    ("lonely", -1.8),
    ("hurt", -2.1),
    ("hate", -2.7),
    ("scared", -1.9),
    ("afraid", -2.0),
    ("tired", -1.3),
    ("worried", -1.9),
    ("hopeless", -2.0),
    ("bad", -2.5),
    ("cry", -2.1),
    ("crying", -2.1),
    ("miserable", -2.2),
    ("die", -2.9),
    ("stupid", -2.4),
    ("worthless", -1.9),
    ("overwhelmed", -1.5),
];

/// Proportions of positive, neutral and negative mass, plus the compound score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentScores {
    pub neg: f32,
    pub neu: f32,
    pub pos: f32,
    pub compound: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub label: SentimentLabel,
    pub scores: SentimentScores,
    pub compound: f32,
}

/// Maps text to a polarity report.
pub trait SentimentAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> SentimentReport;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordSentiment;

impl SentimentAnalyzer for KeywordSentiment {
    fn analyze(&self, text: &str) -> SentimentReport {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|t| !t.is_empty())
            .collect();

        let mut pos = 0.0f32;
        let mut neg = 0.0f32;
        let mut neutral_tokens = 0usize;
        for token in &tokens {
            match VALENCE.iter().find(|(word, _)| word == token) {
                Some((_, v)) if *v > 0.0 => pos += v,
                Some((_, v)) => neg += v.abs(),
                None => neutral_tokens += 1,
            }
        }

        let sum = pos - neg;
        let compound = sum / (sum * sum + ALPHA).sqrt();
        let total = pos + neg + neutral_tokens as f32;
        let scores = if total > 0.0 {
            SentimentScores {
                neg: neg / total,
                neu: neutral_tokens as f32 / total,
                pos: pos / total,
                compound,
            }
        } else {
            SentimentScores {
                neu: 1.0,
                ..Default::default()
            }
        };

        SentimentReport {
            label: SentimentLabel::from_compound(compound),
            scores,
            compound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_text() {
        let r = KeywordSentiment.analyze("the train leaves at noon");
        assert_eq!(r.label, SentimentLabel::Neutral);
        assert!(r.compound.abs() < 0.01);
    }

    #[test]
    fn test_positive_text() {
        let r = KeywordSentiment.analyze("I'm so happy, thanks!");
        assert_eq!(r.label, SentimentLabel::Positive);
        assert!(r.compound > 0.0);
        assert!(r.scores.pos > r.scores.neg);
    }

    #[test]
    fn test_negative_text() {
        let r = KeywordSentiment.analyze("I feel sad and lonely");
        assert_eq!(r.label, SentimentLabel::Negative);
        assert!(r.compound < 0.0);
    }

    #[test]
    fn test_compound_is_bounded() {
        let text = "great ".repeat(200);
        let r = KeywordSentiment.analyze(&text);
        assert!(r.compound <= 1.0);
        assert!(r.compound > 0.9);
    }

    #[test]
    fn test_empty_text() {
        let r = KeywordSentiment.analyze("");
        assert_eq!(r.label, SentimentLabel::Neutral);
        assert_eq!(r.scores.neu, 1.0);
        assert_eq!(r.compound, 0.0);
    }
}
