//! Append-only exchange log, kept for later sentiment summaries.
//! Only the most recent `EXCHANGE_LOG_CAP` exchanges are retained.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use solace_core::{SentimentAnalyzer, SentimentLabel, SentimentReport, SentimentScores};

pub const EXCHANGE_LOG_CAP: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub timestamp: DateTime<Utc>,
    pub user: String,
    pub bot: String,
    pub sentiment: SentimentLabel,
    pub sentiment_scores: SentimentScores,
}

/// Overall polarity of everything the user said in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSentiment {
    pub per_message: Vec<SentimentReport>,
    pub average_compound: f32,
    pub final_label: SentimentLabel,
}

#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    exchanges: Vec<Exchange>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_exchange(&mut self, user: &str, bot: &str, report: &SentimentReport) {
        self.exchanges.push(Exchange {
            timestamp: Utc::now(),
            user: user.to_string(),
            bot: bot.to_string(),
            sentiment: report.label,
            sentiment_scores: report.scores,
        });
        if self.exchanges.len() > EXCHANGE_LOG_CAP {
            let excess = self.exchanges.len() - EXCHANGE_LOG_CAP;
            self.exchanges.drain(..excess);
        }
    }

    pub fn user_messages(&self) -> Vec<&str> {
        self.exchanges.iter().map(|e| e.user.as_str()).collect()
    }

    pub fn history(&self) -> &[Exchange] {
        &self.exchanges
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    pub fn clear(&mut self) {
        self.exchanges.clear();
    }

    /// Re-score every user message and average the compound scores.
    /// An empty log summarizes as neutral.
    pub fn summarize(&self, analyzer: &dyn SentimentAnalyzer) -> ConversationSentiment {
        let per_message: Vec<SentimentReport> = self
            .exchanges
            .iter()
            .map(|e| analyzer.analyze(&e.user))
            .collect();

        let average_compound = if per_message.is_empty() {
            0.0
        } else {
            per_message.iter().map(|r| r.compound).sum::<f32>() / per_message.len() as f32
        };

        ConversationSentiment {
            final_label: SentimentLabel::from_compound(average_compound),
            per_message,
            average_compound,
        }
    }
}
