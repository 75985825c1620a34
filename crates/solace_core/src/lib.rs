//! # Solace core
//!
//! Everything the reply pipeline reads but never decides on its own:
//! the ordered lexicons, the detector that turns text into labels, the
//! per-session memory record, the interactive content catalogs and the
//! sentiment collaborator.

pub mod config;
pub mod content;
pub mod detector;
pub mod labels;
pub mod lexicon;
pub mod sentiment;
pub mod state;

pub use config::SolaceConfig;
pub use detector::{DetectionResult, Detector};
pub use labels::{
    Emotion, EmotionGroup, Intent, IntentMethod, IntentPrediction, LifeContext, MoodState,
    SentimentLabel,
};
pub use lexicon::{LexiconError, Lexicons, ToolTrigger};
pub use sentiment::{KeywordSentiment, SentimentAnalyzer, SentimentReport, SentimentScores};
pub use state::{ContextEntry, EmotionRecord, SessionMemory};
