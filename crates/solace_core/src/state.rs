//! Per-session memory.
//!
//! One `SessionMemory` per conversation, owned by exactly one engine and
//! mutated in place. Field names double as the persisted JSON keys.

use crate::labels::{Emotion, Intent, LifeContext, MoodState, SentimentLabel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const MOOD_MIN: i32 = -10;
pub const MOOD_MAX: i32 = 10;
pub const RELATIONSHIP_MAX: u8 = 10;
pub const EMOTION_HISTORY_CAP: usize = 20;
pub const CONVERSATION_CONTEXT_CAP: usize = 10;

/// One mood update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionRecord {
    pub timestamp: DateTime<Utc>,
    pub emotion: Option<Emotion>,
    pub intensity: f32,
    pub mood_score: i32,
    pub sentiment: Option<SentimentLabel>,
}

/// A user turn or a bot reply in the rolling conversation window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextEntry {
    Turn {
        user: String,
        intent: Intent,
        emotion: Option<Emotion>,
        intensity: f32,
        context: Option<LifeContext>,
        sentiment: Option<SentimentLabel>,
    },
    Reply {
        bot: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMemory {
    pub username: Option<String>,
    pub last_topic: Option<Intent>,
    pub mood_score: i32,
    pub emotion_history: VecDeque<EmotionRecord>,
    pub conversation_context: VecDeque<ContextEntry>,
    pub turn_count: u64,
    pub awaiting_response: Option<String>,
    pub last_emotion: Option<Emotion>,
    pub last_emotion_intensity: f32,
    pub relationship_level: u8,
}

impl Default for SessionMemory {
    fn default() -> Self {
        Self {
            username: None,
            last_topic: None,
            mood_score: 0,
            emotion_history: VecDeque::with_capacity(EMOTION_HISTORY_CAP),
            conversation_context: VecDeque::with_capacity(CONVERSATION_CONTEXT_CAP),
            turn_count: 0,
            awaiting_response: None,
            last_emotion: None,
            last_emotion_intensity: 1.0,
            relationship_level: 0,
        }
    }
}

impl SessionMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mood_state(&self) -> MoodState {
        MoodState::from_score(self.mood_score)
    }

    /// Shift the mood score, saturating at the bounds.
    pub fn adjust_mood(&mut self, delta: i32) {
        self.mood_score = self.mood_score.saturating_add(delta).clamp(MOOD_MIN, MOOD_MAX);
    }

    pub fn set_mood(&mut self, score: i32) {
        self.mood_score = score.clamp(MOOD_MIN, MOOD_MAX);
    }

    /// Raise rapport. The level never goes down.
    pub fn bump_relationship(&mut self, by: u8) {
        self.relationship_level = self
            .relationship_level
            .saturating_add(by)
            .min(RELATIONSHIP_MAX);
    }

    pub fn push_history(&mut self, record: EmotionRecord) {
        self.emotion_history.push_back(record);
        while self.emotion_history.len() > EMOTION_HISTORY_CAP {
            self.emotion_history.pop_front();
        }
    }

    pub fn push_context(&mut self, entry: ContextEntry) {
        self.conversation_context.push_back(entry);
        while self.conversation_context.len() > CONVERSATION_CONTEXT_CAP {
            self.conversation_context.pop_front();
        }
    }

    /// Name followed by ", " for sentence-initial use, or empty.
    pub fn name_prefix(&self) -> String {
        self.username
            .as_deref()
            .map(|n| format!("{}, ", n))
            .unwrap_or_default()
    }

    /// Re-establish every bound after state came from outside (e.g. a file).
    pub fn sanitize(&mut self) {
        self.mood_score = self.mood_score.clamp(MOOD_MIN, MOOD_MAX);
        self.relationship_level = self.relationship_level.min(RELATIONSHIP_MAX);
        if !self.last_emotion_intensity.is_finite() {
            tracing::warn!("Non-finite last_emotion_intensity in memory, resetting");
            self.last_emotion_intensity = 1.0;
        }
        while self.emotion_history.len() > EMOTION_HISTORY_CAP {
            self.emotion_history.pop_front();
        }
        while self.conversation_context.len() > CONVERSATION_CONTEXT_CAP {
            self.conversation_context.pop_front();
        }
    }
}
