//! Mood score updates and pattern-based insight over recent history.

use chrono::Utc;
use solace_core::labels::INSIGHT_NEGATIVE;
use solace_core::{Emotion, EmotionRecord, MoodState, SentimentLabel, SessionMemory};
use std::collections::HashSet;

/// Base mood swing for a detected emotion, scaled by intensity.
pub const EMOTION_WEIGHT: f32 = 3.0;

/// Insight needs at least this many history entries.
const INSIGHT_MIN_HISTORY: usize = 3;
/// How many of the most recent entries the insight looks at.
const INSIGHT_WINDOW: usize = 5;
const STRUGGLE_THRESHOLD: usize = 3;
const VOLATILITY_THRESHOLD: usize = 4;

pub const STRUGGLE_INSIGHT: &str = "I'm noticing you've been going through a tough time. Have you considered talking to someone you trust or a professional? You don't have to carry this alone.";
pub const VOLATILITY_INSIGHT: &str = "I'm noticing your emotions have been shifting quite a bit. That can be exhausting. Want to talk about what's causing these ups and downs?";

/// Which pattern an insight was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightKind {
    /// Several recent turns carried the same family of heavy emotions.
    PersistentStruggle,
    /// Many distinct emotions in a short window.
    Volatility,
}

impl InsightKind {
    pub fn message(&self) -> &'static str {
        match self {
            InsightKind::PersistentStruggle => STRUGGLE_INSIGHT,
            InsightKind::Volatility => VOLATILITY_INSIGHT,
        }
    }
}

/// Mood delta for one detected emotion. Truncates toward zero.
pub fn emotion_delta(intensity: f32) -> i32 {
    (EMOTION_WEIGHT * intensity) as i32
}

/// Apply one turn's detection results to the mood score and log it.
///
/// An emotion takes precedence over the external sentiment label; the
/// history entry is appended even when neither is present.
pub fn update_mood(
    memory: &mut SessionMemory,
    sentiment: Option<SentimentLabel>,
    emotion: Option<Emotion>,
    intensity: f32,
) {
    let before = memory.mood_score;
    match (emotion, sentiment) {
        (Some(e), _) if e.lowers_mood() => memory.adjust_mood(-emotion_delta(intensity)),
        (Some(e), _) if e.raises_mood() => memory.adjust_mood(emotion_delta(intensity)),
        (Some(_), _) => {}
        (None, Some(SentimentLabel::Positive)) => memory.adjust_mood(1),
        (None, Some(SentimentLabel::Negative)) => memory.adjust_mood(-1),
        (None, _) => {}
    }

    tracing::debug!(
        before,
        after = memory.mood_score,
        emotion = ?emotion,
        intensity,
        "Mood updated"
    );

    memory.push_history(EmotionRecord {
        timestamp: Utc::now(),
        emotion,
        intensity,
        mood_score: memory.mood_score,
        sentiment,
    });
}

pub fn mood_state(score: i32) -> MoodState {
    MoodState::from_score(score)
}

/// Classify the recent emotion history, if it shows a pattern worth naming.
pub fn insight_kind(memory: &SessionMemory) -> Option<InsightKind> {
    let history = &memory.emotion_history;
    if history.len() < INSIGHT_MIN_HISTORY {
        return None;
    }

    let recent: Vec<Emotion> = history
        .iter()
        .skip(history.len().saturating_sub(INSIGHT_WINDOW))
        .filter_map(|r| r.emotion)
        .collect();

    let struggling = recent
        .iter()
        .filter(|e| INSIGHT_NEGATIVE.contains(e))
        .count();
    if struggling >= STRUGGLE_THRESHOLD {
        return Some(InsightKind::PersistentStruggle);
    }

    let distinct: HashSet<Emotion> = recent.iter().copied().collect();
    if recent.len() >= VOLATILITY_THRESHOLD && distinct.len() >= VOLATILITY_THRESHOLD {
        return Some(InsightKind::Volatility);
    }

    None
}

/// Advisory message for the current history. The caller decides whether to say it.
pub fn emotional_insight(memory: &SessionMemory) -> Option<&'static str> {
    insight_kind(memory).map(|k| k.message())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(memory: &mut SessionMemory, emotions: &[Option<Emotion>]) {
        for e in emotions {
            update_mood(memory, None, *e, 1.0);
        }
    }

    #[test]
    fn test_negative_emotion_lowers_mood() {
        let mut m = SessionMemory::default();
        update_mood(&mut m, None, Some(Emotion::Sad), 1.0);
        assert_eq!(m.mood_score, -3);
    }

    #[test]
    fn test_intensity_scales_and_truncates() {
        let mut m = SessionMemory::default();
        // 3 × 2.5 = 7.5 → 7
        update_mood(&mut m, None, Some(Emotion::Anxious), 2.5);
        assert_eq!(m.mood_score, -7);
        // 3 × 0.5 = 1.5 → 1
        update_mood(&mut m, None, Some(Emotion::Happy), 0.5);
        assert_eq!(m.mood_score, -6);
    }

    #[test]
    fn test_mood_clamped() {
        let mut m = SessionMemory::default();
        for _ in 0..10 {
            update_mood(&mut m, None, Some(Emotion::Hopeless), 2.5);
        }
        assert_eq!(m.mood_score, -10);
        for _ in 0..10 {
            update_mood(&mut m, None, Some(Emotion::Excited), 2.5);
        }
        assert_eq!(m.mood_score, 10);
    }

    #[test]
    fn test_complex_emotion_does_not_move_mood_or_use_sentiment() {
        let mut m = SessionMemory::default();
        update_mood(&mut m, Some(SentimentLabel::Positive), Some(Emotion::Curious), 1.0);
        assert_eq!(m.mood_score, 0);
        update_mood(&mut m, Some(SentimentLabel::Negative), Some(Emotion::Tired), 1.0);
        assert_eq!(m.mood_score, 0);
    }

    #[test]
    fn test_sentiment_used_without_emotion() {
        let mut m = SessionMemory::default();
        update_mood(&mut m, Some(SentimentLabel::Positive), None, 1.0);
        assert_eq!(m.mood_score, 1);
        update_mood(&mut m, Some(SentimentLabel::Negative), None, 1.0);
        update_mood(&mut m, Some(SentimentLabel::Negative), None, 1.0);
        assert_eq!(m.mood_score, -1);
        update_mood(&mut m, Some(SentimentLabel::Neutral), None, 1.0);
        assert_eq!(m.mood_score, -1);
    }

    #[test]
    fn test_history_always_appended() {
        let mut m = SessionMemory::default();
        update_mood(&mut m, None, None, 1.0);
        assert_eq!(m.emotion_history.len(), 1);
        let rec = m.emotion_history.back().unwrap();
        assert_eq!(rec.emotion, None);
        assert_eq!(rec.intensity, 1.0);
        assert_eq!(rec.mood_score, 0);
    }

    #[test]
    fn test_mood_state_buckets() {
        assert_eq!(mood_state(7), MoodState::VeryPositive);
        assert_eq!(mood_state(0), MoodState::Neutral);
        assert_eq!(mood_state(-10), MoodState::VeryNegative);
    }

    #[test]
    fn test_no_insight_with_short_history() {
        let mut m = SessionMemory::default();
        feed(&mut m, &[Some(Emotion::Sad), Some(Emotion::Sad)]);
        assert_eq!(emotional_insight(&m), None);
    }

    #[test]
    fn test_struggle_insight() {
        let mut m = SessionMemory::default();
        feed(
            &mut m,
            &[Some(Emotion::Sad), None, Some(Emotion::Lonely), Some(Emotion::Hopeless)],
        );
        assert_eq!(insight_kind(&m), Some(InsightKind::PersistentStruggle));
        assert_eq!(emotional_insight(&m), Some(STRUGGLE_INSIGHT));
    }

    #[test]
    fn test_struggle_only_counts_last_five() {
        let mut m = SessionMemory::default();
        feed(
            &mut m,
            &[
                Some(Emotion::Sad),
                Some(Emotion::Sad),
                Some(Emotion::Sad),
                None,
                None,
                None,
                None,
                Some(Emotion::Happy),
            ],
        );
        assert_eq!(insight_kind(&m), None);
    }

    #[test]
    fn test_volatility_insight() {
        let mut m = SessionMemory::default();
        feed(
            &mut m,
            &[
                Some(Emotion::Happy),
                Some(Emotion::Angry),
                Some(Emotion::Curious),
                Some(Emotion::Proud),
            ],
        );
        assert_eq!(insight_kind(&m), Some(InsightKind::Volatility));
    }

    #[test]
    fn test_repeated_emotion_is_not_volatile() {
        let mut m = SessionMemory::default();
        feed(
            &mut m,
            &[
                Some(Emotion::Happy),
                Some(Emotion::Happy),
                Some(Emotion::Proud),
                Some(Emotion::Proud),
            ],
        );
        assert_eq!(insight_kind(&m), None);
    }
}
