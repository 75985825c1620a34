//! # Solace Limbic
//!
//! The fast, non-verbal part of the companion: it turns detection results
//! into a bounded mood score and watches the recent emotion history for
//! patterns (persistent struggle, volatility).
//!
//! Everything here is synchronous and operates on a borrowed
//! `SessionMemory`; the dispatcher decides when an insight is voiced.

mod mood;

pub use mood::{
    emotion_delta, emotional_insight, insight_kind, mood_state, update_mood, InsightKind,
    EMOTION_WEIGHT, STRUGGLE_INSIGHT, VOLATILITY_INSIGHT,
};
