//! Closed label sets shared by the detector, the mood engine and the dispatcher.
//!
//! Declaration order of `Emotion` is the lexicon order; several tie-breaks
//! depend on it, so new variants must be appended to the right section.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    // Negative
    Sad,
    Angry,
    Anxious,
    Lonely,
    Guilty,
    Jealous,
    Disappointed,
    Hurt,
    Scared,
    Confused,
    Tired,
    Overwhelmed,
    Hopeless,
    Insecure,
    // Positive
    Happy,
    Excited,
    Proud,
    Grateful,
    Relieved,
    Loved,
    Hopeful,
    Confident,
    // Neutral / complex
    Bored,
    Numb,
    Nostalgic,
    Curious,
}

/// Which section of the emotion lexicon a label belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmotionGroup {
    Negative,
    Positive,
    Complex,
}

/// Detection tie-break: when several emotions match, the first of these wins.
pub const NEGATIVE_PRIORITY: [Emotion; 12] = [
    Emotion::Sad,
    Emotion::Angry,
    Emotion::Anxious,
    Emotion::Lonely,
    Emotion::Guilty,
    Emotion::Hurt,
    Emotion::Scared,
    Emotion::Disappointed,
    Emotion::Overwhelmed,
    Emotion::Hopeless,
    Emotion::Insecure,
    Emotion::Numb,
];

/// Emotions that pull the mood score down.
pub const MOOD_LOWERING: [Emotion; 11] = [
    Emotion::Sad,
    Emotion::Angry,
    Emotion::Anxious,
    Emotion::Lonely,
    Emotion::Guilty,
    Emotion::Hurt,
    Emotion::Scared,
    Emotion::Disappointed,
    Emotion::Overwhelmed,
    Emotion::Hopeless,
    Emotion::Insecure,
];

/// Emotions that lift the mood score.
pub const MOOD_RAISING: [Emotion; 8] = [
    Emotion::Happy,
    Emotion::Excited,
    Emotion::Proud,
    Emotion::Grateful,
    Emotion::Relieved,
    Emotion::Loved,
    Emotion::Hopeful,
    Emotion::Confident,
];

/// Emotions counted by the "persistent struggle" insight.
pub const INSIGHT_NEGATIVE: [Emotion; 5] = [
    Emotion::Sad,
    Emotion::Anxious,
    Emotion::Lonely,
    Emotion::Overwhelmed,
    Emotion::Hopeless,
];

impl Emotion {
    pub const ALL: [Emotion; 26] = [
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Anxious,
        Emotion::Lonely,
        Emotion::Guilty,
        Emotion::Jealous,
        Emotion::Disappointed,
        Emotion::Hurt,
        Emotion::Scared,
        Emotion::Confused,
        Emotion::Tired,
        Emotion::Overwhelmed,
        Emotion::Hopeless,
        Emotion::Insecure,
        Emotion::Happy,
        Emotion::Excited,
        Emotion::Proud,
        Emotion::Grateful,
        Emotion::Relieved,
        Emotion::Loved,
        Emotion::Hopeful,
        Emotion::Confident,
        Emotion::Bored,
        Emotion::Numb,
        Emotion::Nostalgic,
        Emotion::Curious,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Anxious => "anxious",
            Emotion::Lonely => "lonely",
            Emotion::Guilty => "guilty",
            Emotion::Jealous => "jealous",
            Emotion::Disappointed => "disappointed",
            Emotion::Hurt => "hurt",
            Emotion::Scared => "scared",
            Emotion::Confused => "confused",
            Emotion::Tired => "tired",
            Emotion::Overwhelmed => "overwhelmed",
            Emotion::Hopeless => "hopeless",
            Emotion::Insecure => "insecure",
            Emotion::Happy => "happy",
            Emotion::Excited => "excited",
            Emotion::Proud => "proud",
            Emotion::Grateful => "grateful",
            Emotion::Relieved => "relieved",
            Emotion::Loved => "loved",
            Emotion::Hopeful => "hopeful",
            Emotion::Confident => "confident",
            Emotion::Bored => "bored",
            Emotion::Numb => "numb",
            Emotion::Nostalgic => "nostalgic",
            Emotion::Curious => "curious",
        }
    }

    pub fn group(&self) -> EmotionGroup {
        match self {
            Emotion::Sad
            | Emotion::Angry
            | Emotion::Anxious
            | Emotion::Lonely
            | Emotion::Guilty
            | Emotion::Jealous
            | Emotion::Disappointed
            | Emotion::Hurt
            | Emotion::Scared
            | Emotion::Confused
            | Emotion::Tired
            | Emotion::Overwhelmed
            | Emotion::Hopeless
            | Emotion::Insecure => EmotionGroup::Negative,
            Emotion::Happy
            | Emotion::Excited
            | Emotion::Proud
            | Emotion::Grateful
            | Emotion::Relieved
            | Emotion::Loved
            | Emotion::Hopeful
            | Emotion::Confident => EmotionGroup::Positive,
            Emotion::Bored | Emotion::Numb | Emotion::Nostalgic | Emotion::Curious => {
                EmotionGroup::Complex
            }
        }
    }

    pub fn lowers_mood(&self) -> bool {
        MOOD_LOWERING.contains(self)
    }

    pub fn raises_mood(&self) -> bool {
        MOOD_RAISING.contains(self)
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse situational category, detected independently of emotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeContext {
    Breakup,
    FamilyIssue,
    AcademicStress,
    JobStress,
    Health,
    Financial,
}

impl LifeContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifeContext::Breakup => "breakup",
            LifeContext::FamilyIssue => "family_issue",
            LifeContext::AcademicStress => "academic_stress",
            LifeContext::JobStress => "job_stress",
            LifeContext::Health => "health",
            LifeContext::Financial => "financial",
        }
    }
}

impl fmt::Display for LifeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conversational intent. The first five are priority intents and are
/// checked before the keyword heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    SelfHarm,
    Greeting,
    Bye,
    Thanks,
    Insult,
    Exam,
    Study,
    Job,
    General,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::SelfHarm => "self_harm",
            Intent::Greeting => "greeting",
            Intent::Bye => "bye",
            Intent::Thanks => "thanks",
            Intent::Insult => "insult",
            Intent::Exam => "exam",
            Intent::Study => "study",
            Intent::Job => "job",
            Intent::General => "general",
        }
    }

    pub fn is_priority(&self) -> bool {
        matches!(
            self,
            Intent::SelfHarm | Intent::Greeting | Intent::Bye | Intent::Thanks | Intent::Insult
        )
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentMethod {
    Regex,
    Heuristic,
    Fallback,
}

/// Intent label plus how it was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntentPrediction {
    pub label: Intent,
    pub confidence: f32,
    pub method: IntentMethod,
}

impl IntentPrediction {
    pub fn priority(label: Intent) -> Self {
        Self {
            label,
            confidence: 1.0,
            method: IntentMethod::Regex,
        }
    }

    pub fn heuristic(label: Intent) -> Self {
        Self {
            label,
            confidence: 0.7,
            method: IntentMethod::Heuristic,
        }
    }

    pub fn general() -> Self {
        Self {
            label: Intent::General,
            confidence: 0.3,
            method: IntentMethod::Fallback,
        }
    }
}

/// Three-way polarity label produced by a sentiment analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn from_compound(compound: f32) -> Self {
        if compound > 0.05 {
            SentimentLabel::Positive
        } else if compound < -0.05 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        };
        f.write_str(s)
    }
}

/// Discrete bucket of the mood score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodState {
    VeryPositive,
    Positive,
    Neutral,
    Negative,
    VeryNegative,
}

impl MoodState {
    pub fn from_score(score: i32) -> Self {
        if score >= 7 {
            MoodState::VeryPositive
        } else if score >= 3 {
            MoodState::Positive
        } else if score >= -2 {
            MoodState::Neutral
        } else if score >= -6 {
            MoodState::Negative
        } else {
            MoodState::VeryNegative
        }
    }

    /// Console mood indicator.
    pub fn emoji(&self) -> &'static str {
        match self {
            MoodState::VeryPositive => "😊",
            MoodState::Positive => "🙂",
            MoodState::Neutral => "😐",
            MoodState::Negative => "😟",
            MoodState::VeryNegative => "😢",
        }
    }
}
