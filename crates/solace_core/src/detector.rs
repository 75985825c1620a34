//! Text → labels. Pure functions over the compiled lexicons.

use crate::labels::{Emotion, Intent, IntentPrediction, LifeContext, NEGATIVE_PRIORITY};
use crate::lexicon::{Lexicons, INTENSITY_MODIFIERS, NAME_BLOCKLIST};

/// Default weight when no intensity modifier is present.
pub const BASE_INTENSITY: f32 = 1.0;

/// Everything the detector extracts from one utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionResult {
    pub emotion: Option<Emotion>,
    pub intensity: f32,
    pub context: Option<LifeContext>,
    pub priority_intent: Option<Intent>,
    pub intent: IntentPrediction,
    /// Only looked for when neither an emotion nor a context was found.
    pub extracted_name: Option<String>,
}

pub struct Detector<'a> {
    lexicons: &'a Lexicons,
}

impl<'a> Detector<'a> {
    pub fn new(lexicons: &'a Lexicons) -> Self {
        Self { lexicons }
    }

    /// Run every detector over `text`.
    pub fn detect(&self, text: &str) -> DetectionResult {
        let (emotion, intensity) = self.detect_emotion(text);
        let context = self.detect_context(text);
        let priority_intent = self.check_priority_intent(text);
        let intent = self.classify_intent(text);
        let extracted_name = if emotion.is_none() && context.is_none() {
            self.extract_name(text)
        } else {
            None
        };

        tracing::debug!(
            emotion = ?emotion,
            intensity,
            context = ?context,
            intent = %intent.label,
            "Detection finished"
        );

        DetectionResult {
            emotion,
            intensity,
            context,
            priority_intent,
            intent,
            extracted_name,
        }
    }

    /// Emotion plus the weight of the first intensity modifier in the text.
    ///
    /// When several emotions match, the negative priority list decides;
    /// otherwise the first match in lexicon order wins.
    pub fn detect_emotion(&self, text: &str) -> (Option<Emotion>, f32) {
        let text = normalize(text);

        let intensity = INTENSITY_MODIFIERS
            .iter()
            .find(|(modifier, _)| text.contains(modifier))
            .map(|(_, weight)| *weight)
            .unwrap_or(BASE_INTENSITY);

        let found = self.lexicons.emotions.all_matches(&text);
        let Some(first) = found.first().copied() else {
            return (None, BASE_INTENSITY);
        };

        let emotion = NEGATIVE_PRIORITY
            .iter()
            .find(|e| found.contains(e))
            .copied()
            .unwrap_or(first);
        (Some(emotion), intensity)
    }

    pub fn detect_context(&self, text: &str) -> Option<LifeContext> {
        self.lexicons.contexts.first_match(&normalize(text))
    }

    pub fn check_priority_intent(&self, text: &str) -> Option<Intent> {
        self.lexicons.priority_intents.first_match(&normalize(text))
    }

    /// Priority intents first, then the exam / study / job keyword groups.
    pub fn classify_intent(&self, text: &str) -> IntentPrediction {
        if let Some(intent) = self.check_priority_intent(text) {
            return IntentPrediction::priority(intent);
        }
        match self.lexicons.heuristic_intents.first_match(&normalize(text)) {
            Some(intent) => IntentPrediction::heuristic(intent),
            None => IntentPrediction::general(),
        }
    }

    /// Name from an explicit introduction ("my name is …", "call me …").
    pub fn extract_name(&self, text: &str) -> Option<String> {
        let text = text.trim();
        self.lexicons
            .names
            .iter()
            .filter_map(|re| re.captures(text))
            .filter_map(|caps| caps.get(1).map(|m| title_case(m.as_str())))
            .find(|name| !NAME_BLOCKLIST.contains(&name.to_lowercase().as_str()))
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}
