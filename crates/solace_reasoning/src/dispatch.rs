use crate::templates::{
    context_catalog, emotion_catalog, intensity_prefix, intent_catalog, render, Catalog,
    TemplateVars, CRISIS_MESSAGE, FALLBACKS, LISTENING_PROMPT, NAME_INTRO,
};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use solace_core::content;
use solace_core::state::ContextEntry;
use solace_core::{
    DetectionResult, Detector, Emotion, Intent, LifeContext, Lexicons, SentimentLabel,
    SessionMemory, ToolTrigger,
};
use solace_limbic::{insight_kind, update_mood, InsightKind};
use std::sync::Arc;

/// Chance of voicing an available insight on a turn that reaches that stage.
pub const INSIGHT_PROBABILITY: f64 = 0.3;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("template references unknown placeholder '{placeholder}'")]
    Template { placeholder: String },
    #[error("no replies available for {0}")]
    EmptyCatalog(&'static str),
    #[error("{0:?} requested without a remembered emotion")]
    MissingEmotion(ToolTrigger),
}

// ============================================================================
// Branches
// ============================================================================

/// The family of reply chosen for a turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Branch {
    Crisis,
    Context(LifeContext),
    Emotion(Emotion),
    Intent(Intent),
    Insight(InsightKind),
    Tool(ToolTrigger),
    Fallback,
}

/// One analysed, non-empty user turn.
#[derive(Debug, Clone)]
pub struct Turn<'a> {
    pub text: &'a str,
    pub detection: DetectionResult,
    /// Tool keywords found in the raw text, in table order.
    pub tools: Vec<ToolTrigger>,
}

// ============================================================================
// Decision table
// ============================================================================

type Guard = fn(&Turn<'_>, &SessionMemory, &mut dyn RngCore) -> Option<Branch>;

pub struct Rule {
    pub name: &'static str,
    guard: Guard,
}

/// Evaluated top to bottom; the first guard that yields a branch wins.
pub const RULES: &[Rule] = &[
    Rule { name: "crisis", guard: crisis },
    Rule { name: "context", guard: life_context },
    Rule { name: "emotion", guard: emotion },
    Rule { name: "intent", guard: intent },
    Rule { name: "insight", guard: insight },
    Rule { name: "tool", guard: tool },
    Rule { name: "fallback", guard: fallback },
];

fn crisis(turn: &Turn<'_>, _: &SessionMemory, _: &mut dyn RngCore) -> Option<Branch> {
    (turn.detection.priority_intent == Some(Intent::SelfHarm)).then_some(Branch::Crisis)
}

fn life_context(turn: &Turn<'_>, _: &SessionMemory, _: &mut dyn RngCore) -> Option<Branch> {
    let context = turn.detection.context?;
    let emotion = turn.detection.emotion;
    let qualifies = match context {
        LifeContext::Breakup => true,
        LifeContext::FamilyIssue => {
            matches!(emotion, Some(Emotion::Angry | Emotion::Hurt | Emotion::Sad))
        }
        LifeContext::AcademicStress => matches!(
            emotion,
            Some(Emotion::Anxious | Emotion::Overwhelmed | Emotion::Scared)
        ),
        LifeContext::JobStress => matches!(
            emotion,
            Some(Emotion::Anxious | Emotion::Overwhelmed | Emotion::Angry | Emotion::Insecure)
        ),
        LifeContext::Health | LifeContext::Financial => false,
    };
    qualifies.then_some(Branch::Context(context))
}

fn emotion(turn: &Turn<'_>, _: &SessionMemory, _: &mut dyn RngCore) -> Option<Branch> {
    turn.detection.emotion.map(Branch::Emotion)
}

fn intent(turn: &Turn<'_>, _: &SessionMemory, _: &mut dyn RngCore) -> Option<Branch> {
    match turn.detection.intent.label {
        label @ (Intent::Greeting
        | Intent::Bye
        | Intent::Thanks
        | Intent::Exam
        | Intent::Study
        | Intent::Job) => Some(Branch::Intent(label)),
        _ => None,
    }
}

fn insight(_: &Turn<'_>, memory: &SessionMemory, rng: &mut dyn RngCore) -> Option<Branch> {
    // Only spend randomness when there is something to say.
    let kind = insight_kind(memory)?;
    rng.gen_bool(INSIGHT_PROBABILITY).then_some(Branch::Insight(kind))
}

fn tool(turn: &Turn<'_>, memory: &SessionMemory, _: &mut dyn RngCore) -> Option<Branch> {
    turn.tools
        .iter()
        .copied()
        .find(|t| match t {
            ToolTrigger::Tips | ToolTrigger::Affirmation => memory.last_emotion.is_some(),
            ToolTrigger::Breathe | ToolTrigger::Ground => true,
        })
        .map(Branch::Tool)
}

fn fallback(_: &Turn<'_>, _: &SessionMemory, _: &mut dyn RngCore) -> Option<Branch> {
    Some(Branch::Fallback)
}

/// Pick the branch for `turn`. Reads memory, never writes it.
pub fn decide(turn: &Turn<'_>, memory: &SessionMemory, rng: &mut dyn RngCore) -> Branch {
    for rule in RULES {
        if let Some(branch) = (rule.guard)(turn, memory, rng) {
            tracing::debug!(rule = rule.name, ?branch, "Dispatch rule matched");
            return branch;
        }
    }
    Branch::Fallback
}

fn pick(
    rng: &mut dyn RngCore,
    catalog: &'static [&'static str],
    what: &'static str,
) -> Result<&'static str, DispatchError> {
    catalog
        .choose(rng)
        .copied()
        .ok_or(DispatchError::EmptyCatalog(what))
}

// ============================================================================
// Dispatcher
// ============================================================================

/// Runs the staged pipeline for one message against a borrowed memory.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    lexicons: Arc<Lexicons>,
    bot_name: String,
}

impl Dispatcher {
    pub fn new(lexicons: Arc<Lexicons>, bot_name: impl Into<String>) -> Self {
        Self {
            lexicons,
            bot_name: bot_name.into(),
        }
    }

    pub fn bot_name(&self) -> &str {
        &self.bot_name
    }

    /// Produce the reply for `text`, updating `memory` along the way.
    ///
    /// Mutations made before a failing stage stay applied.
    pub fn generate_reply(
        &self,
        memory: &mut SessionMemory,
        text: &str,
        sentiment: Option<SentimentLabel>,
        rng: &mut dyn RngCore,
    ) -> Result<String, DispatchError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(LISTENING_PROMPT.to_string());
        }

        let detection = Detector::new(&self.lexicons).detect(text);
        update_mood(memory, sentiment, detection.emotion, detection.intensity);

        // A crisis message must never be swallowed by the name stage.
        if detection.priority_intent != Some(Intent::SelfHarm) {
            if let Some(name) = detection.extracted_name.as_deref() {
                memory.username = Some(name.to_string());
                memory.bump_relationship(1);
                tracing::info!(name, "Learned user name");
                return self.render(NAME_INTRO, memory, 1.0);
            }
        }

        record_turn(memory, text, &detection, sentiment);

        let tools = self.lexicons.tools.all_matches(text);
        let turn = Turn {
            text,
            detection,
            tools,
        };
        let branch = decide(&turn, memory, rng);
        self.apply(branch, &turn, memory, rng)
    }

    /// Run `branch`'s side effects and render its reply.
    pub fn apply(
        &self,
        branch: Branch,
        turn: &Turn<'_>,
        memory: &mut SessionMemory,
        rng: &mut dyn RngCore,
    ) -> Result<String, DispatchError> {
        let intensity = turn.detection.intensity;
        match branch {
            Branch::Crisis => Ok(CRISIS_MESSAGE.to_string()),
            Branch::Context(context) => match context_catalog(context) {
                Some(catalog) => self.render_catalog(catalog, context.as_str(), memory, intensity, rng),
                None => Err(DispatchError::EmptyCatalog(context.as_str())),
            },
            Branch::Emotion(emotion) => {
                match emotion {
                    Emotion::Happy | Emotion::Excited | Emotion::Proud | Emotion::Grateful => {
                        memory.bump_relationship(1)
                    }
                    Emotion::Loved => memory.bump_relationship(2),
                    Emotion::Hopeless => memory.set_mood(solace_core::state::MOOD_MIN),
                    Emotion::Hopeful | Emotion::Confident => memory.adjust_mood(2),
                    _ => {}
                }
                self.render_catalog(emotion_catalog(emotion), emotion.as_str(), memory, intensity, rng)
            }
            Branch::Intent(intent) => {
                // Greeting warmth is judged before this turn's bump.
                let catalog = intent_catalog(intent, memory.relationship_level)
                    .ok_or(DispatchError::EmptyCatalog(intent.as_str()))?;
                match intent {
                    Intent::Bye | Intent::Thanks => memory.bump_relationship(1),
                    Intent::Exam | Intent::Study | Intent::Job => memory.last_topic = Some(intent),
                    _ => {}
                }
                let template = pick(rng, catalog, intent.as_str())?;
                self.render(template, memory, intensity)
            }
            Branch::Insight(kind) => Ok(kind.message().to_string()),
            Branch::Tool(trigger) => self.tool_reply(trigger, memory, rng),
            Branch::Fallback => {
                let template = pick(rng, FALLBACKS, "fallback")?;
                self.render(template, memory, intensity)
            }
        }
    }

    fn tool_reply(
        &self,
        trigger: ToolTrigger,
        memory: &SessionMemory,
        rng: &mut dyn RngCore,
    ) -> Result<String, DispatchError> {
        let reply = match trigger {
            ToolTrigger::Breathe => content::breathing_exercise(rng),
            ToolTrigger::Ground => content::grounding_exercise(),
            ToolTrigger::Tips => {
                let emotion = memory
                    .last_emotion
                    .ok_or(DispatchError::MissingEmotion(trigger))?;
                content::support_tips(emotion)
            }
            ToolTrigger::Affirmation => {
                let emotion = memory
                    .last_emotion
                    .ok_or(DispatchError::MissingEmotion(trigger))?;
                content::affirmation(emotion, rng)
            }
        };
        Ok(reply.to_string())
    }

    fn render_catalog(
        &self,
        catalog: Catalog,
        what: &'static str,
        memory: &SessionMemory,
        intensity: f32,
        rng: &mut dyn RngCore,
    ) -> Result<String, DispatchError> {
        let template = pick(rng, catalog.templates, what)?;
        let mut reply = self.render(template, memory, intensity)?;
        if let Some(suffix) = catalog.suffix {
            reply.push_str(suffix);
        }
        Ok(reply)
    }

    fn render(
        &self,
        template: &str,
        memory: &SessionMemory,
        intensity: f32,
    ) -> Result<String, DispatchError> {
        let vars = TemplateVars {
            intensity: intensity_prefix(intensity),
            name: memory.username.as_deref(),
            bot: &self.bot_name,
        };
        render(template, &vars)
    }
}

fn record_turn(
    memory: &mut SessionMemory,
    text: &str,
    detection: &DetectionResult,
    sentiment: Option<SentimentLabel>,
) {
    memory.turn_count += 1;
    memory.push_context(ContextEntry::Turn {
        user: text.to_string(),
        intent: detection.intent.label,
        emotion: detection.emotion,
        intensity: detection.intensity,
        context: detection.context,
        sentiment,
    });
    if let Some(emotion) = detection.emotion {
        memory.last_emotion = Some(emotion);
        memory.last_emotion_intensity = detection.intensity;
    }
}
