//! Ordered pattern tables.
//!
//! Every table is a `Vec` of `(label, pattern)` pairs scanned front to back.
//! First-match-wins is part of the contract, so these are never hash maps.

use crate::labels::{Emotion, Intent, LifeContext};
use regex::Regex;
use std::sync::{Arc, OnceLock};

#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("invalid pattern for '{label}': {source}")]
    InvalidPattern {
        label: String,
        #[source]
        source: regex::Error,
    },
}

// ============================================================================
// Source tables
// ============================================================================

const EMOTION_PATTERNS: &[(Emotion, &str)] = &[
    (Emotion::Sad, r"\b(sad|depressed|down|unhappy|miserable|crying|heartbroken|gloomy|blue|tears|weeping)\b"),
    (Emotion::Angry, r"\b(angry|mad|furious|pissed|rage|annoyed|irritated|frustrated|livid|outraged)\b"),
    (Emotion::Anxious, r"\b(anxious|worried|nervous|stressed|overwhelmed|panic|tense|uneasy|restless|on edge)\b"),
    (Emotion::Lonely, r"\b(lonely|alone|isolated|nobody|no one cares|feel empty|abandoned|disconnected)\b"),
    (Emotion::Guilty, r"\b(guilty|ashamed|regret|fault|bad person|messed up|shouldn't have|feel terrible about)\b"),
    (Emotion::Jealous, r"\b(jealous|envious|envy|they have|wish i had|not fair|why them|comparing myself)\b"),
    (Emotion::Disappointed, r"\b(disappointed|let down|expected more|failed|didn't work out|upset about|bummed)\b"),
    (Emotion::Hurt, r"\b(hurt|wounded|betrayed|backstabbed|used|taken advantage|disrespected)\b"),
    (Emotion::Scared, r"\b(scared|afraid|terrified|fearful|frightened|paranoid|dread|horrified)\b"),
    (Emotion::Confused, r"\b(confused|lost|don't understand|unclear|puzzled|bewildered|mixed up|disoriented)\b"),
    (Emotion::Tired, r"\b(tired|exhausted|drained|burnt out|burnout|fatigue|no energy|can't anymore|worn out)\b"),
    (Emotion::Overwhelmed, r"\b(overwhelmed|too much|can't handle|drowning|suffocating|buried|swamped)\b"),
    (Emotion::Hopeless, r"\b(hopeless|no point|give up|pointless|nothing matters|no way out|can't see future)\b"),
    (Emotion::Insecure, r"\b(insecure|not good enough|inadequate|unworthy|don't deserve|not capable)\b"),
    (Emotion::Happy, r"\b(happy|joy|joyful|cheerful|delighted|pleased|content|blessed|thrilled)\b"),
    (Emotion::Excited, r"\b(excited|thrilled|pumped|stoked|can't wait|eager|enthusiastic|amped|hyped)\b"),
    (Emotion::Proud, r"\b(proud|accomplished|achieved|nailed it|did it|success|won|victory|made it)\b"),
    (Emotion::Grateful, r"\b(grateful|thankful|blessed|appreciate|lucky|fortunate|privilege)\b"),
    (Emotion::Relieved, r"\b(relieved|relief|finally|glad it's over|off my chest|weight lifted|phew)\b"),
    (Emotion::Loved, r"\b(loved|appreciated|valued|cherished|supported|cared for|matter to someone)\b"),
    (Emotion::Hopeful, r"\b(hopeful|optimistic|looking forward|excited for|things will|get better|positive about)\b"),
    (Emotion::Confident, r"\b(confident|self-assured|can do|believe in myself|got this|ready|prepared)\b"),
    (Emotion::Bored, r"\b(bored|boring|nothing to do|dull|monotonous|uninteresting|restless|idle)\b"),
    (Emotion::Numb, r"\b(numb|empty|void|hollow|feel nothing|don't feel|emotionless|detached)\b"),
    (Emotion::Nostalgic, r"\b(nostalgic|miss|used to|remember when|back then|old days|memories)\b"),
    (Emotion::Curious, r"\b(curious|wonder|wondering|interested|want to know|question|intrigued)\b"),
];

/// Intensity modifiers, matched as plain substrings in this order.
pub const INTENSITY_MODIFIERS: &[(&str, f32)] = &[
    ("very", 2.0),
    ("extremely", 2.5),
    ("really", 1.8),
    ("so", 1.7),
    ("incredibly", 2.2),
    ("slightly", 0.5),
    ("a bit", 0.6),
    ("little", 0.7),
    ("somewhat", 0.8),
    ("kinda", 0.7),
];

const PRIORITY_INTENT_PATTERNS: &[(Intent, &str)] = &[
    (Intent::SelfHarm, r"\b(kill myself|suicide|end my life|want to die|self harm|hurt myself|don't want to live)\b"),
    (Intent::Greeting, r"\b(hi|hello|hey|namaste|good morning|good evening|yo|sup|wassup|hola)\b"),
    (Intent::Bye, r"\b(bye|goodbye|see you|take care|farewell|gotta go|later)\b"),
    (Intent::Thanks, r"\b(thanks?|thank you|appreciate|tyvm|grateful|thx)\b"),
    (Intent::Insult, r"\b(stupid|idiot|you suck|dumb|trash|worthless|useless|shut up)\b"),
];

const HEURISTIC_INTENT_PATTERNS: &[(Intent, &str)] = &[
    (Intent::Exam, r"(exam|test|quiz|midterm|final)"),
    (Intent::Study, r"(study|studying|learn|revision)"),
    (Intent::Job, r"(job|interview|career|resume)"),
];

const CONTEXT_PATTERNS: &[(LifeContext, &str)] = &[
    (LifeContext::Breakup, r"\b(broke up|breakup|break up|left me|dumped|ended things|relationship ended|girlfriend left|boyfriend left|ex girlfriend|ex boyfriend|we're done|she left|he left)\b"),
    (LifeContext::FamilyIssue, r"\b(parents|mom|dad|family|sibling|brother|sister|fight with|argument with family)\b"),
    (LifeContext::AcademicStress, r"\b(exam|test|assignment|project|grade|marks|fail|study|course|professor|teacher)\b"),
    (LifeContext::JobStress, r"\b(job|work|boss|colleague|interview|fired|quit|promotion|salary|career)\b"),
    (LifeContext::Health, r"\b(sick|ill|health|doctor|hospital|pain|disease|diagnosis)\b"),
    (LifeContext::Financial, r"\b(money|broke|debt|loan|bills|afford|financial|income|expense)\b"),
];

const NAME_PATTERNS: &[&str] = &[
    r"my name is ([A-Za-z]{1,15})",
    r"i am ([A-Za-z]{1,15})",
    r"i'm ([A-Za-z]{1,15})",
    r"call me ([A-Za-z]{1,15})",
    r"this is ([A-Za-z]{1,15})",
];

/// Words that look like a name after "I am ..." but describe a state instead.
pub const NAME_BLOCKLIST: &[&str] = &[
    "feeling", "sad", "happy", "angry", "good", "bad", "fine", "okay", "well", "great",
    "terrible", "stressed", "tired", "confused", "lost", "studying", "working", "learning",
    "thinking", "going", "doing", "lonely", "excited", "proud", "hurt", "scared", "anxious",
    "guilty",
];

/// On-demand helpers the user can ask for by keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolTrigger {
    Tips,
    Breathe,
    Ground,
    Affirmation,
}

const TOOL_PATTERNS: &[(ToolTrigger, &str)] = &[
    (ToolTrigger::Tips, r"tips?|help|coping|strategies|advice"),
    (ToolTrigger::Breathe, r"breath|breathing|calm|relax"),
    (ToolTrigger::Ground, r"ground|grounding|present"),
    (ToolTrigger::Affirmation, r"affirmation|remind me|support|encouragement"),
];

// ============================================================================
// Compiled tables
// ============================================================================

/// An ordered, compiled `(label, pattern)` table.
#[derive(Debug, Clone)]
pub struct Lexicon<L> {
    entries: Vec<(L, Regex)>,
}

impl<L: Copy + std::fmt::Debug> Lexicon<L> {
    /// Compile a source table case-insensitively, preserving its order.
    pub fn compile(source: &[(L, &str)]) -> Result<Self, LexiconError> {
        let entries = source
            .iter()
            .map(|(label, pattern)| {
                Regex::new(&format!("(?i){}", pattern))
                    .map(|re| (*label, re))
                    .map_err(|source| LexiconError::InvalidPattern {
                        label: format!("{:?}", label),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    /// First label whose pattern matches anywhere in `text`.
    pub fn first_match(&self, text: &str) -> Option<L> {
        self.entries
            .iter()
            .find(|(_, re)| re.is_match(text))
            .map(|(label, _)| *label)
    }

    /// Every matching label, in table order.
    pub fn all_matches(&self, text: &str) -> Vec<L> {
        self.entries
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(label, _)| *label)
            .collect()
    }

    /// Whether `label`'s pattern matches `text`.
    pub fn matches(&self, label: L, text: &str) -> bool
    where
        L: PartialEq,
    {
        self.entries
            .iter()
            .any(|(l, re)| *l == label && re.is_match(text))
    }

    pub fn labels(&self) -> impl Iterator<Item = L> + '_ {
        self.entries.iter().map(|(label, _)| *label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All immutable pattern tables, compiled once and shared between sessions.
#[derive(Debug, Clone)]
pub struct Lexicons {
    pub emotions: Lexicon<Emotion>,
    pub contexts: Lexicon<LifeContext>,
    pub priority_intents: Lexicon<Intent>,
    pub heuristic_intents: Lexicon<Intent>,
    pub tools: Lexicon<ToolTrigger>,
    pub names: Vec<Regex>,
}

static SHARED: OnceLock<Arc<Lexicons>> = OnceLock::new();

impl Lexicons {
    pub fn build() -> Result<Self, LexiconError> {
        let names = NAME_PATTERNS
            .iter()
            .map(|p| {
                Regex::new(&format!("(?i){}", p)).map_err(|source| LexiconError::InvalidPattern {
                    label: "name".to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            emotions: Lexicon::compile(EMOTION_PATTERNS)?,
            contexts: Lexicon::compile(CONTEXT_PATTERNS)?,
            priority_intents: Lexicon::compile(PRIORITY_INTENT_PATTERNS)?,
            heuristic_intents: Lexicon::compile(HEURISTIC_INTENT_PATTERNS)?,
            tools: Lexicon::compile(TOOL_PATTERNS)?,
            names,
        })
    }

    /// Process-wide compiled tables. Built on first use.
    pub fn shared() -> Result<Arc<Lexicons>, LexiconError> {
        if let Some(lexicons) = SHARED.get() {
            return Ok(lexicons.clone());
        }
        let built = Arc::new(Self::build()?);
        Ok(SHARED.get_or_init(|| built).clone())
    }
}
