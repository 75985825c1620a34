//! Fixed reply catalogs and the placeholder renderer.
//!
//! Placeholders: `{intensity}` (intensity lead-in), `{name}`,
//! `{name_prefix}` ("Alex, "), `{name_suffix}` (", Alex"),
//! `{name_sp}` (" Alex") and `{bot}`. Each expands to an empty string when
//! the session has no name.

use crate::dispatch::DispatchError;
use solace_core::{Emotion, Intent, LifeContext};

/// Replies from one catalog, plus an optional fixed trailer.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    pub templates: &'static [&'static str],
    pub suffix: Option<&'static str>,
}

impl Catalog {
    const fn plain(templates: &'static [&'static str]) -> Self {
        Self {
            templates,
            suffix: None,
        }
    }

    const fn with_suffix(templates: &'static [&'static str], suffix: &'static str) -> Self {
        Self {
            templates,
            suffix: Some(suffix),
        }
    }
}

/// Values substituted into a template.
#[derive(Debug, Clone, Copy)]
pub struct TemplateVars<'a> {
    pub intensity: &'a str,
    pub name: Option<&'a str>,
    pub bot: &'a str,
}

/// Lead-in that reflects how strongly something was said.
pub fn intensity_prefix(intensity: f32) -> &'static str {
    if intensity >= 2.0 {
        "I can really sense "
    } else if intensity <= 0.7 {
        "I hear "
    } else {
        ""
    }
}

/// Expand every `{placeholder}` in `template`.
pub fn render(template: &str, vars: &TemplateVars<'_>) -> Result<String, DispatchError> {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find('}').ok_or_else(|| DispatchError::Template {
            placeholder: after.chars().take(16).collect(),
        })?;
        let key = &after[..close];
        match (key, vars.name) {
            ("intensity", _) => out.push_str(vars.intensity),
            ("bot", _) => out.push_str(vars.bot),
            ("name", Some(n)) => out.push_str(n),
            ("name_prefix", Some(n)) => {
                out.push_str(n);
                out.push_str(", ");
            }
            ("name_suffix", Some(n)) => {
                out.push_str(", ");
                out.push_str(n);
            }
            ("name_sp", Some(n)) => {
                out.push(' ');
                out.push_str(n);
            }
            ("name" | "name_prefix" | "name_suffix" | "name_sp", None) => {}
            _ => {
                return Err(DispatchError::Template {
                    placeholder: key.to_string(),
                })
            }
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

// ============================================================================
// Fixed replies
// ============================================================================

pub const LISTENING_PROMPT: &str = "I'm listening... what would you like to talk about?";

pub const NAME_INTRO: &str = "Nice to meet you, {name}! I'm {bot}. How are you doing today?";

pub const CRISIS_MESSAGE: &str = "I'm deeply concerned about you. Your safety is THE most important thing.

Please reach out NOW:
🇮🇳 iCALL: 9152987821 (call/WhatsApp, 24/7)
🇮🇳 Local emergency: 112 or go to nearest hospital
💙 Tell someone you trust immediately

These feelings are overwhelming but they're NOT permanent. You deserve help and support.

I'm here too. Can you tell me what's happening?";

pub const FALLBACKS: &[&str] = &[
    "{name_prefix}I'm listening. Tell me more?",
    "{name_prefix}Interesting. What else is on your mind?",
    "I'm here. Keep going — what happened next?",
    "I hear you. How does that make you feel?",
    "That's important to you. Tell me more about that.",
    "Go on. I'm with you. What are you thinking?",
    "{name_prefix}That sounds significant. Want to explore that more?",
];

// ============================================================================
// Life-context catalogs
// ============================================================================

const BREAKUP: &[&str] = &[
    "Breakups cut deep, especially when it's someone you really cared about. {name_prefix}What hurts the most right now?",
    "That sounds incredibly painful. When someone we love walks away, it feels like the ground's been pulled from under us. {name_prefix}Do you want to tell me what happened?",
    "I hear you. Losing a relationship can feel devastating. {name_prefix}How are you holding up? What's going through your mind?",
    "{intensity}the pain of the breakup. It's one of the hardest things to go through. You don't have to be strong right now — it's okay to hurt. Want to talk about it?",
    "When someone leaves, it's normal to feel shattered. {name_prefix}I'm here. Do you want to talk about how it ended, or just how you're feeling?",
];

const FAMILY_ISSUE: &[&str] = &[
    "Family conflicts hit different — they're so personal. {name_prefix}What happened? I'm listening.",
    "Arguments with family can be especially painful because we care so much. {name_prefix}Want to talk about what's going on?",
    "{intensity}the tension with your family. That's exhausting. What happened?",
];

const ACADEMIC_STRESS: &[&str] = &[
    "Academic pressure can be crushing. {name_prefix}What's got you stressed? Maybe we can break it down together.",
    "{intensity}the exam anxiety. That racing mind before a test is rough. When's the exam? How are you preparing?",
    "School stress is no joke. {name_prefix}Tell me what's overwhelming you — assignments, exams, grades? Let's tackle it.",
];

const JOB_STRESS: &[&str] = &[
    "Work stress can bleed into everything. {name_prefix}What's happening at your job? Tell me more.",
    "{intensity}the pressure from work. That can be draining. What's going on?",
    "Job stuff is tough — it affects so much of our lives. {name_prefix}Want to vent about what's bothering you?",
];

/// Catalog for a life context. Health and financial have none and fall
/// through to the emotion stage.
pub fn context_catalog(context: LifeContext) -> Option<Catalog> {
    match context {
        LifeContext::Breakup => Some(Catalog::with_suffix(
            BREAKUP,
            "\n\n💙 *Say 'tips' for healing strategies or 'breathe' to calm down.*",
        )),
        LifeContext::FamilyIssue => Some(Catalog::plain(FAMILY_ISSUE)),
        LifeContext::AcademicStress => Some(Catalog::plain(ACADEMIC_STRESS)),
        LifeContext::JobStress => Some(Catalog::plain(JOB_STRESS)),
        LifeContext::Health | LifeContext::Financial => None,
    }
}

// ============================================================================
// Emotion catalogs
// ============================================================================

pub fn emotion_catalog(emotion: Emotion) -> Catalog {
    match emotion {
        Emotion::Sad => Catalog::with_suffix(
            &[
                "{intensity}you're feeling sad{name_suffix}. That's really tough. What's weighing on you? I'm here.",
                "{intensity}the sadness in your words. Want to talk about what happened? Sometimes it helps.",
                "I'm sorry you're going through this{name_suffix}. Sadness is hard. What's making you feel this way?",
                "It's okay to not be okay. {name_prefix}Tell me what's on your heart.",
            ],
            "\n\n💙 *Say 'tips' for coping strategies, 'breathe' for calming, or 'affirmation' for support.*",
        ),
        Emotion::Anxious => Catalog::with_suffix(
            &[
                "{intensity}the anxiety{name_suffix}. That's really uncomfortable. What's making you feel anxious right now?",
                "Anxiety is tough to sit with. {name_prefix}I'm here. Want to talk about what's worrying you?",
                "{intensity}you're feeling on edge. That's exhausting. What's going through your mind?",
                "Racing thoughts? Tight chest? Anxiety's the worst. {name_prefix}Talk to me — what's triggering this?",
            ],
            "\n\n💙 *Try 'breathe' for exercise, 'ground' for grounding, or 'tips' for strategies.*",
        ),
        Emotion::Angry => Catalog::with_suffix(
            &[
                "{intensity}you're angry{name_suffix}. That's valid — anger tells us something matters. What happened?",
                "I hear the frustration. It's okay to be mad. {name_prefix}Want to vent about what's pissing you off?",
                "{intensity}the anger in your words. You have every right to feel this way. What's going on?",
                "Sometimes we just need to let it out. {name_prefix}I'm listening — tell me what happened.",
            ],
            "\n\n💙 *Say 'tips' for anger management, or just keep talking — I'm listening.*",
        ),
        Emotion::Lonely => Catalog::with_suffix(
            &[
                "{intensity}you're feeling lonely{name_suffix}. That's one of the hardest feelings. You're not alone right now — I'm here. What's making you feel this way?",
                "Loneliness is so painful. {name_prefix}I'm with you. Want to talk about it?",
                "I hear you. Feeling alone is heavy{name_suffix}. Tell me more.",
                "Being lonely doesn't mean you're unlovable — it just means you're human. {name_prefix}I'm here. Talk to me.",
            ],
            "\n\n💙 *Say 'tips' for connection ideas, or just chat — I'm here for you.*",
        ),
        Emotion::Overwhelmed => Catalog::with_suffix(
            &[
                "{intensity}you're overwhelmed{name_suffix}. That's a lot to carry. Let's break it down — what's the biggest thing on your mind?",
                "Feeling overwhelmed is exhausting. {name_prefix}I'm here. What's making you feel buried?",
                "Too much at once can be suffocating. {name_prefix}Let's tackle this together — what's one thing stressing you most?",
                "When everything piles up, it's hard to breathe. {name_prefix}Talk to me — what's overwhelming you?",
            ],
            "\n\n💙 *Say 'tips' for overwhelm strategies.*",
        ),
        Emotion::Hopeless => Catalog::plain(&[
            "{intensity}you're feeling hopeless{name_suffix}. I'm really concerned. That's such a heavy feeling.

Please reach out to someone right now:
• A friend or family member
• A counselor or therapist
• iCALL: 9152987821 (call/WhatsApp)
• Local crisis helpline

These feelings are real but they're NOT the truth. You matter. Your life matters. I'm here too.

What's making you feel this way? Let's talk.",
        ]),
        Emotion::Guilty => Catalog::with_suffix(
            &[
                "{intensity}you're carrying guilt{name_suffix}. That's a heavy burden. What happened that's making you feel this way?",
                "Guilt can be so consuming. {name_prefix}Want to talk about what you're feeling bad about? I won't judge.",
                "I hear the guilt. You're being hard on yourself. {name_prefix}What's going on?",
            ],
            "\n\n💙 *Say 'tips' for managing guilt, or 'affirmation' for support.*",
        ),
        Emotion::Jealous => Catalog::with_suffix(
            &[
                "{intensity}you're feeling jealous. That's honest and real. {name_prefix}What's making you feel this way?",
                "Jealousy is uncomfortable but it's human. {name_prefix}Want to talk about what's triggering this?",
                "I hear you. Comparison can be painful. What's going on?",
            ],
            "\n\n💙 Sometimes jealousy shows us what we want. Let's explore that.",
        ),
        Emotion::Disappointed => Catalog::plain(&[
            "{intensity}you're disappointed. That stings. {name_prefix}What didn't go the way you hoped?",
            "Disappointment hurts{name_suffix}. I'm sorry. What happened?",
            "I hear the letdown. That's tough. Want to talk about it?",
        ]),
        Emotion::Hurt => Catalog::plain(&[
            "{intensity}you're hurt. That's painful, especially when it comes from someone you care about. {name_prefix}What happened?",
            "Feeling hurt is one of the deepest pains. {name_prefix}I'm here. Who or what hurt you?",
            "I'm sorry you're feeling hurt. That's real pain. Want to talk about it?",
        ]),
        Emotion::Scared => Catalog::with_suffix(
            &[
                "{intensity}you're scared. Fear is so uncomfortable. {name_prefix}What's frightening you?",
                "I hear the fear. That's a real feeling. Want to talk about what's scaring you?",
                "Being scared is hard. {name_prefix}You're safe talking to me. What's going on?",
            ],
            "\n\n💙 *Say 'breathe' for calming, or 'ground' to feel present.*",
        ),
        Emotion::Confused => Catalog::plain(&[
            "{intensity}you're confused. That's disorienting. {name_prefix}What's unclear? Maybe talking it through will help.",
            "Confusion is uncomfortable. Let's untangle this together — what's puzzling you?",
            "I hear the confusion. Sometimes talking helps clarify. What's on your mind?",
        ]),
        Emotion::Tired => Catalog::with_suffix(
            &[
                "{intensity}you're exhausted. That's draining. {name_prefix}What's wearing you out?",
                "Being tired — physically or emotionally — is real. What's taking your energy?",
                "I hear you're drained. Burnout is no joke. What's going on?",
            ],
            "\n\n💙 *Say 'tips' for energy restoration.*",
        ),
        Emotion::Insecure => Catalog::with_suffix(
            &[
                "{intensity}you're feeling insecure. Those thoughts can be so loud. {name_prefix}What's making you doubt yourself?",
                "Insecurity is painful. You're not alone in feeling this. What's triggering it?",
                "I hear the self-doubt. That's hard. Want to talk about what's making you feel not good enough?",
            ],
            "\n\n💙 *Say 'affirmation' for a reminder of your worth.*",
        ),
        Emotion::Numb => Catalog::plain(&[
            "{intensity}you're feeling numb or empty. That disconnection is real. {name_prefix}What's going on?",
            "Emotional numbness can be a sign you're overwhelmed. I'm here. What happened?",
            "Feeling nothing can be scarier than feeling pain. Want to talk about what led to this?",
        ]),
        Emotion::Happy => Catalog::plain(&[
            "{intensity}you're happy! That's wonderful! {name_prefix}What's bringing you joy?",
            "I love hearing this! What's making you feel good?",
            "Yes! Happiness looks good on you! Tell me what happened!",
        ]),
        Emotion::Excited => Catalog::plain(&[
            "{intensity}you're excited! I can feel the energy! {name_prefix}What's happening?!",
            "That excitement is contagious! Tell me everything!",
            "Yes! What are you pumped about?!",
        ]),
        Emotion::Proud => Catalog::with_suffix(
            &[
                "{intensity}you're proud — and you SHOULD be! {name_prefix}What did you accomplish?",
                "Hell yes! Tell me what you achieved! You deserve to celebrate!",
                "That's amazing! I'm proud of you too! What happened?",
            ],
            "\n\n💙 *Say 'tips' to make sure you really celebrate this win!*",
        ),
        Emotion::Grateful => Catalog::plain(&[
            "{intensity}gratitude in your words. That's beautiful. {name_prefix}What are you thankful for?",
            "Gratitude is powerful. What's making you feel blessed?",
            "I love this energy. What happened that you're grateful for?",
        ]),
        Emotion::Relieved => Catalog::plain(&[
            "{intensity}you're relieved! That must feel like a weight lifted. {name_prefix}What resolved?",
            "Phew! Relief is such a good feeling. What's finally over?",
            "I can feel the exhale. What were you worried about that's now okay?",
        ]),
        Emotion::Loved => Catalog::plain(&[
            "{intensity}you're feeling loved and appreciated! That's so heartwarming! {name_prefix}Who's making you feel this way?",
            "Being loved and valued is everything. Tell me more!",
            "That's beautiful. Feeling cherished is so important. What happened?",
        ]),
        Emotion::Hopeful => Catalog::plain(&[
            "{intensity}you're feeling hopeful! That's such a positive shift! {name_prefix}What's giving you hope?",
            "Hope is powerful. I'm glad you're feeling this way. What changed?",
            "Yes! Optimism looks good on you! What are you hopeful about?",
        ]),
        Emotion::Confident => Catalog::plain(&[
            "{intensity}you're feeling confident! That's amazing! {name_prefix}What's giving you this boost?",
            "Yes! That confidence is showing! What are you ready for?",
            "I love this energy! What's making you feel self-assured?",
        ]),
        Emotion::Bored => Catalog::plain(&[
            "{intensity}you're bored. That restlessness is real. {name_prefix}What would make things more interesting for you?",
            "Boredom can be uncomfortable. Want suggestions for something to do, or just need to vent?",
            "I hear you. Nothing capturing your interest? What usually excites you?",
        ]),
        Emotion::Nostalgic => Catalog::plain(&[
            "{intensity}you're feeling nostalgic. Memories can be bittersweet. {name_prefix}What are you remembering?",
            "Nostalgia is that mix of happiness and longing. What's on your mind from the past?",
            "I hear you looking back. What memory came up?",
        ]),
        Emotion::Curious => Catalog::plain(&[
            "{intensity}you're curious! I love that! {name_prefix}What do you want to know?",
            "Curiosity is great! What's got you wondering?",
            "I'm intrigued! What question is on your mind?",
        ]),
    }
}

// ============================================================================
// Intent catalogs
// ============================================================================

const GREETING_WARM: &[&str] = &[
    "Hey{name_sp}! Good to see you again! How are you feeling today?",
    "Hi{name_sp}! Welcome back! What's going on with you?",
];

const GREETING_NEW: &[&str] = &[
    "Hey{name_sp}! How are you doing?",
    "Hi{name_sp}! What's on your mind today?",
];

const BYE: &[&str] = &[
    "Take care of yourself{name_suffix}! I'm here whenever you need me.",
    "Goodbye{name_sp}! Remember — you've got this. Come back anytime.",
    "See you later! Be kind to yourself today.",
];

const THANKS: &[&str] = &[
    "You're so welcome{name_sp}! Anything else I can help with?",
    "Happy to help{name_sp}! That's what I'm here for.",
    "Anytime! Need anything else?",
];

const EXAM: &[&str] = &["{name_prefix}Exams can be stressful! Which subject or test are you preparing for? I can help with study plans, techniques, or just moral support."];

const STUDY: &[&str] = &["{name_prefix}Nice! What topic are you studying? I can:\n• Create a study plan\n• Quiz you\n• Share techniques (Pomodoro, active recall)\n\nWhat would help?"];

const JOB: &[&str] = &["{name_prefix}Career stuff! What do you need?\n• Interview prep?\n• Resume help?\n• Career exploration?\n\nLet me know!"];

/// Relationship level at which greetings switch to "welcome back".
pub const WARM_GREETING_LEVEL: u8 = 5;

/// Catalog for an intent that has its own replies.
pub fn intent_catalog(intent: Intent, relationship_level: u8) -> Option<&'static [&'static str]> {
    match intent {
        Intent::Greeting if relationship_level >= WARM_GREETING_LEVEL => Some(GREETING_WARM),
        Intent::Greeting => Some(GREETING_NEW),
        Intent::Bye => Some(BYE),
        Intent::Thanks => Some(THANKS),
        Intent::Exam => Some(EXAM),
        Intent::Study => Some(STUDY),
        Intent::Job => Some(JOB),
        Intent::SelfHarm | Intent::Insult | Intent::General => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMED: TemplateVars<'static> = TemplateVars {
        intensity: "I hear ",
        name: Some("Alex"),
        bot: "Solace",
    };

    const ANON: TemplateVars<'static> = TemplateVars {
        intensity: "",
        name: None,
        bot: "Solace",
    };

    #[test]
    fn test_render_name_forms() {
        assert_eq!(
            render("{name_prefix}hi{name_suffix}.{name_sp}|{name}", &NAMED).unwrap(),
            "Alex, hi, Alex. Alex|Alex"
        );
        assert_eq!(
            render("{name_prefix}hi{name_suffix}.{name_sp}|{name}", &ANON).unwrap(),
            "hi.|"
        );
    }

    #[test]
    fn test_render_intensity_and_bot() {
        assert_eq!(
            render("{intensity}you. I'm {bot}", &NAMED).unwrap(),
            "I hear you. I'm Solace"
        );
    }

    #[test]
    fn test_render_unknown_placeholder_fails() {
        let err = render("hello {nmae}", &NAMED).unwrap_err();
        assert!(matches!(err, DispatchError::Template { ref placeholder } if placeholder == "nmae"));
    }

    #[test]
    fn test_render_unclosed_brace_fails() {
        assert!(render("hello {name", &NAMED).is_err());
    }

    #[test]
    fn test_intensity_prefix_bands() {
        assert_eq!(intensity_prefix(2.5), "I can really sense ");
        assert_eq!(intensity_prefix(2.0), "I can really sense ");
        assert_eq!(intensity_prefix(1.8), "");
        assert_eq!(intensity_prefix(1.0), "");
        assert_eq!(intensity_prefix(0.7), "I hear ");
        assert_eq!(intensity_prefix(0.5), "I hear ");
    }

    #[test]
    fn test_every_template_renders() {
        let mut all: Vec<&str> = vec![LISTENING_PROMPT, NAME_INTRO, CRISIS_MESSAGE];
        all.extend(FALLBACKS);
        for e in Emotion::ALL {
            let c = emotion_catalog(e);
            assert!(!c.templates.is_empty(), "empty catalog for {}", e);
            all.extend(c.templates);
        }
        for ctx in [LifeContext::Breakup, LifeContext::FamilyIssue, LifeContext::AcademicStress, LifeContext::JobStress] {
            all.extend(context_catalog(ctx).unwrap().templates);
        }
        for intent in [Intent::Greeting, Intent::Bye, Intent::Thanks, Intent::Exam, Intent::Study, Intent::Job] {
            all.extend(intent_catalog(intent, 0).unwrap());
            all.extend(intent_catalog(intent, 10).unwrap());
        }
        for t in all {
            render(t, &NAMED).unwrap();
            render(t, &ANON).unwrap();
        }
    }

    #[test]
    fn test_catalog_sizes() {
        for ctx in [LifeContext::Breakup, LifeContext::FamilyIssue, LifeContext::AcademicStress, LifeContext::JobStress] {
            let n = context_catalog(ctx).unwrap().templates.len();
            assert!((3..=5).contains(&n));
        }
        assert!(context_catalog(LifeContext::Health).is_none());
        assert!(context_catalog(LifeContext::Financial).is_none());
        assert_eq!(emotion_catalog(Emotion::Hopeless).templates.len(), 1);
    }

    #[test]
    fn test_greeting_depends_on_relationship() {
        assert_eq!(intent_catalog(Intent::Greeting, 4), Some(GREETING_NEW));
        assert_eq!(intent_catalog(Intent::Greeting, 5), Some(GREETING_WARM));
        assert_eq!(intent_catalog(Intent::Insult, 5), None);
    }
}
