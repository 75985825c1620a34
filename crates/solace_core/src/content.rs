//! On-demand exercises, coping tips and affirmations.

use crate::labels::Emotion;
use rand::seq::SliceRandom;
use rand::Rng;

const BREATHING_EXERCISES: &[&str] = &[
    "**Box Breathing (4-4-4-4)**\n\nLet's do this together:\n✓ Breathe IN → 1...2...3...4\n✓ HOLD → 1...2...3...4\n✓ Breathe OUT → 1...2...3...4\n✓ HOLD → 1...2...3...4\n\nRepeat 4 times. Ready? Start now!\nTell me how you feel after!",
    "**4-7-8 Calming Breath**\n\nThis activates your relaxation response:\n✓ IN through nose → 4 seconds\n✓ HOLD → 7 seconds\n✓ OUT through mouth → 8 seconds\n\nDo this 3 times. I'll wait...\nHow do you feel now?",
    "**Simple Deep Breathing**\n\nLet's ground you:\n✓ Take a slow, deep breath in → 5 seconds\n✓ Hold it gently → 2 seconds\n✓ Release slowly → 5 seconds\n\nRepeat 5 times. Focus only on your breath.\nReady? Start...",
];

const GROUNDING_EXERCISE: &str = "**5-4-3-2-1 Grounding Technique**\n\nThis brings you back to the present:\n\nName out loud:\n✓ **5 things** you can SEE around you\n✓ **4 things** you can TOUCH\n✓ **3 things** you can HEAR\n✓ **2 things** you can SMELL\n✓ **1 thing** you can TASTE\n\nTake your time. Tell me when you're done!";

const GENERIC_TIP: &str = "I'm here to support you. Tell me more about what you're feeling.";

const GENERIC_AFFIRMATIONS: &[&str] = &["You're doing great. Keep going."];

pub fn breathing_exercise<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    BREATHING_EXERCISES
        .choose(rng)
        .copied()
        .unwrap_or(BREATHING_EXERCISES[0])
}

pub fn grounding_exercise() -> &'static str {
    GROUNDING_EXERCISE
}

/// Coping strategies for `emotion`, or a generic prompt when none are written.
pub fn support_tips(emotion: Emotion) -> &'static str {
    match emotion {
        Emotion::Sad => "**When feeling sad:**\n- Allow yourself to feel it — it's okay to be sad\n- Talk to someone you trust\n- Do one small thing you enjoy\n- Get outside for 10 minutes\n- Journal — write how you feel\n- Listen to music that comforts you\n\nRemember: This feeling is temporary. You're not alone.",
        Emotion::Anxious => "**Managing anxiety:**\n- Ground yourself → 5-4-3-2-1 technique\n- Deep breathing exercises\n- Move your body → walk, stretch, dance\n- Limit caffeine/sugar\n- Write down what's worrying you\n- Talk to someone\n\nSay \"breathe\" for a guided exercise or \"ground\" for grounding!",
        Emotion::Angry => "**Cooling down anger:**\n- Take a 5-minute break from the situation\n- Count to 10 (or 100!) slowly\n- Physical release → push-ups, punching pillow\n- Write an angry letter (don't send it)\n- Talk it out when calmer\n- Ask: \"Will this matter in 5 years?\"\n\nYour anger is valid. Let's work through it together.",
        Emotion::Lonely => "**When feeling lonely:**\n- Reach out to one person → text, call\n- Join an online community → hobby, interest\n- Go somewhere public → café, park\n- Volunteer or help someone\n- Connect with yourself → journal, self-care\n\nRemember: being alone ≠ being lonely.\nI'm here with you right now. You're not alone.",
        Emotion::Overwhelmed => "**When overwhelmed:**\n1. STOP. Take 3 deep breaths\n2. Write EVERYTHING down\n3. Pick ONE thing. Just one.\n4. Do that one thing\n5. Take a break\n6. Repeat\n\nYou don't have to do it all at once. One step at a time.\n\nWhat's the ONE thing you can do right now?",
        Emotion::Hopeless => "**Feeling hopeless is so hard.**\n\nPlease talk to someone NOW → friend, family, counselor\n\nThese feelings are TEMPORARY (even if they don't feel like it)\n\nDo ONE tiny thing for yourself today\n\nRemember: you've survived 100% of your worst days so far\n\nCall a helpline if you need immediate support:\n🇮🇳 India: 9152987821 (iCALL)\n\nYou matter. Your life matters. I'm here.",
        Emotion::Tired => "**Dealing with exhaustion:**\n- It's okay to rest — you're not lazy\n- Take a 10-20 min power nap\n- Move your body → even 5 min walk\n- Hydrate + eat something nutritious\n- Say NO to one thing today\n- Go to bed 30 min earlier tonight\n\nRest is productive. You deserve it.",
        Emotion::Guilty => "**Managing guilt:**\n- Ask: \"Did I intend harm?\" (Usually no)\n- Apologize if you hurt someone\n- Forgive yourself — everyone makes mistakes\n- Learn the lesson\n- Make amends if possible\n- Let it go — don't carry it forever\n\nYou're human. Mistakes don't define you.",
        Emotion::Proud => "**CELEBRATE YOUR WIN!**\n✓ Tell someone about it!\n✓ Write down what you did well\n✓ Give yourself credit — you earned it\n✓ Do something nice for yourself\n✓ Remember this moment for tough days\n\nYou should be proud. This is awesome!",
        _ => GENERIC_TIP,
    }
}

/// The affirmation catalog for `emotion` (generic list when unmapped).
pub fn affirmations_for(emotion: Emotion) -> &'static [&'static str] {
    match emotion {
        Emotion::Sad => &[
            "It's okay to not be okay right now. This feeling will pass.",
            "Your sadness is valid. You don't have to force positivity.",
            "Even in darkness, you are still here. That takes strength.",
        ],
        Emotion::Anxious => &[
            "You've survived every anxious moment before this. You'll survive this too.",
            "Anxiety lies. You are more capable than your worry says.",
            "One breath at a time. You've got this.",
        ],
        Emotion::Lonely => &[
            "Being alone doesn't mean you're unworthy of connection.",
            "You matter, even when you can't feel it.",
            "This loneliness is temporary. Connection is still possible.",
        ],
        Emotion::Overwhelmed => &[
            "You don't have to do it all. One step is enough.",
            "It's okay to ask for help. It's actually brave.",
            "You're doing the best you can with what you have.",
        ],
        Emotion::Insecure => &[
            "You are enough, exactly as you are.",
            "Your worth isn't determined by what you achieve.",
            "Everyone feels this way sometimes. You're not broken.",
        ],
        Emotion::Tired => &[
            "Rest is not giving up. It's refueling.",
            "You're allowed to be tired without feeling guilty.",
            "Taking care of yourself is NOT selfish.",
        ],
        _ => GENERIC_AFFIRMATIONS,
    }
}

pub fn affirmation<R: Rng + ?Sized>(emotion: Emotion, rng: &mut R) -> &'static str {
    let catalog = affirmations_for(emotion);
    catalog.choose(rng).copied().unwrap_or(GENERIC_AFFIRMATIONS[0])
}

pub fn breathing_exercises() -> &'static [&'static str] {
    BREATHING_EXERCISES
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_breathing_stays_in_catalog() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let ex = breathing_exercise(&mut rng);
            assert!(BREATHING_EXERCISES.contains(&ex));
        }
    }

    #[test]
    fn test_grounding_is_fixed() {
        assert!(grounding_exercise().starts_with("**5-4-3-2-1"));
        assert_eq!(grounding_exercise(), grounding_exercise());
    }

    #[test]
    fn test_support_tips_mapping() {
        assert!(support_tips(Emotion::Sad).contains("When feeling sad"));
        assert!(support_tips(Emotion::Proud).contains("CELEBRATE"));
        assert_eq!(support_tips(Emotion::Curious), GENERIC_TIP);
        assert_eq!(support_tips(Emotion::Happy), GENERIC_TIP);
    }

    #[test]
    fn test_affirmation_uses_emotion_catalog() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..30 {
            let a = affirmation(Emotion::Tired, &mut rng);
            assert!(affirmations_for(Emotion::Tired).contains(&a));
        }
        assert_eq!(
            affirmation(Emotion::Bored, &mut rng),
            "You're doing great. Keep going."
        );
    }
}
