//! Rule-based adaptation: one interaction nudges a profile's traits and mood.
//!
//! Steps run in a fixed order and are independent of each other:
//! 1. count the interaction
//! 2. formal keywords bump `professional`, otherwise casual keywords bump `casual`
//! 3. a caller-supplied emotion may switch the mood (sad → compassionate, excited → enthusiastic)
//! 4. any non-empty emotion label is appended to the mood history
//! 5. the adaptation level creeps up by a small step
//!
//! No emotion is inferred from the message text; the label comes from the caller and is
//! matched exactly.

use crate::profile::PersonalityProfile;
use crate::taxonomy::{Mood, PersonalityTrait};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn default_formal_keywords() -> Vec<String> {
    ["please", "thank you", "could you", "would you", "sir", "madam"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_casual_keywords() -> Vec<String> {
    ["hey", "yo", "sup", "lol", "omg", "😂", "🔥"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_register_step() -> f64 {
    0.1
}

fn default_empathy_step() -> f64 {
    0.05
}

fn default_adaptation_step() -> f64 {
    0.01
}

/// Keyword lists and step sizes driving [`adapt`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptationRules {
    /// Checked first; any hit classifies the message as formal.
    #[serde(default = "default_formal_keywords")]
    pub formal_keywords: Vec<String>,
    /// Only consulted when no formal keyword matched.
    #[serde(default = "default_casual_keywords")]
    pub casual_keywords: Vec<String>,
    /// Added to `professional` (formal) or `casual` (casual).
    #[serde(default = "default_register_step")]
    pub register_step: f64,
    /// Added to `empathetic` when the user is sad.
    #[serde(default = "default_empathy_step")]
    pub empathy_step: f64,
    #[serde(default = "default_adaptation_step")]
    pub adaptation_step: f64,
}

impl Default for AdaptationRules {
    fn default() -> Self {
        Self {
            formal_keywords: default_formal_keywords(),
            casual_keywords: default_casual_keywords(),
            register_step: default_register_step(),
            empathy_step: default_empathy_step(),
            adaptation_step: default_adaptation_step(),
        }
    }
}

impl AdaptationRules {
    /// Formal wins over casual when both keyword sets match.
    pub fn classify(&self, message: &str) -> MessageRegister {
        let lower = message.to_lowercase();
        if contains_any(&lower, &self.formal_keywords) {
            MessageRegister::Formal
        } else if contains_any(&lower, &self.casual_keywords) {
            MessageRegister::Casual
        } else {
            MessageRegister::Neutral
        }
    }
}

fn contains_any(haystack: &str, keywords: &[String]) -> bool {
    keywords
        .iter()
        .map(|k| k.to_lowercase())
        .any(|k| !k.is_empty() && haystack.contains(&k))
}

/// Register detected in a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRegister {
    Formal,
    Casual,
    Neutral,
}

impl MessageRegister {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRegister::Formal => "formal",
            MessageRegister::Casual => "casual",
            MessageRegister::Neutral => "neutral",
        }
    }
}

/// Caller-supplied context for one interaction. Unknown fields are kept in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractionContext {
    #[serde(default)]
    pub user_emotion: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InteractionContext {
    pub fn with_emotion(emotion: impl Into<String>) -> Self {
        Self {
            user_emotion: Some(emotion.into()),
            extra: Map::new(),
        }
    }

    fn emotion(&self) -> Option<&str> {
        self.user_emotion.as_deref().filter(|e| !e.is_empty())
    }
}

/// What one call to [`adapt`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdaptationOutcome {
    pub register: MessageRegister,
    /// Set when the emotion rule switched the mood to a different value.
    pub mood_changed_to: Option<Mood>,
}

/// Applies one interaction to `profile` in place.
pub fn adapt(
    profile: &mut PersonalityProfile,
    message: &str,
    context: &InteractionContext,
    rules: &AdaptationRules,
) -> AdaptationOutcome {
    let now = Utc::now();
    profile.interaction_count = profile.interaction_count.saturating_add(1);
    profile.last_interaction = Some(now);

    let register = rules.classify(message);
    match register {
        MessageRegister::Formal => {
            profile.nudge(PersonalityTrait::Professional, rules.register_step);
        }
        MessageRegister::Casual => {
            profile.nudge(PersonalityTrait::Casual, rules.register_step);
        }
        MessageRegister::Neutral => {}
    }

    let mut mood_changed_to = None;
    let emotion = context.emotion();
    match emotion {
        Some("sad") => {
            if profile.set_mood(Mood::Compassionate) {
                mood_changed_to = Some(Mood::Compassionate);
            }
            profile.nudge(PersonalityTrait::Empathetic, rules.empathy_step);
        }
        Some("excited") => {
            if profile.set_mood(Mood::Enthusiastic) {
                mood_changed_to = Some(Mood::Enthusiastic);
            }
        }
        _ => {}
    }
    if let Some(label) = emotion {
        profile.record_emotion(label, now);
    }

    profile.advance_adaptation(rules.adaptation_step);

    tracing::debug!(
        target: "kindred::adapt",
        user_id = %profile.user_id,
        register = register.as_str(),
        mood = profile.current_mood.as_str(),
        interactions = profile.interaction_count,
        "Profile adapted"
    );

    AdaptationOutcome {
        register,
        mood_changed_to,
    }
}
