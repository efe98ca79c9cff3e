//! kindred-core: per-user personality profiles for a chat assistant.
//!
//! A profile holds eight trait weights, one mood, and interaction counters. Each incoming
//! message nudges the profile through fixed keyword and emotion rules; ordered rule tables
//! then turn the profile into a reply style and a template category, and the template bank
//! supplies the reply text.
//!
//! ```text
//! caller ─► adapt (mutates profile) ─► style_for (reads profile) ─► template bank ─► reply
//! ```
//!
//! Everything is synchronous and in-process. [`PersonalityEngine`] is the user-id keyed
//! entry point; the free functions [`adapt`] and [`style_for`] work on a single profile.

mod adaptation;
mod config;
mod engine;
mod error;
mod profile;
mod store;
mod style;
mod taxonomy;
mod templates;

pub use adaptation::{
    adapt, AdaptationOutcome, AdaptationRules, InteractionContext, MessageRegister,
};
pub use config::EngineConfig;
pub use engine::PersonalityEngine;
pub use error::{PersonaError, Result};
pub use profile::{MoodEntry, PersonalityProfile, TraitWeights, MOOD_HISTORY_LIMIT};
pub use store::ProfileStore;
pub use style::{
    category_rule, style_for, EmojiUsage, Formality, Rule, RuleTable, StyleDescriptor,
    StyleInput, Tone, CATEGORY_RULES, EMOJI_RULES, FALLBACK_RULE, FORMALITY_RULES,
    GREETING_MESSAGE_TYPE, TONE_RULES,
};
pub use taxonomy::{Mood, PersonalityTrait};
pub use templates::{
    TemplateBank, TemplateCategory, ANALYTICAL_TEMPLATES, CREATIVE_TEMPLATES, EMPATHY_TEMPLATES,
    ENTHUSIASM_TEMPLATES, GREETING_TEMPLATES,
};
