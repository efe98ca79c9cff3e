//! Closed registries of personality traits and moods.
//!
//! Both enums serialize as their lowercase names, which are also the keys used in
//! exports, snapshots and configuration files.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// PersonalityTrait
// ---------------------------------------------------------------------------

/// A named personality dimension. Every profile carries a weight in [0.0, 1.0] for each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonalityTrait {
    Friendly,
    Analytical,
    Creative,
    Empathetic,
    Humorous,
    Professional,
    Casual,
    Supportive,
}

impl PersonalityTrait {
    pub const ALL: [PersonalityTrait; 8] = [
        PersonalityTrait::Friendly,
        PersonalityTrait::Analytical,
        PersonalityTrait::Creative,
        PersonalityTrait::Empathetic,
        PersonalityTrait::Humorous,
        PersonalityTrait::Professional,
        PersonalityTrait::Casual,
        PersonalityTrait::Supportive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonalityTrait::Friendly => "friendly",
            PersonalityTrait::Analytical => "analytical",
            PersonalityTrait::Creative => "creative",
            PersonalityTrait::Empathetic => "empathetic",
            PersonalityTrait::Humorous => "humorous",
            PersonalityTrait::Professional => "professional",
            PersonalityTrait::Casual => "casual",
            PersonalityTrait::Supportive => "supportive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "friendly" => Some(PersonalityTrait::Friendly),
            "analytical" => Some(PersonalityTrait::Analytical),
            "creative" => Some(PersonalityTrait::Creative),
            "empathetic" => Some(PersonalityTrait::Empathetic),
            "humorous" => Some(PersonalityTrait::Humorous),
            "professional" => Some(PersonalityTrait::Professional),
            "casual" => Some(PersonalityTrait::Casual),
            "supportive" => Some(PersonalityTrait::Supportive),
            _ => None,
        }
    }
}

impl fmt::Display for PersonalityTrait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Mood
// ---------------------------------------------------------------------------

/// Current emotional-state label of a profile. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Enthusiastic,
    /// Neutral starting mood for new profiles.
    #[default]
    Calm,
    Focused,
    Playful,
    Compassionate,
    Confident,
    Curious,
}

impl Mood {
    pub const ALL: [Mood; 7] = [
        Mood::Enthusiastic,
        Mood::Calm,
        Mood::Focused,
        Mood::Playful,
        Mood::Compassionate,
        Mood::Confident,
        Mood::Curious,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Enthusiastic => "enthusiastic",
            Mood::Calm => "calm",
            Mood::Focused => "focused",
            Mood::Playful => "playful",
            Mood::Compassionate => "compassionate",
            Mood::Confident => "confident",
            Mood::Curious => "curious",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "enthusiastic" => Some(Mood::Enthusiastic),
            "calm" => Some(Mood::Calm),
            "focused" => Some(Mood::Focused),
            "playful" => Some(Mood::Playful),
            "compassionate" => Some(Mood::Compassionate),
            "confident" => Some(Mood::Confident),
            "curious" => Some(Mood::Curious),
            _ => None,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
