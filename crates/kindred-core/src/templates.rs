//! Canned reply templates grouped by category, sampled uniformly at random.

use crate::error::{PersonaError, Result};
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Grouping key selecting which template list to sample from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Greeting,
    Enthusiasm,
    Empathy,
    Analytical,
    Creative,
    /// Selected by the style rules but not shipped in the reference bank; resolves to greetings.
    Friendly,
}

impl TemplateCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateCategory::Greeting => "greeting",
            TemplateCategory::Enthusiasm => "enthusiasm",
            TemplateCategory::Empathy => "empathy",
            TemplateCategory::Analytical => "analytical",
            TemplateCategory::Creative => "creative",
            TemplateCategory::Friendly => "friendly",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "greeting" => Some(TemplateCategory::Greeting),
            "enthusiasm" => Some(TemplateCategory::Enthusiasm),
            "empathy" => Some(TemplateCategory::Empathy),
            "analytical" => Some(TemplateCategory::Analytical),
            "creative" => Some(TemplateCategory::Creative),
            "friendly" => Some(TemplateCategory::Friendly),
            _ => None,
        }
    }
}

pub const GREETING_TEMPLATES: [&str; 3] = [
    "Hey there! 😊 What's on your mind today?",
    "Hello! How's your day going so far?",
    "Hi! Great to see you. What shall we talk about?",
];

pub const ENTHUSIASM_TEMPLATES: [&str; 3] = [
    "That's amazing! 🎉 Tell me everything!",
    "Wow, I love that energy! What happens next?",
    "This is so exciting! I'm all ears ✨",
];

pub const EMPATHY_TEMPLATES: [&str; 3] = [
    "I'm really sorry you're going through this. I'm here for you 💙",
    "That sounds really hard. Do you want to talk about it?",
    "It's okay to feel this way. Take all the time you need.",
];

pub const ANALYTICAL_TEMPLATES: [&str; 3] = [
    "Let's break this down step by step.",
    "Interesting question. Here's how I'd look at it.",
    "Let's weigh the options and see what the facts say.",
];

pub const CREATIVE_TEMPLATES: [&str; 3] = [
    "Ooh, let's get creative with this! 🎨",
    "What if we looked at it from a completely different angle?",
    "I've got a fun idea. Want to hear it?",
];

static REFERENCE_BANK: Lazy<TemplateBank> = Lazy::new(|| {
    let entries: [(TemplateCategory, &[&str]); 5] = [
        (TemplateCategory::Greeting, &GREETING_TEMPLATES),
        (TemplateCategory::Enthusiasm, &ENTHUSIASM_TEMPLATES),
        (TemplateCategory::Empathy, &EMPATHY_TEMPLATES),
        (TemplateCategory::Analytical, &ANALYTICAL_TEMPLATES),
        (TemplateCategory::Creative, &CREATIVE_TEMPLATES),
    ];
    TemplateBank {
        lists: entries
            .iter()
            .map(|(c, list)| (*c, list.iter().map(|s| s.to_string()).collect()))
            .collect(),
    }
});

/// Category → ordered, non-empty list of candidate replies. The greeting list is always present.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateBank {
    lists: HashMap<TemplateCategory, Vec<String>>,
}

impl Default for TemplateBank {
    fn default() -> Self {
        REFERENCE_BANK.clone()
    }
}

impl TemplateBank {
    /// Reference bank with some categories replaced. Empty replacement lists are rejected.
    pub fn with_overrides(overrides: &BTreeMap<TemplateCategory, Vec<String>>) -> Result<Self> {
        let mut bank = Self::default();
        for (category, list) in overrides {
            if list.is_empty() {
                return Err(PersonaError::EmptyTemplates(*category));
            }
            bank.lists.insert(*category, list.clone());
        }
        Ok(bank)
    }

    /// Candidates for `category`, or the greeting list when the category is not in the bank.
    pub fn candidates(&self, category: TemplateCategory) -> &[String] {
        self.lists
            .get(&category)
            .or_else(|| self.lists.get(&TemplateCategory::Greeting))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, category: TemplateCategory) -> bool {
        self.lists.contains_key(&category)
    }

    /// One candidate for `category`, chosen uniformly at random.
    pub fn pick<R: Rng + ?Sized>(&self, category: TemplateCategory, rng: &mut R) -> &str {
        self.candidates(category)
            .choose(rng)
            .map(String::as_str)
            .unwrap_or(GREETING_TEMPLATES[0])
    }

    /// String-keyed lookup; unknown names fall back to greetings.
    pub fn respond<R: Rng + ?Sized>(&self, category: &str, rng: &mut R) -> &str {
        let category = TemplateCategory::from_str(category).unwrap_or(TemplateCategory::Greeting);
        self.pick(category, rng)
    }
}
