//! Reply style selection.
//!
//! Each descriptor field is chosen by an ordered rule table: the first predicate that
//! holds wins, and the table's fallback applies when none do.

use crate::profile::PersonalityProfile;
use crate::taxonomy::{Mood, PersonalityTrait};
use crate::templates::TemplateCategory;
use serde::{Deserialize, Serialize};

/// Message type that always selects the greeting templates.
pub const GREETING_MESSAGE_TYPE: &str = "greeting";

/// Trait weight above which a trait dominates tone, emoji or category choice.
const HIGH: f64 = 0.7;
const VERY_HIGH: f64 = 0.8;
/// Lead one register trait needs over the other before formality tips.
const FORMALITY_MARGIN: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Empathetic,
    Playful,
    Professional,
    Friendly,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Empathetic => "empathetic",
            Tone::Playful => "playful",
            Tone::Professional => "professional",
            Tone::Friendly => "friendly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmojiUsage {
    High,
    Minimal,
    Moderate,
}

impl EmojiUsage {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmojiUsage::High => "high",
            EmojiUsage::Minimal => "minimal",
            EmojiUsage::Moderate => "moderate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Formality {
    Formal,
    Casual,
    Balanced,
}

impl Formality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Formality::Formal => "formal",
            Formality::Casual => "casual",
            Formality::Balanced => "balanced",
        }
    }
}

/// How a reply to one message should sound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleDescriptor {
    pub tone: Tone,
    pub emoji_usage: EmojiUsage,
    pub formality: Formality,
    /// The profile's `friendly` weight, passed through unchanged.
    pub enthusiasm_level: f64,
    pub template_category: TemplateCategory,
}

// ---------------------------------------------------------------------------
// Rule tables
// ---------------------------------------------------------------------------

/// Inputs visible to a style rule.
pub struct StyleInput<'a> {
    pub profile: &'a PersonalityProfile,
    pub message_type: &'a str,
}

impl StyleInput<'_> {
    fn weight(&self, t: PersonalityTrait) -> f64 {
        self.profile.weight(t)
    }

    fn mood_is(&self, mood: Mood) -> bool {
        self.profile.current_mood == mood
    }
}

/// One (predicate, result) pair.
pub struct Rule<T> {
    pub name: &'static str,
    pub when: fn(&StyleInput<'_>) -> bool,
    pub then: T,
}

/// Name reported when no rule in a table matched.
pub const FALLBACK_RULE: &str = "fallback";

/// Ordered rules plus the fallback used when nothing matches.
pub struct RuleTable<T: 'static> {
    pub rules: &'static [Rule<T>],
    pub fallback: T,
}

impl<T: Copy + 'static> RuleTable<T> {
    /// First rule whose predicate holds, if any.
    pub fn matching_rule(&self, input: &StyleInput<'_>) -> Option<&'static Rule<T>> {
        self.rules.iter().find(|r| (r.when)(input))
    }

    pub fn evaluate(&self, input: &StyleInput<'_>) -> T {
        self.evaluate_named(input).0
    }

    /// Result together with the name of the rule that produced it ([`FALLBACK_RULE`] if none).
    pub fn evaluate_named(&self, input: &StyleInput<'_>) -> (T, &'static str) {
        match self.matching_rule(input) {
            Some(rule) => (rule.then, rule.name),
            None => (self.fallback, FALLBACK_RULE),
        }
    }
}

pub static TONE_RULES: RuleTable<Tone> = RuleTable {
    rules: &[
        Rule {
            name: "compassionate_mood",
            when: |i| i.mood_is(Mood::Compassionate),
            then: Tone::Empathetic,
        },
        Rule {
            name: "humorous",
            when: |i| i.weight(PersonalityTrait::Humorous) > HIGH,
            then: Tone::Playful,
        },
        Rule {
            name: "very_professional",
            when: |i| i.weight(PersonalityTrait::Professional) > VERY_HIGH,
            then: Tone::Professional,
        },
    ],
    fallback: Tone::Friendly,
};

pub static EMOJI_RULES: RuleTable<EmojiUsage> = RuleTable {
    rules: &[
        Rule {
            name: "casual",
            when: |i| i.weight(PersonalityTrait::Casual) > HIGH,
            then: EmojiUsage::High,
        },
        Rule {
            name: "very_professional",
            when: |i| i.weight(PersonalityTrait::Professional) > VERY_HIGH,
            then: EmojiUsage::Minimal,
        },
    ],
    fallback: EmojiUsage::Moderate,
};

pub static FORMALITY_RULES: RuleTable<Formality> = RuleTable {
    rules: &[
        Rule {
            name: "professional_leads",
            when: |i| {
                i.weight(PersonalityTrait::Professional) - i.weight(PersonalityTrait::Casual)
                    > FORMALITY_MARGIN
            },
            then: Formality::Formal,
        },
        Rule {
            name: "casual_leads",
            when: |i| {
                i.weight(PersonalityTrait::Casual) - i.weight(PersonalityTrait::Professional)
                    > FORMALITY_MARGIN
            },
            then: Formality::Casual,
        },
    ],
    fallback: Formality::Balanced,
};

pub static CATEGORY_RULES: RuleTable<TemplateCategory> = RuleTable {
    rules: &[
        Rule {
            name: "greeting_message",
            when: |i| i.message_type == GREETING_MESSAGE_TYPE,
            then: TemplateCategory::Greeting,
        },
        Rule {
            name: "enthusiastic_mood",
            when: |i| i.mood_is(Mood::Enthusiastic),
            then: TemplateCategory::Enthusiasm,
        },
        Rule {
            name: "compassionate_mood",
            when: |i| i.mood_is(Mood::Compassionate),
            then: TemplateCategory::Empathy,
        },
        Rule {
            name: "very_analytical",
            when: |i| i.weight(PersonalityTrait::Analytical) > VERY_HIGH,
            then: TemplateCategory::Analytical,
        },
        Rule {
            name: "very_creative",
            when: |i| i.weight(PersonalityTrait::Creative) > VERY_HIGH,
            then: TemplateCategory::Creative,
        },
    ],
    fallback: TemplateCategory::Friendly,
};

/// Picks the reply style for `profile` answering a message of `message_type`.
pub fn style_for(profile: &PersonalityProfile, message_type: &str) -> StyleDescriptor {
    let input = StyleInput {
        profile,
        message_type,
    };
    StyleDescriptor {
        tone: TONE_RULES.evaluate(&input),
        emoji_usage: EMOJI_RULES.evaluate(&input),
        formality: FORMALITY_RULES.evaluate(&input),
        enthusiasm_level: profile.weight(PersonalityTrait::Friendly),
        template_category: CATEGORY_RULES.evaluate(&input),
    }
}

/// Name of the category rule that [`style_for`] would apply.
pub fn category_rule(profile: &PersonalityProfile, message_type: &str) -> &'static str {
    let input = StyleInput {
        profile,
        message_type,
    };
    CATEGORY_RULES.evaluate_named(&input).1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::TraitWeights;
    use std::collections::HashSet;

    fn profile_with(weights: &[(PersonalityTrait, f64)]) -> PersonalityProfile {
        let mut p = PersonalityProfile::new("style", &TraitWeights::baseline());
        for (t, w) in weights {
            p.set_weight(*t, *w);
        }
        p
    }

    #[test]
    fn test_formality_follows_margin() {
        let p = profile_with(&[
            (PersonalityTrait::Professional, 0.9),
            (PersonalityTrait::Casual, 0.3),
        ]);
        assert_eq!(style_for(&p, "chat").formality, Formality::Formal);

        let p = profile_with(&[
            (PersonalityTrait::Professional, 0.3),
            (PersonalityTrait::Casual, 0.9),
        ]);
        assert_eq!(style_for(&p, "chat").formality, Formality::Casual);

        let p = profile_with(&[
            (PersonalityTrait::Professional, 0.6),
            (PersonalityTrait::Casual, 0.5),
        ]);
        assert_eq!(style_for(&p, "chat").formality, Formality::Balanced);
    }

    #[test]
    fn test_compassionate_mood_forces_empathetic_tone() {
        let mut p = profile_with(&[
            (PersonalityTrait::Humorous, 1.0),
            (PersonalityTrait::Professional, 1.0),
        ]);
        p.set_mood(Mood::Compassionate);
        let style = style_for(&p, "chat");
        assert_eq!(style.tone, Tone::Empathetic);
        assert_eq!(style.template_category, TemplateCategory::Empathy);
    }

    #[test]
    fn test_tone_priority_order() {
        let p = profile_with(&[
            (PersonalityTrait::Humorous, 0.75),
            (PersonalityTrait::Professional, 0.9),
        ]);
        assert_eq!(style_for(&p, "chat").tone, Tone::Playful);

        let p = profile_with(&[
            (PersonalityTrait::Humorous, 0.7),
            (PersonalityTrait::Professional, 0.9),
        ]);
        assert_eq!(style_for(&p, "chat").tone, Tone::Professional);

        let p = profile_with(&[]);
        assert_eq!(style_for(&p, "chat").tone, Tone::Friendly);
    }

    #[test]
    fn test_emoji_usage() {
        let p = profile_with(&[
            (PersonalityTrait::Casual, 0.8),
            (PersonalityTrait::Professional, 0.9),
        ]);
        assert_eq!(style_for(&p, "chat").emoji_usage, EmojiUsage::High);

        let p = profile_with(&[(PersonalityTrait::Professional, 0.85)]);
        assert_eq!(style_for(&p, "chat").emoji_usage, EmojiUsage::Minimal);

        let p = profile_with(&[]);
        assert_eq!(style_for(&p, "chat").emoji_usage, EmojiUsage::Moderate);
    }

    #[test]
    fn test_category_priority_order() {
        let mut p = profile_with(&[
            (PersonalityTrait::Analytical, 0.9),
            (PersonalityTrait::Creative, 0.9),
        ]);
        assert_eq!(style_for(&p, "chat").template_category, TemplateCategory::Analytical);

        p.set_mood(Mood::Enthusiastic);
        assert_eq!(style_for(&p, "chat").template_category, TemplateCategory::Enthusiasm);
        assert_eq!(style_for(&p, "greeting").template_category, TemplateCategory::Greeting);

        let p = profile_with(&[(PersonalityTrait::Creative, 0.81)]);
        assert_eq!(style_for(&p, "chat").template_category, TemplateCategory::Creative);

        let p = profile_with(&[]);
        assert_eq!(style_for(&p, "question").template_category, TemplateCategory::Friendly);
    }

    #[test]
    fn test_enthusiasm_is_friendly_weight() {
        let p = profile_with(&[(PersonalityTrait::Friendly, 0.42)]);
        assert_eq!(style_for(&p, "chat").enthusiasm_level, 0.42);
    }

    fn assert_unique_names<T: 'static>(table: &RuleTable<T>) {
        let mut seen = HashSet::new();
        for rule in table.rules {
            assert!(seen.insert(rule.name), "duplicate rule name {}", rule.name);
            assert_ne!(rule.name, FALLBACK_RULE);
        }
    }

    #[test]
    fn test_rule_names_are_unique_per_table() {
        assert_unique_names(&TONE_RULES);
        assert_unique_names(&EMOJI_RULES);
        assert_unique_names(&FORMALITY_RULES);
        assert_unique_names(&CATEGORY_RULES);
    }

    #[test]
    fn test_evaluate_named_reports_the_rule_that_fired() {
        let mut p = profile_with(&[
            (PersonalityTrait::Humorous, 0.9),
            (PersonalityTrait::Analytical, 0.9),
        ]);
        let input = StyleInput {
            profile: &p,
            message_type: "chat",
        };
        assert_eq!(TONE_RULES.evaluate_named(&input), (Tone::Playful, "humorous"));
        assert_eq!(
            EMOJI_RULES.evaluate_named(&input),
            (EmojiUsage::Moderate, FALLBACK_RULE)
        );
        assert_eq!(category_rule(&p, "chat"), "very_analytical");
        assert_eq!(category_rule(&p, "greeting"), "greeting_message");

        p.set_mood(Mood::Compassionate);
        assert_eq!(category_rule(&p, "chat"), "compassionate_mood");
        let input = StyleInput {
            profile: &p,
            message_type: "chat",
        };
        assert_eq!(
            TONE_RULES.matching_rule(&input).map(|r| r.name),
            Some("compassionate_mood")
        );

        let p = profile_with(&[]);
        assert_eq!(category_rule(&p, "question"), FALLBACK_RULE);
    }

    #[test]
    fn test_descriptor_serializes_lowercase() {
        let p = profile_with(&[]);
        let json = serde_json::to_value(style_for(&p, "greeting")).unwrap();
        assert_eq!(json["tone"], "friendly");
        assert_eq!(json["template_category"], "greeting");
        assert_eq!(json["formality"], "formal");
    }
}
