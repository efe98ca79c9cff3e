//! Per-user personality state: trait weights, mood, adaptation counters and preferences.
//!
//! Weights and the adaptation level live behind accessors so every mutation goes through
//! a clamp into [0.0, 1.0].

use crate::taxonomy::{Mood, PersonalityTrait};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Most recent emotion entries kept per profile.
pub const MOOD_HISTORY_LIMIT: usize = 100;

// -----------------------------------------------------------------------------
// TraitWeights
// -----------------------------------------------------------------------------

/// Weight for every [`PersonalityTrait`]. All eight keys are always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitWeights(BTreeMap<PersonalityTrait, f64>);

impl TraitWeights {
    /// Seed weights for a brand-new profile. `casual` starts at an explicit 0.0.
    pub fn baseline() -> Self {
        let mut weights = BTreeMap::new();
        weights.insert(PersonalityTrait::Friendly, 0.8);
        weights.insert(PersonalityTrait::Analytical, 0.6);
        weights.insert(PersonalityTrait::Creative, 0.7);
        weights.insert(PersonalityTrait::Empathetic, 0.8);
        weights.insert(PersonalityTrait::Humorous, 0.6);
        weights.insert(PersonalityTrait::Professional, 0.5);
        weights.insert(PersonalityTrait::Casual, 0.0);
        weights.insert(PersonalityTrait::Supportive, 0.9);
        Self(weights)
    }

    /// Baseline with the given weights replaced (clamped).
    pub fn with_overrides(overrides: &BTreeMap<PersonalityTrait, f64>) -> Self {
        let mut weights = Self::baseline();
        for (t, w) in overrides {
            weights.set(*t, *w);
        }
        weights
    }

    pub fn get(&self, t: PersonalityTrait) -> f64 {
        self.0.get(&t).copied().unwrap_or(0.0)
    }

    /// Sets a weight, clamped to [0.0, 1.0]. Returns the stored value.
    pub fn set(&mut self, t: PersonalityTrait, weight: f64) -> f64 {
        let w = clamp_unit(weight);
        self.0.insert(t, w);
        w
    }

    /// Adds `delta` to a weight, clamped to [0.0, 1.0]. Returns the stored value.
    pub fn nudge(&mut self, t: PersonalityTrait, delta: f64) -> f64 {
        self.set(t, self.get(t) + delta)
    }

    /// Fills missing traits with 0.0 and re-clamps everything (e.g. after loading a hand-edited file).
    pub fn normalize(&mut self) {
        for t in PersonalityTrait::ALL {
            let w = self.get(t);
            self.0.insert(t, clamp_unit(w));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PersonalityTrait, f64)> + '_ {
        self.0.iter().map(|(t, w)| (*t, *w))
    }
}

impl Default for TraitWeights {
    fn default() -> Self {
        Self::baseline()
    }
}

/// NaN collapses to 0.0 so a bad input can never escape the range.
fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

// -----------------------------------------------------------------------------
// PersonalityProfile
// -----------------------------------------------------------------------------

/// One interaction that carried an emotion label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    /// Label as supplied by the caller.
    pub emotion: String,
    /// Profile mood after the interaction was applied.
    pub mood: Mood,
    pub at: DateTime<Utc>,
}

/// Complete personality state for one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalityProfile {
    pub user_id: String,
    traits: TraitWeights,
    #[serde(default)]
    pub current_mood: Mood,
    /// Grows by a small step per interaction; never decreases, capped at 1.0.
    #[serde(default)]
    adaptation_level: f64,
    #[serde(default)]
    pub interaction_count: u64,
    /// Free-form caller data (language, nickname, ...). Never interpreted by the engine.
    #[serde(default)]
    pub user_preferences: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_interaction: Option<DateTime<Utc>>,
    #[serde(default)]
    mood_history: Vec<MoodEntry>,
}

impl PersonalityProfile {
    pub fn new(user_id: impl Into<String>, baseline: &TraitWeights) -> Self {
        let mut traits = baseline.clone();
        traits.normalize();
        Self {
            user_id: user_id.into(),
            traits,
            current_mood: Mood::default(),
            adaptation_level: 0.0,
            interaction_count: 0,
            user_preferences: Map::new(),
            created_at: Utc::now(),
            last_interaction: None,
            mood_history: Vec::new(),
        }
    }

    pub fn weight(&self, t: PersonalityTrait) -> f64 {
        self.traits.get(t)
    }

    pub fn traits(&self) -> &TraitWeights {
        &self.traits
    }

    /// Sets a trait weight directly (clamped).
    pub fn set_weight(&mut self, t: PersonalityTrait, weight: f64) -> f64 {
        self.traits.set(t, weight)
    }

    /// Adds `delta` to a trait weight (clamped).
    pub fn nudge(&mut self, t: PersonalityTrait, delta: f64) -> f64 {
        self.traits.nudge(t, delta)
    }

    pub fn adaptation_level(&self) -> f64 {
        self.adaptation_level
    }

    /// Raises the adaptation level by `step`, capped at 1.0. Negative steps are ignored.
    pub fn advance_adaptation(&mut self, step: f64) -> f64 {
        let step = if step.is_nan() { 0.0 } else { step.max(0.0) };
        self.adaptation_level = clamp_unit(self.adaptation_level + step);
        self.adaptation_level
    }

    /// Switches mood. Returns true when the mood changed.
    pub fn set_mood(&mut self, mood: Mood) -> bool {
        if self.current_mood == mood {
            return false;
        }
        self.current_mood = mood;
        true
    }

    /// Appends an emotion entry stamped with the current mood, keeping the latest
    /// [`MOOD_HISTORY_LIMIT`] entries.
    pub fn record_emotion(&mut self, emotion: impl Into<String>, at: DateTime<Utc>) {
        self.mood_history.push(MoodEntry {
            emotion: emotion.into(),
            mood: self.current_mood,
            at,
        });
        self.trim_mood_history();
    }

    pub fn mood_history(&self) -> &[MoodEntry] {
        &self.mood_history
    }

    fn trim_mood_history(&mut self) {
        if self.mood_history.len() > MOOD_HISTORY_LIMIT {
            let excess = self.mood_history.len() - MOOD_HISTORY_LIMIT;
            self.mood_history.drain(..excess);
        }
    }

    /// Re-establishes range invariants on every numeric field.
    pub fn clamp(&mut self) {
        self.traits.normalize();
        self.adaptation_level = clamp_unit(self.adaptation_level);
        self.trim_mood_history();
    }

    /// Flat export: one key per trait name plus mood, counters and preferences.
    pub fn export(&self) -> Map<String, Value> {
        let mut out = Map::new();
        for (t, w) in self.traits.iter() {
            out.insert(t.as_str().to_string(), Value::from(w));
        }
        out.insert(
            "current_mood".to_string(),
            Value::from(self.current_mood.as_str()),
        );
        out.insert(
            "adaptation_level".to_string(),
            Value::from(self.adaptation_level),
        );
        out.insert(
            "interaction_count".to_string(),
            Value::from(self.interaction_count),
        );
        out.insert(
            "user_preferences".to_string(),
            Value::Object(self.user_preferences.clone()),
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_has_every_trait_and_zero_casual() {
        let weights = TraitWeights::baseline();
        assert_eq!(weights.iter().count(), PersonalityTrait::ALL.len());
        assert_eq!(weights.get(PersonalityTrait::Casual), 0.0);
        assert_eq!(weights.get(PersonalityTrait::Supportive), 0.9);
    }

    #[test]
    fn test_nudge_clamps_both_ends() {
        let mut p = PersonalityProfile::new("u1", &TraitWeights::baseline());
        assert_eq!(p.nudge(PersonalityTrait::Supportive, 0.5), 1.0);
        assert_eq!(p.nudge(PersonalityTrait::Casual, -0.3), 0.0);
        assert_eq!(p.set_weight(PersonalityTrait::Humorous, f64::NAN), 0.0);
    }

    #[test]
    fn test_adaptation_level_is_monotonic_and_capped() {
        let mut p = PersonalityProfile::new("u1", &TraitWeights::baseline());
        p.advance_adaptation(0.4);
        p.advance_adaptation(-1.0);
        assert!((p.adaptation_level() - 0.4).abs() < 1e-9);
        p.advance_adaptation(5.0);
        assert_eq!(p.adaptation_level(), 1.0);
    }

    #[test]
    fn test_set_mood_reports_changes() {
        let mut p = PersonalityProfile::new("u1", &TraitWeights::baseline());
        assert!(!p.set_mood(Mood::Calm));
        assert!(p.set_mood(Mood::Playful));
        assert!(!p.set_mood(Mood::Playful));
        assert!(p.mood_history().is_empty());
    }

    #[test]
    fn test_mood_history_keeps_latest_hundred_entries() {
        let mut p = PersonalityProfile::new("u1", &TraitWeights::baseline());
        let now = Utc::now();
        p.record_emotion("sad", now);
        p.record_emotion("sad", now);
        assert_eq!(p.mood_history().len(), 2);
        assert_eq!(p.mood_history()[0].mood, Mood::Calm);

        p.set_mood(Mood::Curious);
        for i in 0..150 {
            p.record_emotion(format!("label-{}", i), now);
        }
        assert_eq!(MOOD_HISTORY_LIMIT, 100);
        assert_eq!(p.mood_history().len(), MOOD_HISTORY_LIMIT);
        assert_eq!(p.mood_history()[0].emotion, "label-50");
        assert_eq!(p.mood_history().last().map(|e| e.mood), Some(Mood::Curious));
    }

    #[test]
    fn test_export_is_flat() {
        let mut p = PersonalityProfile::new("u1", &TraitWeights::baseline());
        p.user_preferences
            .insert("language".to_string(), Value::from("hi"));
        let out = p.export();
        assert_eq!(out.get("friendly").and_then(Value::as_f64), Some(0.8));
        assert_eq!(out.get("casual").and_then(Value::as_f64), Some(0.0));
        assert_eq!(out.get("current_mood").and_then(Value::as_str), Some("calm"));
        assert_eq!(out.get("interaction_count").and_then(Value::as_u64), Some(0));
        assert_eq!(
            out.get("user_preferences")
                .and_then(|v| v.get("language"))
                .and_then(Value::as_str),
            Some("hi")
        );
        assert_eq!(out.len(), PersonalityTrait::ALL.len() + 4);
    }

    #[test]
    fn test_clamp_repairs_out_of_range_snapshot() {
        let json = r#"{
            "user_id": "u9",
            "traits": {"friendly": 3.5, "casual": -1.0},
            "adaptation_level": 7.0,
            "created_at": "2026-01-01T00:00:00Z"
        }"#;
        let mut p: PersonalityProfile = serde_json::from_str(json).unwrap();
        p.clamp();
        assert_eq!(p.weight(PersonalityTrait::Friendly), 1.0);
        assert_eq!(p.weight(PersonalityTrait::Casual), 0.0);
        assert_eq!(p.weight(PersonalityTrait::Analytical), 0.0);
        assert_eq!(p.traits().iter().count(), PersonalityTrait::ALL.len());
        assert_eq!(p.adaptation_level(), 1.0);
    }
}
