//! User-id keyed facade over the store, adaptation rules, style selector and template bank.
//!
//! Typical turn: `adapt` with the incoming message, then `respond` for the reply text.

use crate::adaptation::{self, AdaptationOutcome, AdaptationRules, InteractionContext};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::profile::{PersonalityProfile, TraitWeights};
use crate::store::ProfileStore;
use crate::style::{self, StyleDescriptor};
use crate::templates::TemplateBank;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{Map, Value};
use std::path::PathBuf;

pub struct PersonalityEngine {
    store: ProfileStore,
    rules: AdaptationRules,
    bank: TemplateBank,
    rng: StdRng,
    snapshot_path: Option<PathBuf>,
}

impl Default for PersonalityEngine {
    fn default() -> Self {
        Self::new(
            ProfileStore::new(),
            AdaptationRules::default(),
            TemplateBank::default(),
            StdRng::from_entropy(),
        )
    }
}

impl PersonalityEngine {
    pub fn new(store: ProfileStore, rules: AdaptationRules, bank: TemplateBank, rng: StdRng) -> Self {
        Self {
            store,
            rules,
            bank,
            rng,
            snapshot_path: None,
        }
    }

    /// Builds an engine from configuration, restoring the snapshot when one is configured.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let baseline = TraitWeights::with_overrides(&config.baseline);
        let store = match config.snapshot_path.as_deref() {
            Some(path) => ProfileStore::load_from_path(path, baseline)?,
            None => ProfileStore::with_baseline(baseline),
        };
        let bank = TemplateBank::with_overrides(&config.templates)?;
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        tracing::info!(
            target: "kindred::engine",
            profiles = store.len(),
            seeded = config.rng_seed.is_some(),
            "Personality engine ready"
        );
        Ok(Self {
            store,
            rules: config.adaptation.clone(),
            bank,
            rng,
            snapshot_path: config.snapshot_path.clone(),
        })
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    pub fn rules(&self) -> &AdaptationRules {
        &self.rules
    }

    pub fn bank(&self) -> &TemplateBank {
        &self.bank
    }

    /// Profile for `user_id`, created with the baseline on first reference.
    pub fn get_or_create(&mut self, user_id: &str) -> &PersonalityProfile {
        self.store.get_or_create(user_id)
    }

    /// Applies one incoming message to the user's profile.
    pub fn adapt(
        &mut self,
        user_id: &str,
        message: &str,
        context: &InteractionContext,
    ) -> AdaptationOutcome {
        let profile = self.store.get_or_create(user_id);
        adaptation::adapt(profile, message, context, &self.rules)
    }

    /// Reply style for the user's current profile.
    pub fn style_for(&mut self, user_id: &str, message_type: &str) -> StyleDescriptor {
        style::style_for(self.store.get_or_create(user_id), message_type)
    }

    /// One reply template in the style the user's profile calls for.
    pub fn respond(&mut self, user_id: &str, message_type: &str) -> String {
        let profile = self.store.get_or_create(user_id);
        let style = style::style_for(profile, message_type);
        let rule = style::category_rule(profile, message_type);
        let reply = self.bank.pick(style.template_category, &mut self.rng).to_string();
        tracing::debug!(
            target: "kindred::engine",
            user_id,
            category = style.template_category.as_str(),
            rule,
            tone = style.tone.as_str(),
            "Reply template selected"
        );
        reply
    }

    /// Flat export of the user's profile; empty for unknown users.
    pub fn export(&self, user_id: &str) -> Map<String, Value> {
        self.store
            .get(user_id)
            .map(PersonalityProfile::export)
            .unwrap_or_default()
    }

    /// Stores a caller preference on the user's profile, returning the previous value.
    pub fn set_preference(
        &mut self,
        user_id: &str,
        key: impl Into<String>,
        value: Value,
    ) -> Option<Value> {
        self.store
            .get_or_create(user_id)
            .user_preferences
            .insert(key.into(), value)
    }

    pub fn preference(&self, user_id: &str, key: &str) -> Option<&Value> {
        self.store.get(user_id)?.user_preferences.get(key)
    }

    /// Writes the store to the configured snapshot path. Returns false when none is configured.
    pub fn save_snapshot(&self) -> Result<bool> {
        match self.snapshot_path.as_deref() {
            Some(path) => {
                self.store.save_to_path(path)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
