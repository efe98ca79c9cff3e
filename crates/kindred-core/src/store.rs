//! In-process profile store: user id → profile, created lazily.
//!
//! The store owns every profile. Callers that share it across threads wrap it in their own
//! lock; nothing here is synchronized.

use crate::error::Result;
use crate::profile::{PersonalityProfile, TraitWeights};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// On-disk shape of a store snapshot.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    profiles: Vec<PersonalityProfile>,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    profiles: HashMap<String, PersonalityProfile>,
    baseline: TraitWeights,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose new profiles start from `baseline` instead of the built-in seed.
    pub fn with_baseline(baseline: TraitWeights) -> Self {
        Self {
            profiles: HashMap::new(),
            baseline,
        }
    }

    pub fn baseline(&self) -> &TraitWeights {
        &self.baseline
    }

    /// Returns the profile for `user_id`, allocating a baseline profile on first use.
    pub fn get_or_create(&mut self, user_id: &str) -> &mut PersonalityProfile {
        let baseline = &self.baseline;
        self.profiles.entry(user_id.to_string()).or_insert_with(|| {
            tracing::info!(target: "kindred::store", user_id, "Created personality profile");
            PersonalityProfile::new(user_id, baseline)
        })
    }

    /// Read-only lookup; never allocates.
    pub fn get(&self, user_id: &str) -> Option<&PersonalityProfile> {
        self.profiles.get(user_id)
    }

    pub fn contains(&self, user_id: &str) -> bool {
        self.profiles.contains_key(user_id)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// User ids in sorted order.
    pub fn user_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Writes every profile as pretty JSON, creating parent directories as needed.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let mut profiles: Vec<PersonalityProfile> = self.profiles.values().cloned().collect();
        profiles.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        let content = serde_json::to_string_pretty(&Snapshot { profiles })?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, content)?;
        tracing::info!(
            target: "kindred::store",
            path = %path.display(),
            profiles = self.profiles.len(),
            "Profile snapshot saved"
        );
        Ok(())
    }

    /// Loads a snapshot written by [`save_to_path`](Self::save_to_path). A missing file is an empty store.
    /// Loaded numbers are re-clamped.
    pub fn load_from_path(path: &Path, baseline: TraitWeights) -> Result<Self> {
        let mut store = Self::with_baseline(baseline);
        if !path.exists() {
            tracing::debug!(target: "kindred::store", path = %path.display(), "No profile snapshot; starting empty");
            return Ok(store);
        }
        let content = fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        for mut profile in snapshot.profiles {
            profile.clamp();
            store.profiles.insert(profile.user_id.clone(), profile);
        }
        tracing::info!(
            target: "kindred::store",
            path = %path.display(),
            profiles = store.profiles.len(),
            "Profile snapshot loaded"
        );
        Ok(store)
    }
}
