//! # Storage Layer
//!
//! Durable local state for the application store. Only a *projection* of the
//! store is persisted: textbooks, questions, system progress, streak, user
//! stats and settings. The practice session and the faculty board are
//! session-only and never reach storage.
//!
//! ## Blob Format
//!
//! The projection is written as one JSON blob under a fixed namespace key
//! (`licenprep-storage` by default), wrapped in a versioned envelope:
//!
//! ```text
//! {
//!   "state": {
//!     "textbooks": [...],
//!     "mcqs": [...],
//!     "systemProgress": [...],
//!     "streak": 7,
//!     "userStats": {...},
//!     "settings": {...}
//!   },
//!   "version": 0
//! }
//! ```
//!
//! ## Rehydration
//!
//! The blob is read once at startup and merged over the seed defaults one
//! top-level field at a time: a field present in the blob replaces the
//! default wholesale, a missing field keeps the default, unknown fields are
//! ignored.
//!
//! ## Backends
//!
//! - [`fs_backend::FsBackend`]: one `<key>.json` file per namespace, atomic writes.
//! - [`mem_backend::MemBackend`]: in-memory, for tests.

use crate::error::{LicenPrepError, Result};
use crate::model::{Mcq, Settings, SystemProgress, Textbook, UserStats};
use crate::seed;
use serde::{Deserialize, Serialize};

pub mod fs_backend;
pub mod mem_backend;

pub const DEFAULT_STORAGE_KEY: &str = "licenprep-storage";
pub const SNAPSHOT_VERSION: u32 = 0;

/// Raw blob I/O. The backend knows nothing about the blob's contents.
pub trait StateBackend {
    /// Read the blob stored under `key`.
    /// Returns Ok(None) if nothing has been stored yet.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the blob stored under `key`.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save(&self, key: &str, blob: &str) -> Result<()>;
}

/// The persisted subset of the application store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub textbooks: Vec<Textbook>,
    pub mcqs: Vec<Mcq>,
    pub system_progress: Vec<SystemProgress>,
    pub streak: u32,
    pub user_stats: UserStats,
    pub settings: Settings,
}

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    state: T,
    version: u32,
}

impl Snapshot {
    pub fn seed() -> Self {
        Self {
            textbooks: seed::textbooks(),
            mcqs: seed::mcqs(),
            system_progress: seed::system_progress(),
            streak: seed::SEED_STREAK,
            user_stats: seed::user_stats(),
            settings: seed::settings(),
        }
    }

    pub fn to_blob(&self) -> Result<String> {
        let envelope = Envelope {
            state: self,
            version: SNAPSHOT_VERSION,
        };
        Ok(serde_json::to_string_pretty(&envelope)?)
    }

    /// Shallow-merge the `state` object of `blob` over `defaults`.
    pub fn merge_blob(defaults: Snapshot, blob: &str) -> Result<Snapshot> {
        let stored: Envelope<serde_json::Value> = serde_json::from_str(blob)?;
        let serde_json::Value::Object(persisted) = stored.state else {
            return Err(LicenPrepError::Store(
                "Persisted state is not a JSON object".to_string(),
            ));
        };

        let serde_json::Value::Object(mut merged) = serde_json::to_value(defaults)? else {
            return Err(LicenPrepError::Store(
                "Default state did not serialize to an object".to_string(),
            ));
        };
        for (field, value) in persisted {
            if merged.contains_key(&field) {
                merged.insert(field, value);
            }
        }

        Ok(serde_json::from_value(serde_json::Value::Object(merged))?)
    }
}

/// Read the blob under `key` and merge it over the seed defaults.
pub fn load_snapshot<B: StateBackend>(backend: &B, key: &str) -> Result<Snapshot> {
    match backend.load(key)? {
        Some(blob) => Snapshot::merge_blob(Snapshot::seed(), &blob),
        None => Ok(Snapshot::seed()),
    }
}

pub fn save_snapshot<B: StateBackend>(backend: &B, key: &str, snapshot: &Snapshot) -> Result<()> {
    backend.save(key, &snapshot.to_blob()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Theme;
    use mem_backend::MemBackend;

    #[test]
    fn missing_blob_yields_seed() {
        let backend = MemBackend::new();
        let snapshot = load_snapshot(&backend, DEFAULT_STORAGE_KEY).unwrap();
        assert_eq!(snapshot.mcqs, seed::mcqs());
        assert_eq!(snapshot.streak, seed::SEED_STREAK);
    }

    #[test]
    fn blob_is_wrapped_in_versioned_envelope() {
        let blob = Snapshot::seed().to_blob().unwrap();
        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(value["version"], 0);
        assert_eq!(value["state"]["streak"], 7);
        assert!(value["state"]["systemProgress"].is_array());
        assert!(value["state"].get("practice").is_none());
        assert!(value["state"].get("faculty").is_none());
    }

    #[test]
    fn partial_blob_keeps_defaults_for_missing_fields() {
        let blob = r#"{"state":{"streak":12,"settings":{"modelTier":"gemini-pro","tokenBudget":250000,"theme":"dark"}},"version":0}"#;
        let merged = Snapshot::merge_blob(Snapshot::seed(), blob).unwrap();
        assert_eq!(merged.streak, 12);
        assert_eq!(merged.settings.theme, Theme::Dark);
        assert_eq!(merged.settings.token_budget, 250_000);
        assert_eq!(merged.mcqs, seed::mcqs());
        assert_eq!(merged.textbooks.len(), 1);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let blob = r#"{"state":{"streak":3,"practice":{"currentQuestionIndex":2}},"version":0}"#;
        let merged = Snapshot::merge_blob(Snapshot::seed(), blob).unwrap();
        assert_eq!(merged.streak, 3);
    }

    #[test]
    fn malformed_blob_is_an_error() {
        assert!(Snapshot::merge_blob(Snapshot::seed(), "not json").is_err());
        assert!(Snapshot::merge_blob(Snapshot::seed(), r#"{"state":[],"version":0}"#).is_err());
        assert!(
            Snapshot::merge_blob(Snapshot::seed(), r#"{"state":{"streak":"x"},"version":0}"#)
                .is_err()
        );
    }

    #[test]
    fn save_then_load_round_trips() {
        let backend = MemBackend::new();
        let mut snapshot = Snapshot::seed();
        snapshot.streak = 42;
        snapshot.mcqs.truncate(1);
        snapshot.settings.theme = Theme::Light;

        save_snapshot(&backend, DEFAULT_STORAGE_KEY, &snapshot).unwrap();
        let loaded = load_snapshot(&backend, DEFAULT_STORAGE_KEY).unwrap();
        assert_eq!(loaded, snapshot);
    }
}
