use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use nexus_shared::constants::ALL_STORAGE_KEYS;

use crate::error::Result;
use crate::kv::KeyValueStore;

/// Full backup payload: every application key with its raw stored JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupPayload {
    /// ISO 8601 timestamp of when the backup was created
    pub created_at: String,
    /// App version that produced the backup
    pub version: String,
    pub entries: BTreeMap<String, String>,
}

impl BackupPayload {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportStats {
    pub entries_imported: usize,
    /// Unknown keys and values that are not valid JSON.
    pub entries_skipped: usize,
}

/// Collect every known application key currently present in `store`.
pub fn export_backup(store: &dyn KeyValueStore) -> Result<BackupPayload> {
    let mut entries = BTreeMap::new();
    for key in ALL_STORAGE_KEYS {
        if let Some(value) = store.get(key)? {
            entries.insert(key.to_string(), value);
        }
    }

    tracing::info!(entries = entries.len(), "exported backup");

    Ok(BackupPayload {
        created_at: nexus_shared::time::format(&nexus_shared::time::now()),
        version: env!("CARGO_PKG_VERSION").to_string(),
        entries,
    })
}

/// Write a backup into `store`, overwriting the keys it contains.
pub fn import_backup(store: &dyn KeyValueStore, payload: &BackupPayload) -> Result<ImportStats> {
    let mut stats = ImportStats::default();

    for (key, value) in &payload.entries {
        if !ALL_STORAGE_KEYS.contains(&key.as_str()) {
            tracing::warn!(key = %key, "skipping unknown backup key");
            stats.entries_skipped += 1;
            continue;
        }
        if serde_json::from_str::<serde_json::Value>(value).is_err() {
            tracing::warn!(key = %key, "skipping backup entry with invalid JSON");
            stats.entries_skipped += 1;
            continue;
        }
        store.set(key, value)?;
        stats.entries_imported += 1;
    }

    tracing::info!(
        imported = stats.entries_imported,
        skipped = stats.entries_skipped,
        "imported backup"
    );

    Ok(stats)
}
