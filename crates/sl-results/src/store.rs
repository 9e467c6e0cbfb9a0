//! History catalogue storage API.
//!
//! One JSON file per named result under the store root. The name is the
//! primary key: a later save under an existing name overwrites the prior
//! entry. Writes go through a temp file and rename, so a concurrent reader
//! never observes a torn entry.

use std::fs;
use std::path::PathBuf;

use sl_core::CurveBundle;
use tracing::warn;

use crate::types::{HistorySummary, Metadata, NamedResult, StoredRecord};
use crate::{StoreError, StoreResult};

#[derive(Clone)]
pub struct ResultStore {
    root_dir: PathBuf,
}

impl ResultStore {
    pub fn new(root_dir: PathBuf) -> StoreResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    fn entry_path(&self, name: &str) -> PathBuf {
        self.root_dir.join(format!("{name}.json"))
    }

    pub fn has(&self, name: &str) -> bool {
        validate_name(name).is_ok() && self.entry_path(name).exists()
    }

    /// Persist a bundle under `name`, overwriting any prior entry.
    ///
    /// The stored metadata gets `name` and `timestamp` stamped in when the
    /// caller did not provide them.
    pub fn save(
        &self,
        name: &str,
        bundle: &CurveBundle,
        metadata: Metadata,
    ) -> StoreResult<NamedResult> {
        validate_name(name)?;

        let timestamp = chrono::Utc::now().to_rfc3339();
        let mut metadata = metadata;
        metadata
            .entry("name".to_string())
            .or_insert_with(|| serde_json::Value::String(name.to_string()));
        metadata
            .entry("timestamp".to_string())
            .or_insert_with(|| serde_json::Value::String(timestamp.clone()));

        let record = StoredRecord {
            name: name.to_string(),
            timestamp: timestamp.clone(),
            metadata: metadata.clone(),
            data: bundle.to_flat(),
        };
        let json = serde_json::to_string_pretty(&record)?;

        // Atomic at single-entry granularity
        let tmp_path = self.root_dir.join(format!(".{name}.json.tmp"));
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, self.entry_path(name))?;

        Ok(NamedResult {
            name: name.to_string(),
            timestamp,
            metadata,
            bundle: bundle.clone(),
        })
    }

    pub fn load(&self, name: &str) -> StoreResult<NamedResult> {
        validate_name(name)?;
        let path = self.entry_path(name);
        if !path.exists() {
            return Err(StoreError::NotFound {
                name: name.to_string(),
            });
        }

        let content = fs::read_to_string(path)?;
        let record: StoredRecord = serde_json::from_str(&content)?;
        let bundle = CurveBundle::from_flat(&record.data).map_err(|e| StoreError::Corrupt {
            name: name.to_string(),
            message: e.to_string(),
        })?;

        Ok(NamedResult {
            name: record.name,
            timestamp: record.timestamp,
            metadata: record.metadata,
            bundle,
        })
    }

    /// List all entries, most recent first. Unreadable entries are skipped
    /// with a warning rather than failing the whole listing.
    pub fn list(&self) -> StoreResult<Vec<HistorySummary>> {
        let mut entries = Vec::new();

        if !self.root_dir.exists() {
            return Ok(entries);
        }

        for dir_entry in fs::read_dir(&self.root_dir)? {
            let dir_entry = dir_entry?;
            let path = dir_entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match fs::read_to_string(&path)
                .map_err(StoreError::from)
                .and_then(|content| Ok(serde_json::from_str::<StoredRecord>(&content)?))
            {
                Ok(record) => entries.push(HistorySummary {
                    name: record.name,
                    timestamp: record.timestamp,
                }),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unreadable history entry");
                }
            }
        }

        // RFC3339 UTC timestamps sort lexicographically; name breaks ties
        entries.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| b.name.cmp(&a.name))
        });
        Ok(entries)
    }

    /// Remove an entry. Removing a missing entry is not an error.
    pub fn delete(&self, name: &str) -> StoreResult<()> {
        validate_name(name)?;
        let path = self.entry_path(name);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> StoreResult<()> {
    if name.trim().is_empty() {
        return Err(StoreError::Validation {
            message: "name must not be empty".to_string(),
        });
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(StoreError::Validation {
            message: format!("name '{name}' must not contain path separators"),
        });
    }
    Ok(())
}
