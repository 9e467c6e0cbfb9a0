//! Result data types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sl_core::{CurveBundle, FlatBundle};

/// Arbitrary key-value metadata attached to a saved result.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// Catalogue entry summary, ordered most-recent-first by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistorySummary {
    pub name: String,
    pub timestamp: String,
}

/// A persisted, named curve bundle. Immutable once saved.
#[derive(Debug, Clone)]
pub struct NamedResult {
    pub name: String,
    pub timestamp: String,
    pub metadata: Metadata,
    pub bundle: CurveBundle,
}

impl NamedResult {
    pub fn summary(&self) -> HistorySummary {
        HistorySummary {
            name: self.name.clone(),
            timestamp: self.timestamp.clone(),
        }
    }
}

/// On-disk record: the bundle is flattened at this serialization boundary
/// only, axis under the reserved `wavelength` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecord {
    pub name: String,
    pub timestamp: String,
    #[serde(default)]
    pub metadata: Metadata,
    pub data: FlatBundle,
}
