// ── Application inventory domain types ──

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One managed application on the device.
///
/// Serialized field names are the stable identifiers callers bind to
/// (`store_app_id`, `is_uncontrolled`, `title`, ...). Records are plain
/// values: a new set is built on every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    /// Unique within one fetch result.
    pub store_app_id: String,
    pub app_type: String,
    pub author_type: String,
    pub hostname: String,
    pub icon: String,
    pub image: String,
    pub index: String,
    pub is_uncontrolled: bool,
    pub port: String,
    pub scheme: String,
    pub status: String,
    /// Display-name variants in device order; may be empty.
    #[serde(rename = "title")]
    pub titles: Vec<TitleVariant>,
}

/// A locale-keyed display-name pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleVariant {
    pub custom: String,
    pub en_us: String,
}

impl ApplicationRecord {
    /// Best human-facing name: first non-empty `en_us`, then first
    /// non-empty `custom`, then the store id.
    pub fn display_title(&self) -> &str {
        self.titles
            .iter()
            .map(|t| t.en_us.as_str())
            .find(|s| !s.is_empty())
            .or_else(|| {
                self.titles
                    .iter()
                    .map(|t| t.custom.as_str())
                    .find(|s| !s.is_empty())
            })
            .unwrap_or(&self.store_app_id)
    }
}

/// Index a fetch result by `store_app_id`.
pub fn index_by_id(records: &[ApplicationRecord]) -> HashMap<&str, &ApplicationRecord> {
    records
        .iter()
        .map(|r| (r.store_app_id.as_str(), r))
        .collect()
}
