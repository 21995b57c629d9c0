//! Registry document types (registry/index.json)

use super::{OrderedMap, Provides};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};

/// Status assigned to every generated entry
pub const DEFAULT_STATUS: &str = "stable";

/// Source repository coordinates of a plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRef {
    pub owner: String,
    pub repo: String,
    pub branch: String,
}

/// Normalized registry record for one plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// Manifest `name`, verbatim
    pub id: String,

    /// Display name
    pub name: String,

    pub category: String,

    pub version: String,

    pub description: String,

    pub author: String,

    pub homepage: String,

    pub license: String,

    /// Plugin directory relative to the repository root, `/`-separated
    pub path: String,

    pub repository: RepositoryRef,

    pub provides: Provides,

    pub requires: Map<String, JsonValue>,

    pub tags: Vec<String>,

    pub icon: String,

    pub downloads: u64,

    pub stars: u64,

    pub verified: bool,

    pub status: String,

    #[serde(serialize_with = "serialize_timestamp")]
    pub last_updated: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

/// A catalog category annotated with its plugin count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub name: String,
    pub description: String,
    pub count: usize,
}

/// Per-category counts, keyed by category in catalog order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryStats(OrderedMap<CategorySummary>);

impl CategoryStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, summary: CategorySummary) {
        self.0.insert(key, summary);
    }

    pub fn get(&self, key: &str) -> Option<&CategorySummary> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategorySummary)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Categories that hold at least one plugin
    pub fn non_empty(&self) -> impl Iterator<Item = (&str, &CategorySummary)> {
        self.iter().filter(|(_, summary)| summary.count > 0)
    }
}

/// Summary statistics of a registry document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    pub total_plugins: usize,
    pub total_downloads: u64,
    pub categories_count: usize,
    #[serde(serialize_with = "serialize_timestamp")]
    pub last_sync: DateTime<Utc>,
}

/// The consolidated registry index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryDocument {
    pub schema_version: String,

    pub version: String,

    #[serde(serialize_with = "serialize_timestamp")]
    pub last_updated: DateTime<Utc>,

    /// Repository base URL
    pub repository: String,

    pub categories: CategoryStats,

    /// Entries sorted by display name
    pub plugins: Vec<RegistryEntry>,

    pub stats: RegistryStats,
}

/// RFC 3339 in UTC with millisecond precision and a `Z` suffix
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_timestamp<S: Serializer>(
    timestamp: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(timestamp))
}
