//! Category catalog types

use super::OrderedMap;
use serde::{Deserialize, Serialize};

/// Display metadata for one plugin category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
    /// Human-readable category name (e.g. "Database Plugins")
    pub name: String,

    /// Short description shown by registry consumers
    pub description: String,
}

impl CategoryInfo {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// The fixed table of valid categories, in declaration order.
///
/// Keys of this table are the only accepted values of a manifest's
/// `category` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryCatalog(OrderedMap<CategoryInfo>);

impl CategoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a category
    pub fn with_category(mut self, key: impl Into<String>, info: CategoryInfo) -> Self {
        self.0.insert(key, info);
        self
    }

    pub fn get(&self, key: &str) -> Option<&CategoryInfo> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryInfo)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Comma-separated list of valid keys, used in validation messages
    pub fn key_list(&self) -> String {
        self.keys().collect::<Vec<_>>().join(", ")
    }
}
