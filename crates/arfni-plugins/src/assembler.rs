//! Registry document assembly and output

use crate::categories::aggregate_categories;
use arfni_core::types::{RegistryDocument, RegistryEntry, RegistryStats};
use arfni_core::{RegistryConfig, Result};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Combines entries, category counts and summary statistics into the
/// registry document
pub struct RegistryAssembler<'a> {
    config: &'a RegistryConfig,
}

impl<'a> RegistryAssembler<'a> {
    pub fn new(config: &'a RegistryConfig) -> Self {
        Self { config }
    }

    /// Assemble a document stamped with the current time
    pub fn assemble(&self, entries: Vec<RegistryEntry>) -> RegistryDocument {
        self.assemble_at(entries, Utc::now())
    }

    /// Assemble a document stamped with `now`
    pub fn assemble_at(&self, mut entries: Vec<RegistryEntry>, now: DateTime<Utc>) -> RegistryDocument {
        sort_entries(&mut entries);

        let categories = aggregate_categories(&self.config.categories, &entries);
        let stats = RegistryStats {
            total_plugins: entries.len(),
            total_downloads: entries.iter().map(|e| e.downloads).sum(),
            categories_count: self.config.categories.len(),
            last_sync: now,
        };

        RegistryDocument {
            schema_version: self.config.schema_version.clone(),
            version: self.config.registry_version.clone(),
            last_updated: now,
            repository: self.config.repository_url().to_string(),
            categories,
            plugins: entries,
            stats,
        }
    }

    /// Write `document` as pretty-printed JSON, creating the parent
    /// directory when needed. Existing content is replaced.
    pub fn write(&self, document: &RegistryDocument, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!("Creating registry directory: {}", parent.display());
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(document)?;
        fs::write(path, json)?;

        info!(
            "Wrote registry with {} plugins to {}",
            document.stats.total_plugins,
            path.display()
        );
        Ok(())
    }
}

/// Sort entries by display name in dictionary order: base letters first,
/// then accents, then case with lower case ahead of upper case. Entries that
/// compare equal keep discovery order.
pub fn sort_entries(entries: &mut [RegistryEntry]) {
    entries.sort_by(|a, b| compare_names(&a.name, &b.name));
}

fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| with_accents(a).cmp(&with_accents(b)))
        .then_with(|| case_pattern(a).cmp(&case_pattern(b)))
        .then_with(|| a.cmp(b))
}

/// Lower-cased text with combining marks removed ("Élan" -> "elan")
fn base_letters(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Lower-cased decomposed text; unaccented letters sort before accented ones
fn with_accents(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

/// `false` for lower case, so "apache" sorts before "Apache"
fn case_pattern(s: &str) -> Vec<bool> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
        .collect()
}
