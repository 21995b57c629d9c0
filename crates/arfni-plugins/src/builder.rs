//! Registry entry construction
//!
//! Maps a manifest and the location of its file to a normalized
//! [`RegistryEntry`], filling defaults and deriving the display name and
//! homepage. Building never fails: in permissive mode even manifests that
//! did not validate are turned into entries.

use arfni_core::types::{Manifest, Provides, RegistryEntry, DEFAULT_STATUS};
use arfni_core::RegistryConfig;
use chrono::{DateTime, Utc};
use serde_json::Map;
use std::path::{Component, Path};

pub const DEFAULT_LICENSE: &str = "MIT";
pub const DEFAULT_ICON: &str = "icon.png";

/// Builds registry entries for one repository
pub struct EntryBuilder<'a> {
    config: &'a RegistryConfig,
}

impl<'a> EntryBuilder<'a> {
    pub fn new(config: &'a RegistryConfig) -> Self {
        Self { config }
    }

    /// Build an entry stamped with the current time
    pub fn build(&self, manifest: &Manifest, manifest_path: &Path) -> RegistryEntry {
        self.build_at(manifest, manifest_path, Utc::now())
    }

    /// Build an entry stamped with `now`
    pub fn build_at(
        &self,
        manifest: &Manifest,
        manifest_path: &Path,
        now: DateTime<Utc>,
    ) -> RegistryEntry {
        let path = relative_plugin_path(self.config.repo_root.as_std_path(), manifest_path);
        let text = |key: &str| manifest.field(key).unwrap_or_default().to_string();

        RegistryEntry {
            id: text("name"),
            name: display_name(manifest),
            category: text("category"),
            version: text("version"),
            description: text("description"),
            author: text("author"),
            homepage: manifest
                .field("homepage")
                .map(str::to_string)
                .unwrap_or_else(|| self.config.tree_url(&path)),
            license: manifest
                .field("license")
                .unwrap_or(DEFAULT_LICENSE)
                .to_string(),
            repository: self.config.repository_ref(),
            provides: manifest.provides.clone().unwrap_or_else(Provides::empty),
            requires: manifest.requires.clone().unwrap_or_else(Map::new),
            tags: manifest.tags.clone().unwrap_or_default(),
            icon: manifest.field("icon").unwrap_or(DEFAULT_ICON).to_string(),
            downloads: 0,
            stars: 0,
            verified: true,
            status: DEFAULT_STATUS.to_string(),
            last_updated: now,
            documentation: manifest.field("documentation").map(str::to_string),
            path,
        }
    }
}

/// `displayName` when set, otherwise `name` with its first character
/// upper-cased. Only the first character changes: "my-plugin" becomes
/// "My-plugin".
pub fn display_name(manifest: &Manifest) -> String {
    if let Some(display) = manifest.field("displayName") {
        return display.to_string();
    }
    capitalize_first(manifest.field("name").unwrap_or_default())
}

fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Directory of `manifest_path` relative to `repo_root`, joined with `/`
/// whatever the host separator is. A manifest outside the root keeps its
/// full directory path.
pub fn relative_plugin_path(repo_root: &Path, manifest_path: &Path) -> String {
    let dir = manifest_path.parent().unwrap_or(manifest_path);
    let rel = dir.strip_prefix(repo_root).unwrap_or(dir);

    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::CurDir => None,
            Component::ParentDir => Some("..".to_string()),
            Component::RootDir | Component::Prefix(_) => Some(String::new()),
        })
        .collect::<Vec<_>>()
        .join("/")
}
