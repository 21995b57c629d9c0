//! Fixture repository helpers
//!
//! Lays out a plugin repository (`plugins/<category>/<name>/plugin.yaml`)
//! on a temporary directory and produces a matching configuration.

#![allow(dead_code)]

use arfni_core::{ConfigOverrides, RegistryConfig};
use camino::Utf8PathBuf;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway plugin repository
pub struct FixtureRepo {
    temp_dir: TempDir,
}

impl FixtureRepo {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` to `plugins/<plugin_dir>/plugin.yaml`
    pub fn add_manifest(&self, plugin_dir: &str, content: &str) -> PathBuf {
        self.write_file(&format!("plugins/{}/plugin.yaml", plugin_dir), content)
    }

    /// Write an arbitrary file relative to the repository root
    pub fn write_file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.root().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).expect("Failed to create directory");
        std::fs::write(&path, content).expect("Failed to write fixture file");
        path
    }

    /// Default configuration rooted at this repository
    pub fn config(&self) -> RegistryConfig {
        let root = Utf8PathBuf::try_from(self.root().to_path_buf()).expect("UTF-8 temp path");
        RegistryConfig::defaults()
            .expect("embedded defaults")
            .with_overrides(ConfigOverrides {
                repo_root: Some(root),
                ..Default::default()
            })
            .expect("valid overrides")
    }

    pub fn output_path(&self) -> PathBuf {
        self.config().output_path().into_std_path_buf()
    }
}
