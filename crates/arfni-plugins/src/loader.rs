//! Manifest discovery and parsing
//!
//! Walks the plugins directory for files named like the configured manifest
//! file (plugin.yaml by default), skipping dependency caches and build
//! output, and parses each one into a [`Manifest`].

use arfni_core::types::Manifest;
use arfni_core::{Error, RegistryConfig, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A parsed manifest and the file it came from
#[derive(Debug, Clone)]
pub struct LoadedManifest {
    pub path: PathBuf,
    pub manifest: Manifest,
}

/// Finds and parses plugin manifests under a root directory
#[derive(Debug, Clone)]
pub struct ManifestLoader {
    root: PathBuf,
    filename: String,
    exclusions: GlobSet,
}

impl ManifestLoader {
    /// Create a loader for `root`.
    ///
    /// Each entry of `exclude_dirs` is a directory name; any path containing
    /// a segment with that name is skipped.
    pub fn new(
        root: impl Into<PathBuf>,
        filename: impl Into<String>,
        exclude_dirs: &[String],
    ) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();

        for dir in exclude_dirs {
            for pattern in [format!("**/{}", dir), format!("**/{}/**", dir)] {
                let glob = Glob::new(&pattern).map_err(|e| {
                    Error::invalid_config(format!("Invalid exclusion pattern '{}': {}", pattern, e))
                })?;
                builder.add(glob);
            }
        }

        let exclusions = builder
            .build()
            .map_err(|e| Error::invalid_config(format!("Failed to build exclusion set: {}", e)))?;

        Ok(Self {
            root: root.into(),
            filename: filename.into(),
            exclusions,
        })
    }

    /// Create a loader for the configured plugins directory
    pub fn from_config(config: &RegistryConfig) -> Result<Self> {
        Self::new(
            config.plugins_path().into_std_path_buf(),
            config.manifest_filename.clone(),
            &config.exclude_dirs,
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Discover manifest files.
    ///
    /// Entries within a directory are visited in file-name order. Unreadable
    /// directories are logged and skipped; a missing root yields nothing.
    pub fn discover(&self) -> Vec<PathBuf> {
        if !self.root.is_dir() {
            warn!("Plugins directory not found: {}", self.root.display());
            return Vec::new();
        }

        let mut found = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_excluded(e.path()));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("{}", Error::walk(e.to_string()));
                    continue;
                }
            };

            if entry.file_type().is_file() && entry.file_name() == self.filename.as_str() {
                debug!("Found manifest: {}", entry.path().display());
                found.push(entry.into_path());
            }
        }

        found
    }

    /// Read and parse one manifest file.
    ///
    /// Any read or parse problem is reported as [`Error::ManifestParse`]
    /// carrying the file path.
    pub fn load(&self, path: &Path) -> Result<LoadedManifest> {
        let display = path.display().to_string();

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::manifest_parse(&display, e.to_string()))?;

        let manifest = Manifest::from_yaml(&content).map_err(|e| match e {
            Error::InvalidManifest { message } => Error::manifest_parse(&display, message),
            other => Error::manifest_parse(&display, other.to_string()),
        })?;

        Ok(LoadedManifest {
            path: path.to_path_buf(),
            manifest,
        })
    }

    /// Exclusions only look at the part of the path below the root, so a
    /// root that itself sits under e.g. `dist/` is still scanned
    fn is_excluded(&self, path: &Path) -> bool {
        match path.strip_prefix(&self.root) {
            Ok(rel) if rel.as_os_str().is_empty() => false,
            Ok(rel) => self.exclusions.is_match(rel),
            Err(_) => false,
        }
    }
}
