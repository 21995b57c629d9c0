//! Registry generation pipeline
//!
//! Drives discovery, validation and entry building for every manifest, one
//! file at a time in discovery order. Per-file failures never abort the
//! run; they are recorded in the [`ScanReport`].

use crate::assembler::RegistryAssembler;
use crate::builder::EntryBuilder;
use crate::loader::ManifestLoader;
use crate::validator::ManifestValidator;
use arfni_core::types::{RegistryDocument, RegistryEntry};
use arfni_core::{Error, RegistryConfig, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// How invalid manifests are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Validation only: invalid manifests are excluded and fail the run
    Strict,
    /// Invalid manifests are reported but still included in the registry
    #[default]
    Permissive,
}

/// What happened to one manifest file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestOutcome {
    Valid,
    /// Parsed, but failed one or more rules
    Invalid { violations: Vec<String> },
    /// Could not be read or parsed
    ParseError { message: String },
}

/// Per-manifest record of a scan
#[derive(Debug, Clone)]
pub struct ManifestReport {
    pub path: PathBuf,
    /// Manifest `name`, when the file parsed and set one
    pub name: Option<String>,
    pub outcome: ManifestOutcome,
    /// Whether an entry was built for this manifest
    pub included: bool,
}

impl ManifestReport {
    pub fn is_valid(&self) -> bool {
        self.outcome == ManifestOutcome::Valid
    }
}

/// Result of scanning the plugins directory
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Built entries, in discovery order
    pub entries: Vec<RegistryEntry>,
    pub manifests: Vec<ManifestReport>,
    pub valid: usize,
    pub invalid: usize,
}

impl ScanReport {
    pub fn has_invalid(&self) -> bool {
        self.invalid > 0
    }

    /// Invalid manifests that were still turned into entries
    pub fn invalid_included(&self) -> usize {
        self.manifests
            .iter()
            .filter(|m| m.included && !m.is_valid())
            .count()
    }

    /// Plugin ids that appear on more than one entry
    pub fn duplicate_ids(&self) -> Vec<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for entry in &self.entries {
            *counts.entry(entry.id.as_str()).or_default() += 1;
        }
        let mut duplicates: Vec<String> = counts
            .into_iter()
            .filter(|(id, count)| *count > 1 && !id.is_empty())
            .map(|(id, _)| id.to_string())
            .collect();
        duplicates.sort();
        duplicates
    }
}

/// Discovery → validation → entry building → assembly
pub struct RegistryPipeline<'a> {
    config: &'a RegistryConfig,
    mode: ValidationMode,
}

impl<'a> RegistryPipeline<'a> {
    pub fn new(config: &'a RegistryConfig, mode: ValidationMode) -> Self {
        Self { config, mode }
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Scan every manifest under the plugins directory
    pub fn scan(&self) -> Result<ScanReport> {
        let loader = ManifestLoader::from_config(self.config)?;
        let paths = loader.discover();
        info!(
            "Found {} manifest(s) under {}",
            paths.len(),
            loader.root().display()
        );

        Ok(self.scan_paths(&loader, paths))
    }

    /// Scan an explicit list of manifest files
    pub fn scan_paths(&self, loader: &ManifestLoader, paths: Vec<PathBuf>) -> ScanReport {
        let validator = ManifestValidator::new(&self.config.categories);
        let builder = EntryBuilder::new(self.config);
        let mut report = ScanReport::default();

        for path in paths {
            let loaded = match loader.load(&path) {
                Ok(loaded) => loaded,
                Err(e) => {
                    warn!("{}", e);
                    let message = match e {
                        Error::ManifestParse { message, .. } => message,
                        other => other.to_string(),
                    };
                    report.invalid += 1;
                    report.manifests.push(ManifestReport {
                        path,
                        name: None,
                        outcome: ManifestOutcome::ParseError { message },
                        included: false,
                    });
                    continue;
                }
            };

            let result = validator.validate(&loaded.manifest);
            let outcome = if result.is_valid() {
                report.valid += 1;
                debug!("{} is valid", path.display());
                ManifestOutcome::Valid
            } else {
                report.invalid += 1;
                debug!(
                    "{} has {} violation(s)",
                    path.display(),
                    result.violations.len()
                );
                ManifestOutcome::Invalid {
                    violations: result.violations,
                }
            };

            let included =
                outcome == ManifestOutcome::Valid || self.mode == ValidationMode::Permissive;
            if included {
                report
                    .entries
                    .push(builder.build(&loaded.manifest, &loaded.path));
            }

            report.manifests.push(ManifestReport {
                path,
                name: loaded.manifest.name.clone(),
                outcome,
                included,
            });
        }

        for id in report.duplicate_ids() {
            warn!("Plugin id '{}' is declared by more than one manifest", id);
        }

        report
    }

    /// Scan and assemble the registry document.
    ///
    /// The built entries move into the document, so the returned report's
    /// `entries` is empty. Nothing is written; see
    /// [`RegistryAssembler::write`].
    pub fn generate(&self) -> Result<(RegistryDocument, ScanReport)> {
        let mut report = self.scan()?;
        let entries = std::mem::take(&mut report.entries);
        let document = RegistryAssembler::new(self.config).assemble(entries);
        Ok((document, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_permissive() {
        assert_eq!(ValidationMode::default(), ValidationMode::Permissive);
    }

    #[test]
    fn test_duplicate_ids_ignores_empty_ids() {
        let config = RegistryConfig::defaults().unwrap();
        let builder = EntryBuilder::new(&config);
        let path = PathBuf::from("plugins/x/plugin.yaml");
        let named = arfni_core::types::Manifest::from_yaml("name: redis\n").unwrap();
        let unnamed = arfni_core::types::Manifest::default();

        let report = ScanReport {
            entries: vec![
                builder.build(&named, &path),
                builder.build(&named, &path),
                builder.build(&unnamed, &path),
                builder.build(&unnamed, &path),
            ],
            ..Default::default()
        };

        assert_eq!(report.duplicate_ids(), vec!["redis"]);
    }
}
