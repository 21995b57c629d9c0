//! Command implementations
//!
//! Both modes share the per-manifest report and the valid/invalid summary.

pub mod generate;
pub mod validate;

use arfni_core::RegistryConfig;
use arfni_plugins::{ManifestOutcome, ManifestReport, ScanReport};
use std::path::Path;

use crate::output;

/// Print one status line per manifest, with violations underneath
pub(crate) fn print_manifest_reports(config: &RegistryConfig, report: &ScanReport) {
    for manifest in &report.manifests {
        let shown = display_path(config.repo_root.as_std_path(), manifest);

        match &manifest.outcome {
            ManifestOutcome::Valid => output::success(&shown),
            ManifestOutcome::Invalid { violations } => {
                output::error(&shown);
                for violation in violations {
                    output::detail(violation);
                }
            }
            ManifestOutcome::ParseError { message } => {
                output::error(&format!("{}: failed to parse ({})", shown, message));
            }
        }
    }
}

/// Valid/invalid totals
pub(crate) fn print_summary(report: &ScanReport) {
    output::header("Validation summary");
    output::kv("Valid", &report.valid.to_string());
    output::kv("Invalid", &report.invalid.to_string());

    for id in report.duplicate_ids() {
        output::warning(&format!("Duplicate plugin id: {}", id));
    }
}

fn display_path(repo_root: &Path, manifest: &ManifestReport) -> String {
    let rel = manifest
        .path
        .strip_prefix(repo_root)
        .unwrap_or(&manifest.path)
        .to_string_lossy()
        .replace('\\', "/");

    match &manifest.name {
        Some(name) if !name.is_empty() => format!("{} ({})", rel, name),
        _ => rel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn report(path: &str, name: Option<&str>) -> ManifestReport {
        ManifestReport {
            path: PathBuf::from(path),
            name: name.map(str::to_string),
            outcome: ManifestOutcome::Valid,
            included: true,
        }
    }

    #[test]
    fn test_display_path_is_repo_relative() {
        let shown = display_path(
            Path::new("/repo"),
            &report("/repo/plugins/cache/redis/plugin.yaml", Some("redis")),
        );
        assert_eq!(shown, "plugins/cache/redis/plugin.yaml (redis)");
    }

    #[test]
    fn test_display_path_without_name() {
        let shown = display_path(
            Path::new("/repo"),
            &report("/elsewhere/plugin.yaml", None),
        );
        assert_eq!(shown, "/elsewhere/plugin.yaml");
    }
}
