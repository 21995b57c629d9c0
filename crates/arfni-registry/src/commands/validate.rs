//! `--validate-only`: strict validation, nothing written

use anyhow::{Context, Result};
use arfni_core::RegistryConfig;
use arfni_plugins::{RegistryPipeline, ValidationMode};
use std::process::ExitCode;

use super::{print_manifest_reports, print_summary};
use crate::output;

pub fn run(config: &RegistryConfig, quiet: bool) -> Result<ExitCode> {
    let pipeline = RegistryPipeline::new(config, ValidationMode::Strict);

    let spinner = output::spinner("Scanning plugin manifests...", quiet);
    let report = pipeline.scan();
    spinner.finish_and_clear();
    let report = report.context("Failed to scan plugin manifests")?;

    output::info(&format!(
        "Validating {} manifest(s) in {}",
        report.manifests.len(),
        config.plugins_path()
    ));
    print_manifest_reports(config, &report);
    print_summary(&report);

    if report.has_invalid() {
        output::error(&format!(
            "Validation failed: {} invalid manifest(s)",
            report.invalid
        ));
        return Ok(ExitCode::FAILURE);
    }

    output::success("All manifests are valid");
    Ok(ExitCode::SUCCESS)
}
