//! Default mode: build and write the registry index

use anyhow::{Context, Result};
use arfni_core::types::RegistryDocument;
use arfni_core::RegistryConfig;
use arfni_plugins::{RegistryAssembler, RegistryPipeline, ValidationMode};
use std::process::ExitCode;
use tabled::{settings::Style, Table, Tabled};

use super::{print_manifest_reports, print_summary};
use crate::output;

#[derive(Tabled)]
struct CategoryRow {
    category: String,
    name: String,
    plugins: usize,
}

pub fn run(config: &RegistryConfig, quiet: bool) -> Result<ExitCode> {
    let pipeline = RegistryPipeline::new(config, ValidationMode::Permissive);

    let spinner = output::spinner("Scanning plugin manifests...", quiet);
    let generated = pipeline.generate();
    spinner.finish_and_clear();
    let (document, report) = generated.context("Failed to scan plugin manifests")?;

    print_manifest_reports(config, &report);
    print_summary(&report);

    let included = report.invalid_included();
    if included > 0 {
        output::warning(&format!(
            "{} invalid manifest(s) included in the registry",
            included
        ));
    }

    let output_path = config.output_path();
    RegistryAssembler::new(config)
        .write(&document, output_path.as_std_path())
        .with_context(|| format!("Failed to write registry to {}", output_path))?;

    output::success("Registry generated");
    output::kv("Output", output_path.as_str());
    output::kv("Total plugins", &document.stats.total_plugins.to_string());
    output::kv("Categories", &document.stats.categories_count.to_string());
    print_category_table(&document);

    Ok(ExitCode::SUCCESS)
}

fn print_category_table(document: &RegistryDocument) {
    let rows: Vec<CategoryRow> = document
        .categories
        .non_empty()
        .map(|(key, summary)| CategoryRow {
            category: key.to_string(),
            name: summary.name.clone(),
            plugins: summary.count,
        })
        .collect();

    if rows.is_empty() {
        return;
    }

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("\n{}", table);
}
