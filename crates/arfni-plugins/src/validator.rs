//! Manifest validation
//!
//! Every rule is checked independently so a single pass reports all the
//! problems with a manifest, not just the first one.

use arfni_core::types::{CategoryCatalog, Manifest};
use regex::Regex;
use std::sync::LazyLock;

/// Fields every manifest must set to a non-empty value
pub const REQUIRED_FIELDS: &[&str] = &[
    "apiVersion",
    "name",
    "version",
    "category",
    "description",
    "author",
];

// ASCII digits only; `\d` would also accept other Unicode digits
static API_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v[0-9]+\.[0-9]+$").expect("apiVersion regex is valid"));

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").expect("version regex is valid")
});

/// Verdict for one manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    /// Human-readable violations, in rule order
    pub violations: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Checks manifests against the required-field, format and catalog rules
pub struct ManifestValidator<'a> {
    catalog: &'a CategoryCatalog,
}

impl<'a> ManifestValidator<'a> {
    pub fn new(catalog: &'a CategoryCatalog) -> Self {
        Self { catalog }
    }

    /// Validate a parsed manifest
    pub fn validate(&self, manifest: &Manifest) -> ValidationResult {
        let mut violations = Vec::new();

        for field in REQUIRED_FIELDS {
            if manifest.field(field).is_none() {
                violations.push(format!("Missing required field: {}", field));
            }
        }

        if let Some(api_version) = manifest.field("apiVersion") {
            if !is_valid_api_version(api_version) {
                violations.push(format!(
                    "Invalid apiVersion format: {} (expected format: v0.1)",
                    api_version
                ));
            }
        }

        if let Some(category) = manifest.field("category") {
            if !self.catalog.contains(category) {
                violations.push(format!(
                    "Invalid category: {}. Must be one of: {}",
                    category,
                    self.catalog.key_list()
                ));
            }
        }

        if let Some(version) = manifest.field("version") {
            if !is_valid_version(version) {
                violations.push(format!(
                    "Invalid version format: {} (expected format: 1.0.0)",
                    version
                ));
            }
        }

        if let Some(provides) = &manifest.provides {
            // presence is enough; `frameworks: []` satisfies this rule
            if !provides.has_capability_list() {
                violations
                    .push("provides must contain either frameworks or service_kinds".to_string());
            }
        }

        ValidationResult { violations }
    }
}

/// `v<major>.<minor>`, e.g. v0.1
pub fn is_valid_api_version(value: &str) -> bool {
    API_VERSION_RE.is_match(value)
}

/// Strict `major.minor.patch` with no pre-release or build suffix
pub fn is_valid_version(value: &str) -> bool {
    VERSION_RE.is_match(value)
}
