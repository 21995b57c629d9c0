//! Plugin registry generation for Arfni
//!
//! This crate handles:
//! - Manifest discovery and parsing (plugin.yaml)
//! - Manifest validation
//! - Registry entry construction
//! - Category aggregation and registry assembly
//! - The strict/permissive pipeline that ties them together

pub mod assembler;
pub mod builder;
pub mod categories;
pub mod loader;
pub mod pipeline;
pub mod validator;

pub use assembler::RegistryAssembler;
pub use builder::EntryBuilder;
pub use categories::aggregate_categories;
pub use loader::{LoadedManifest, ManifestLoader};
pub use pipeline::{
    ManifestOutcome, ManifestReport, RegistryPipeline, ScanReport, ValidationMode,
};
pub use validator::{ManifestValidator, ValidationResult};
