//! # arfni-core
//!
//! Core library for the Arfni plugin registry providing:
//! - Plugin manifest types (plugin.yaml)
//! - Category catalog and registry document types (registry/index.json)
//! - Layered generator configuration (embedded defaults, file, environment)
//! - The shared error type

pub mod config;
pub mod error;
pub mod types;

pub use config::{ConfigOverrides, RegistryConfig, RepositoryConfig};
pub use error::{Error, Result};
