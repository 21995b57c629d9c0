//! Common test utilities for arfni-plugins
//!
//! This module provides shared test infrastructure including:
//! - A fixture repository laid out on a temporary directory
//! - A manifest builder that renders plugin.yaml content

#![allow(dead_code)]

pub mod builders;
pub mod fixtures;

pub use builders::*;
pub use fixtures::*;
