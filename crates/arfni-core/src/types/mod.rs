//! Type definitions for plugin manifests and the registry index

mod catalog_types;
mod manifest_types;
mod ordered;
mod registry_types;

pub use catalog_types::*;
pub use manifest_types::*;
pub use ordered::OrderedMap;
pub use registry_types::*;
