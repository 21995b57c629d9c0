//! Plugin manifest types (plugin.yaml)
//!
//! Every field is optional at the parse boundary. Whether a manifest is
//! acceptable is decided later by the validator, so a document that is
//! missing required fields still parses successfully.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use serde_yaml_ng::Value as YamlValue;

/// Parsed plugin manifest
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Manifest {
    /// Manifest API version (e.g. "v0.1")
    #[serde(default, rename = "apiVersion", deserialize_with = "scalar_string")]
    pub api_version: Option<String>,

    /// Unique plugin identifier
    #[serde(default, deserialize_with = "scalar_string")]
    pub name: Option<String>,

    /// Plugin version (e.g. "1.0.0")
    #[serde(default, deserialize_with = "scalar_string")]
    pub version: Option<String>,

    /// Category key from the catalog
    #[serde(default, deserialize_with = "scalar_string")]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "scalar_string")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "scalar_string")]
    pub author: Option<String>,

    /// Display name; derived from `name` when absent
    #[serde(default, rename = "displayName", deserialize_with = "scalar_string")]
    pub display_name: Option<String>,

    #[serde(default, deserialize_with = "scalar_string")]
    pub homepage: Option<String>,

    #[serde(default, deserialize_with = "scalar_string")]
    pub license: Option<String>,

    /// Capabilities this plugin provides
    #[serde(default)]
    pub provides: Option<Provides>,

    /// Dependency name to version constraint
    #[serde(default)]
    pub requires: Option<Map<String, JsonValue>>,

    #[serde(default)]
    pub tags: Option<Vec<String>>,

    /// Icon filename relative to the plugin directory
    #[serde(default, deserialize_with = "scalar_string")]
    pub icon: Option<String>,

    /// Documentation link or path
    #[serde(default, deserialize_with = "scalar_string")]
    pub documentation: Option<String>,
}

impl Manifest {
    /// Parse manifest YAML.
    ///
    /// The top level must be a mapping; an empty document or a bare scalar
    /// is rejected.
    pub fn from_yaml(content: &str) -> crate::Result<Self> {
        let value: YamlValue = serde_yaml_ng::from_str(content)?;
        if !value.is_mapping() {
            return Err(crate::Error::invalid_manifest(format!(
                "manifest must be a YAML mapping, found {}",
                yaml_kind(&value)
            )));
        }
        Ok(serde_yaml_ng::from_value(value)?)
    }

    /// Look up a top-level field by its manifest key, treating empty
    /// strings as absent
    pub fn field(&self, key: &str) -> Option<&str> {
        let value = match key {
            "apiVersion" => &self.api_version,
            "name" => &self.name,
            "version" => &self.version,
            "category" => &self.category,
            "description" => &self.description,
            "author" => &self.author,
            "displayName" => &self.display_name,
            "homepage" => &self.homepage,
            "license" => &self.license,
            "icon" => &self.icon,
            "documentation" => &self.documentation,
            _ => return None,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }
}

/// Capabilities block of a manifest.
///
/// Keys other than `frameworks` and `service_kinds` are carried through to
/// the registry untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Provides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frameworks: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_kinds: Option<Vec<String>>,

    #[serde(flatten)]
    pub other: Map<String, JsonValue>,
}

impl Provides {
    /// The block used for manifests that declare no capabilities
    pub fn empty() -> Self {
        Self {
            frameworks: Some(Vec::new()),
            service_kinds: Some(Vec::new()),
            other: Map::new(),
        }
    }

    /// True when at least one of the capability lists is present.
    /// An empty list counts as present.
    pub fn has_capability_list(&self) -> bool {
        self.frameworks.is_some() || self.service_kinds.is_some()
    }
}

/// Accept any YAML scalar as a string so `version: 1.0` reaches the
/// validator as "1.0" instead of failing the whole parse.
///
/// Falsy scalars (`false`, zero, NaN) read as absent, the same as a missing
/// key or an empty string.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<YamlValue>::deserialize(deserializer)? {
        None | Some(YamlValue::Null) | Some(YamlValue::Bool(false)) => Ok(None),
        Some(YamlValue::String(s)) => Ok(Some(s)),
        Some(YamlValue::Number(n)) if is_falsy_number(&n) => Ok(None),
        Some(YamlValue::Number(n)) => Ok(Some(n.to_string())),
        Some(YamlValue::Bool(true)) => Ok(Some("true".to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected a scalar value, found {}",
            yaml_kind(&other)
        ))),
    }
}

fn is_falsy_number(n: &serde_yaml_ng::Number) -> bool {
    n.is_nan() || n.as_f64() == Some(0.0)
}

fn yaml_kind(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "an empty document",
        YamlValue::Bool(_) => "a boolean",
        YamlValue::Number(_) => "a number",
        YamlValue::String(_) => "a string",
        YamlValue::Sequence(_) => "a sequence",
        YamlValue::Mapping(_) => "a mapping",
        YamlValue::Tagged(_) => "a tagged value",
    }
}
