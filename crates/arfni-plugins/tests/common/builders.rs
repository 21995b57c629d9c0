//! Manifest builders for creating test fixtures

#![allow(dead_code)]

/// Builds plugin.yaml content field by field
#[derive(Debug, Clone)]
pub struct ManifestBuilder {
    fields: Vec<(String, String)>,
}

impl ManifestBuilder {
    /// A manifest that passes validation
    pub fn valid(name: &str, category: &str) -> Self {
        Self { fields: Vec::new() }
            .field("apiVersion", "v0.1")
            .field("name", name)
            .field("version", "1.0.0")
            .field("category", category)
            .field("description", &format!("{} plugin", name))
            .field("author", "Arfni Team")
    }

    /// A manifest with no fields at all
    pub fn empty() -> Self {
        Self { fields: Vec::new() }
    }

    /// Set a scalar field (quoted)
    pub fn field(self, key: &str, value: &str) -> Self {
        self.raw(key, &format!("\"{}\"", value))
    }

    /// Set a field to raw YAML (flow style)
    pub fn raw(mut self, key: &str, yaml: &str) -> Self {
        self.fields.retain(|(k, _)| k != key);
        self.fields.push((key.to_string(), yaml.to_string()));
        self
    }

    pub fn without(mut self, key: &str) -> Self {
        self.fields.retain(|(k, _)| k != key);
        self
    }

    pub fn build(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| format!("{}: {}\n", k, v))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_replaces_fields() {
        let yaml = ManifestBuilder::valid("redis", "cache")
            .field("version", "2.0.0")
            .without("author")
            .build();
        assert!(yaml.contains("version: \"2.0.0\""));
        assert!(!yaml.contains("author"));
    }
}
