//! Error types for arfni-core

use thiserror::Error;

/// Result type alias using arfni-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for the registry generator
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A plugin manifest could not be read or parsed
    #[error("Failed to parse manifest {path}: {message}")]
    ManifestParse { path: String, message: String },

    /// Manifest content has the wrong shape
    #[error("Invalid manifest: {message}")]
    InvalidManifest { message: String },

    /// Directory traversal failed
    #[error("Failed to walk directory: {message}")]
    Walk { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a manifest parse error
    pub fn manifest_parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ManifestParse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid manifest error
    pub fn invalid_manifest(message: impl Into<String>) -> Self {
        Self::InvalidManifest {
            message: message.into(),
        }
    }

    /// Create a directory walk error
    pub fn walk(message: impl Into<String>) -> Self {
        Self::Walk {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_parse_message_names_the_file() {
        let err = Error::manifest_parse("plugins/cache/redis/plugin.yaml", "bad indentation");
        let msg = err.to_string();
        assert!(msg.contains("plugins/cache/redis/plugin.yaml"));
        assert!(msg.contains("bad indentation"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
