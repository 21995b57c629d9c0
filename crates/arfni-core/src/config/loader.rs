//! Layered configuration loader
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. Config file (--config)
//! 3. Environment variables (ARFNI_REGISTRY_* prefix)
//! 4. CLI flags (handled by caller through [`ConfigOverrides`])

use crate::error::{Error, Result};
use crate::types::{CategoryCatalog, RepositoryRef};
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use serde_yaml_ng::Value as YamlValue;
use std::env;
use std::fs;
use tracing::debug;
use url::Url;

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../embedded/config/"]
#[prefix = ""]
struct EmbeddedConfigs;

const DEFAULTS_FILE: &str = "registry.yaml";

/// Repository root override
pub const ENV_REPO_ROOT: &str = "ARFNI_REGISTRY_REPO_ROOT";
/// Plugins directory override
pub const ENV_PLUGINS_DIR: &str = "ARFNI_REGISTRY_PLUGINS_DIR";
/// Output file override
pub const ENV_OUTPUT: &str = "ARFNI_REGISTRY_OUTPUT";
/// Repository base URL override
pub const ENV_REPOSITORY_URL: &str = "ARFNI_REGISTRY_REPOSITORY_URL";

/// Where the plugins live upstream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Base URL (e.g. https://github.com/Arfni/arfni-plugins)
    pub url: String,
    pub owner: String,
    pub repo: String,
    pub branch: String,
}

/// Immutable configuration for one generator run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// `schema_version` written to the registry
    pub schema_version: String,

    /// `version` written to the registry
    pub registry_version: String,

    /// Repository root; entry paths are relative to it
    pub repo_root: Utf8PathBuf,

    /// Plugins directory, relative to `repo_root` unless absolute
    pub plugins_dir: Utf8PathBuf,

    /// Output file, relative to `repo_root` unless absolute
    pub output: Utf8PathBuf,

    /// File name that marks a plugin manifest
    pub manifest_filename: String,

    /// Directory names skipped during discovery
    #[serde(default)]
    pub exclude_dirs: Vec<String>,

    pub repository: RepositoryConfig,

    /// Valid categories, in output order
    pub categories: CategoryCatalog,
}

/// Values that take precedence over every file-based layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub repo_root: Option<Utf8PathBuf>,
    pub plugins_dir: Option<Utf8PathBuf>,
    pub output: Option<Utf8PathBuf>,
    pub repository_url: Option<String>,
}

impl ConfigOverrides {
    /// Read overrides from `ARFNI_REGISTRY_*` environment variables.
    /// Empty variables are ignored.
    pub fn from_env() -> Self {
        let var = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());

        Self {
            repo_root: var(ENV_REPO_ROOT).map(Utf8PathBuf::from),
            plugins_dir: var(ENV_PLUGINS_DIR).map(Utf8PathBuf::from),
            output: var(ENV_OUTPUT).map(Utf8PathBuf::from),
            repository_url: var(ENV_REPOSITORY_URL),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl RegistryConfig {
    /// Configuration from the embedded defaults only
    pub fn defaults() -> Result<Self> {
        let config: Self = serde_yaml_ng::from_value(Self::embedded_defaults()?)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with layered precedence.
    ///
    /// Starts from the embedded defaults, merges `config_file` on top when
    /// given, then applies environment overrides. The result is validated.
    pub fn load(config_file: Option<&Utf8Path>) -> Result<Self> {
        let mut layered = Self::embedded_defaults()?;

        if let Some(path) = config_file {
            let content = fs::read_to_string(path).map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::config_not_found(path.as_str())
                } else {
                    Error::Io(e)
                }
            })?;

            let overlay: YamlValue = serde_yaml_ng::from_str(&content)?;
            match overlay {
                YamlValue::Null => debug!("Config file {} is empty, using defaults", path),
                YamlValue::Mapping(_) => {
                    debug!("Merging config file: {}", path);
                    merge_layer(&mut layered, overlay);
                }
                _ => {
                    return Err(Error::invalid_config(format!(
                        "{} must contain a YAML mapping",
                        path
                    )))
                }
            }
        }

        let config: Self = serde_yaml_ng::from_value(layered)?;
        config.with_overrides(ConfigOverrides::from_env())
    }

    /// Apply overrides and re-validate
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self> {
        if !overrides.is_empty() {
            debug!("Applying config overrides: {:?}", overrides);
        }
        if let Some(root) = overrides.repo_root {
            self.repo_root = root;
        }
        if let Some(dir) = overrides.plugins_dir {
            self.plugins_dir = dir;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        if let Some(url) = overrides.repository_url {
            self.repository.url = url;
        }

        self.validate()?;
        Ok(self)
    }

    /// Make `repo_root` absolute against the current working directory
    pub fn resolve_repo_root(mut self) -> Result<Self> {
        if self.repo_root.is_relative() {
            let cwd = env::current_dir()?;
            let cwd = Utf8PathBuf::try_from(cwd).map_err(|_| {
                Error::invalid_config("Current directory path is not valid UTF-8")
            })?;
            self.repo_root = normalize_dots(&cwd.join(&self.repo_root));
        }
        Ok(self)
    }

    /// Check the layered configuration for values the pipeline cannot use
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(Error::invalid_config(
                "At least one category must be defined",
            ));
        }

        let filename = self.manifest_filename.trim();
        if filename.is_empty() || filename.contains('/') || filename.contains('\\') {
            return Err(Error::invalid_config(format!(
                "manifest_filename must be a plain file name, got '{}'",
                self.manifest_filename
            )));
        }

        let url = Url::parse(&self.repository.url).map_err(|e| {
            Error::invalid_config(format!(
                "repository.url '{}' is not a valid URL: {}",
                self.repository.url, e
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_config(format!(
                "repository.url must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.repository.branch.trim().is_empty() {
            return Err(Error::invalid_config("repository.branch must not be empty"));
        }

        Ok(())
    }

    /// Absolute (or repo-root relative) plugins directory
    pub fn plugins_path(&self) -> Utf8PathBuf {
        self.repo_root.join(&self.plugins_dir)
    }

    /// Absolute (or repo-root relative) registry output file
    pub fn output_path(&self) -> Utf8PathBuf {
        self.repo_root.join(&self.output)
    }

    /// Repository base URL without a trailing slash
    pub fn repository_url(&self) -> &str {
        self.repository.url.trim_end_matches('/')
    }

    /// Browsable URL of a directory in the repository
    pub fn tree_url(&self, relative_path: &str) -> String {
        format!(
            "{}/tree/{}/{}",
            self.repository_url(),
            self.repository.branch,
            relative_path
        )
    }

    /// Repository coordinates stamped on every entry
    pub fn repository_ref(&self) -> RepositoryRef {
        RepositoryRef {
            owner: self.repository.owner.clone(),
            repo: self.repository.repo.clone(),
            branch: self.repository.branch.clone(),
        }
    }

    fn embedded_defaults() -> Result<YamlValue> {
        let file = EmbeddedConfigs::get(DEFAULTS_FILE)
            .ok_or_else(|| Error::config_not_found(format!("embedded:{}", DEFAULTS_FILE)))?;
        let content = std::str::from_utf8(&file.data).map_err(|_| {
            Error::invalid_config(format!("Invalid UTF-8 in embedded {}", DEFAULTS_FILE))
        })?;
        Ok(serde_yaml_ng::from_str(content)?)
    }
}

/// Recursively merge `overlay` into `base`. The `categories` table is
/// replaced as a whole so a config file can define its own catalog.
fn merge_layer(base: &mut YamlValue, overlay: YamlValue) {
    match (base, overlay) {
        (YamlValue::Mapping(base_map), YamlValue::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                if key.as_str() != Some("categories") {
                    if let Some(existing) = base_map.get_mut(&key) {
                        merge_layer(existing, value);
                        continue;
                    }
                }
                base_map.insert(key, value);
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Drop `.` components so joined paths stay readable in output
fn normalize_dots(path: &Utf8Path) -> Utf8PathBuf {
    path.components()
        .filter(|c| !matches!(c, camino::Utf8Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn clear_env() {
        for name in [ENV_REPO_ROOT, ENV_PLUGINS_DIR, ENV_OUTPUT, ENV_REPOSITORY_URL] {
            env::remove_var(name);
        }
    }

    fn write_config(dir: &TempDir, content: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::try_from(dir.path().join("registry.yaml")).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_embedded_defaults() {
        let config = RegistryConfig::defaults().unwrap();
        assert_eq!(config.manifest_filename, "plugin.yaml");
        assert_eq!(config.output, Utf8PathBuf::from("registry/index.json"));
        assert_eq!(config.repository.url, "https://github.com/Arfni/arfni-plugins");
        assert_eq!(config.repository.branch, "main");
        assert_eq!(config.exclude_dirs, vec!["node_modules", "dist"]);
        assert_eq!(
            config.categories.key_list(),
            "framework, database, cache, message_queue, proxy, cicd, orchestration, infrastructure"
        );
    }

    #[test]
    #[serial]
    fn test_load_without_file_matches_defaults() {
        clear_env();
        let loaded = RegistryConfig::load(None).unwrap();
        assert_eq!(loaded, RegistryConfig::defaults().unwrap());
    }

    #[test]
    #[serial]
    fn test_file_layer_merges_nested_keys() {
        clear_env();
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "output: out/index.json\nrepository:\n  branch: develop\n",
        );

        let config = RegistryConfig::load(Some(&path)).unwrap();
        assert_eq!(config.output, Utf8PathBuf::from("out/index.json"));
        assert_eq!(config.repository.branch, "develop");
        // untouched siblings survive the merge
        assert_eq!(config.repository.owner, "Arfni");
        assert_eq!(config.categories.len(), 8);
    }

    #[test]
    #[serial]
    fn test_file_layer_replaces_categories() {
        clear_env();
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "categories:\n  monitoring:\n    name: Monitoring Plugins\n    description: Metrics\n",
        );

        let config = RegistryConfig::load(Some(&path)).unwrap();
        assert_eq!(config.categories.key_list(), "monitoring");
    }

    #[test]
    #[serial]
    fn test_empty_file_keeps_defaults() {
        clear_env();
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "");
        let config = RegistryConfig::load(Some(&path)).unwrap();
        assert_eq!(config, RegistryConfig::defaults().unwrap());
    }

    #[test]
    #[serial]
    fn test_missing_file_is_config_not_found() {
        clear_env();
        let result = RegistryConfig::load(Some(Utf8Path::new("/nonexistent/registry.yaml")));
        assert!(matches!(result, Err(Error::ConfigNotFound { .. })));
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        clear_env();
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "plugins_dir: from-file\n");

        env::set_var(ENV_PLUGINS_DIR, "from-env");
        env::set_var(ENV_REPOSITORY_URL, "https://example.com/org/plugins");
        let config = RegistryConfig::load(Some(&path));
        clear_env();

        let config = config.unwrap();
        assert_eq!(config.plugins_dir, Utf8PathBuf::from("from-env"));
        assert_eq!(config.repository.url, "https://example.com/org/plugins");
    }

    #[test]
    fn test_invalid_repository_url_rejected() {
        let overrides = ConfigOverrides {
            repository_url: Some("not a url".into()),
            ..Default::default()
        };
        let result = RegistryConfig::defaults().unwrap().with_overrides(overrides);
        assert!(matches!(result, Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn test_non_http_repository_url_rejected() {
        let overrides = ConfigOverrides {
            repository_url: Some("ftp://example.com/plugins".into()),
            ..Default::default()
        };
        assert!(RegistryConfig::defaults()
            .unwrap()
            .with_overrides(overrides)
            .is_err());
    }

    #[test]
    fn test_tree_url_trims_trailing_slash() {
        let overrides = ConfigOverrides {
            repository_url: Some("https://github.com/Arfni/arfni-plugins/".into()),
            ..Default::default()
        };
        let config = RegistryConfig::defaults()
            .unwrap()
            .with_overrides(overrides)
            .unwrap();
        assert_eq!(
            config.tree_url("plugins/cache/redis"),
            "https://github.com/Arfni/arfni-plugins/tree/main/plugins/cache/redis"
        );
    }

    #[test]
    fn test_paths_resolve_against_repo_root() {
        let overrides = ConfigOverrides {
            repo_root: Some(Utf8PathBuf::from("/srv/plugins-repo")),
            output: Some(Utf8PathBuf::from("/tmp/index.json")),
            ..Default::default()
        };
        let config = RegistryConfig::defaults()
            .unwrap()
            .with_overrides(overrides)
            .unwrap();
        assert_eq!(config.plugins_path(), Utf8PathBuf::from("/srv/plugins-repo/plugins"));
        // absolute output path wins over the root
        assert_eq!(config.output_path(), Utf8PathBuf::from("/tmp/index.json"));
    }

    #[test]
    fn test_resolve_repo_root_is_absolute() {
        let config = RegistryConfig::defaults()
            .unwrap()
            .resolve_repo_root()
            .unwrap();
        assert!(config.repo_root.is_absolute());
        assert!(!config.repo_root.as_str().ends_with("/."));
    }

    #[test]
    fn test_merge_layer_overwrites_scalars() {
        let mut base: YamlValue = serde_yaml_ng::from_str("a: 1\nb:\n  c: 2\n  d: 3\n").unwrap();
        let overlay: YamlValue = serde_yaml_ng::from_str("b:\n  d: 4\ne: 5\n").unwrap();
        merge_layer(&mut base, overlay);

        let expected: YamlValue =
            serde_yaml_ng::from_str("a: 1\nb:\n  c: 2\n  d: 4\ne: 5\n").unwrap();
        assert_eq!(base, expected);
    }
}
