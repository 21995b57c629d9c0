//! Registry generator configuration

mod loader;

pub use loader::{
    ConfigOverrides, RegistryConfig, RepositoryConfig, ENV_OUTPUT, ENV_PLUGINS_DIR, ENV_REPO_ROOT,
    ENV_REPOSITORY_URL,
};
