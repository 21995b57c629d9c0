//! CLI argument parsing with clap

use arfni_core::ConfigOverrides;
use camino::Utf8PathBuf;
use clap::Parser;

/// Arfni registry generator - builds registry/index.json from plugin manifests
#[derive(Parser, Debug)]
#[command(name = "arfni-registry")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Validate manifests only; exit non-zero if any is invalid
    #[arg(long)]
    pub validate_only: bool,

    /// Repository root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub repo_root: Option<Utf8PathBuf>,

    /// Plugins directory, relative to the repository root
    #[arg(long, value_name = "DIR")]
    pub plugins_dir: Option<Utf8PathBuf>,

    /// Registry output file, relative to the repository root
    #[arg(long, value_name = "FILE")]
    pub output: Option<Utf8PathBuf>,

    /// Path to a registry config file (YAML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Path flags as config overrides
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            repo_root: self.repo_root.clone(),
            plugins_dir: self.plugins_dir.clone(),
            output: self.output.clone(),
            repository_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_generation() {
        let cli = Cli::try_parse_from(["arfni-registry"]).unwrap();
        assert!(!cli.validate_only);
        assert!(cli.overrides().is_empty());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_path_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "arfni-registry",
            "--validate-only",
            "--repo-root",
            "/srv/plugins-repo",
            "--output",
            "public/index.json",
            "-vv",
        ])
        .unwrap();

        assert!(cli.validate_only);
        assert_eq!(cli.verbose, 2);
        let overrides = cli.overrides();
        assert_eq!(
            overrides.repo_root.as_deref(),
            Some(camino::Utf8Path::new("/srv/plugins-repo"))
        );
        assert_eq!(
            overrides.output.as_deref(),
            Some(camino::Utf8Path::new("public/index.json"))
        );
        assert!(overrides.plugins_dir.is_none());
    }
}
