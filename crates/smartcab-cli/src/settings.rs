//! Layered configuration loading
//!
//! Defaults, then an optional TOML file, then `SMARTCAB__SECTION__KEY`
//! environment variables. Command-line flags are applied on top by the
//! commands themselves.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{ConfigBuilder, Environment, File, FileFormat};

use smartcab_core::SmartcabConfig;

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "SMARTCAB";

/// Variable naming an explicit configuration file
pub const CONFIG_PATH_VAR: &str = "SMARTCAB_CONFIG";

/// Default file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "smartcab.toml";

/// Effective configuration and where it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: SmartcabConfig,
    pub source: Option<PathBuf>,
}

/// Load configuration, reading `explicit` if given, otherwise the first file
/// found by [`find_config_file`]
pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig> {
    let source = match explicit {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Some(path.to_path_buf())
        }
        None => find_config_file(),
    };

    let config = load_layered(source.as_deref(), ENV_PREFIX)?;
    Ok(LoadedConfig { config, source })
}

/// Build and validate the configuration from `path` and `env_prefix` variables
pub fn load_layered(path: Option<&Path>, env_prefix: &str) -> Result<SmartcabConfig> {
    let mut builder = ConfigBuilder::<config::builder::DefaultState>::default();

    if let Some(path) = path {
        builder = builder.add_source(File::from(path).format(FileFormat::Toml));
    }

    builder = builder.add_source(
        Environment::with_prefix(env_prefix)
            .separator("__")
            .try_parsing(true),
    );

    let config: SmartcabConfig = builder
        .build()
        .context("Failed to read configuration")?
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Check in order: `SMARTCAB_CONFIG`, `./smartcab.toml`,
/// `~/.config/smartcab/smartcab.toml`
pub fn find_config_file() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_VAR) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    if let Some(home) = dirs::home_dir() {
        let user_config = home.join(".config").join("smartcab").join(CONFIG_FILE_NAME);
        if user_config.exists() {
            return Some(user_config);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_file() {
        let config = load_layered(None, "SMARTCAB_TEST_EMPTY").unwrap();
        assert_eq!(config, SmartcabConfig::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = write_config(
            r#"
[learning]
epsilon = 0.2

[simulation]
trials = 7
seed = 42
"#,
        );

        let config = load_layered(Some(file.path()), "SMARTCAB_TEST_FILE").unwrap();

        assert_eq!(config.learning.epsilon, 0.2);
        assert_eq!(config.learning.alpha, 0.9);
        assert_eq!(config.simulation.trials, 7);
        assert_eq!(config.simulation.seed, Some(42));
        assert_eq!(config.simulation.grid_width, 8);
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = write_config("[learning]\ngamma = 0.3\n");
        std::env::set_var("SMARTCAB_TEST_ENV__LEARNING__GAMMA", "0.5");
        std::env::set_var("SMARTCAB_TEST_ENV__SIMULATION__DUMMY_AGENTS", "1");

        let config = load_layered(Some(file.path()), "SMARTCAB_TEST_ENV").unwrap();

        assert_eq!(config.learning.gamma, 0.5);
        assert_eq!(config.simulation.dummy_agents, 1);
    }

    #[test]
    fn test_out_of_range_value_rejected() {
        let file = write_config("[learning]\nalpha = 1.5\n");

        let error = load_layered(Some(file.path()), "SMARTCAB_TEST_RANGE").unwrap_err();

        assert!(format!("{error:#}").contains("learning.alpha"));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load(Some(&missing)).is_err());
    }
}
