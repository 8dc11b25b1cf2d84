//! Configuration loading.
//!
//! Layers, lowest priority first: built-in defaults, `config.toml`,
//! environment variables, then overrides from the command line.

use crate::paths::ShieldPaths;
use shield_core::config::{ConfigOverrides, ConsoleConfig};
use shield_core::{Result, ShieldError};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_BACKEND_URL: &str = "SHIELD_BACKEND_URL";
pub const ENV_LIVE_FEED_URL: &str = "SHIELD_LIVE_FEED_URL";

/// Loads and validates the console configuration.
pub struct ConfigService;

impl ConfigService {
    /// Resolves the configuration from the process environment.
    ///
    /// # Arguments
    ///
    /// * `explicit_path` - File given with `--config`; it must exist
    /// * `cli` - Values given as command-line flags
    pub fn load(explicit_path: Option<&Path>, cli: ConfigOverrides) -> Result<ConsoleConfig> {
        Self::load_with_env(explicit_path, cli, |key| std::env::var(key).ok())
    }

    /// Same as [`ConfigService::load`] with an injectable environment lookup.
    pub fn load_with_env<F>(
        explicit_path: Option<&Path>,
        cli: ConfigOverrides,
        env: F,
    ) -> Result<ConsoleConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = match explicit_path {
            Some(path) => Self::load_file(path)?,
            None => Self::load_default_file()?,
        };

        let from_env = ConfigOverrides {
            backend_url: env(ENV_BACKEND_URL).filter(|v| !v.trim().is_empty()),
            live_feed_url: env(ENV_LIVE_FEED_URL).filter(|v| !v.trim().is_empty()),
            default_camera_id: None,
        };

        let config = base.with_overrides(from_env).with_overrides(cli);
        config.validate()?;

        tracing::info!(
            "[Config] backend_url={}, live_feed_url={}",
            config.backend_url,
            config.live_feed_url
        );
        Ok(config)
    }

    /// Reads a configuration file; a missing file is an error.
    pub fn load_file(path: &Path) -> Result<ConsoleConfig> {
        if !path.exists() {
            return Err(ShieldError::config(format!(
                "Configuration file not found at: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        tracing::debug!("[Config] Loaded {}", path.display());
        Ok(config)
    }

    /// Reads the default `config.toml` if there is one.
    fn load_default_file() -> Result<ConsoleConfig> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_file(&path),
            _ => Ok(ConsoleConfig::default()),
        }
    }

    fn default_path() -> Option<PathBuf> {
        match ShieldPaths::config_file() {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::debug!("[Config] No default config location: {}", e);
                None
            }
        }
    }
}
