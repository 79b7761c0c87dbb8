//! Configuration file support for Mindful.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/mindful/config.toml`.

use crate::{Error, Result, UserId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub user: UserConfig,

    #[serde(default)]
    pub inference: InferenceConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Which user the CLI acts for when `--user` is not given
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default = "default_user_id")]
    pub default_user_id: UserId,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            default_user_id: default_user_id(),
        }
    }
}

/// External inference process configuration
///
/// The process is started as `executable args... <stress> <mood> <sleep>`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InferenceConfig {
    #[serde(default = "default_inference_enabled")]
    pub enabled: bool,

    #[serde(default = "default_executable")]
    pub executable: PathBuf,

    #[serde(default = "default_args")]
    pub args: Vec<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            enabled: default_inference_enabled(),
            executable: default_executable(),
            args: default_args(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl InferenceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("mindful")
}

fn default_user_id() -> UserId {
    UserId(1)
}

fn default_inference_enabled() -> bool {
    true
}

fn default_executable() -> PathBuf {
    PathBuf::from("swipl")
}

fn default_args() -> Vec<String> {
    vec![
        "-q".into(),
        "-s".into(),
        "prolog_runner.pl".into(),
        "--".into(),
    ]
}

fn default_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Reject settings the inference adapter cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.inference.timeout_secs == 0 {
            return Err(Error::Config(
                "inference.timeout_secs must be greater than zero".into(),
            ));
        }
        if self.inference.executable.as_os_str().is_empty() {
            return Err(Error::Config("inference.executable must not be empty".into()));
        }
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("mindful").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.inference.enabled);
        assert_eq!(config.inference.executable, PathBuf::from("swipl"));
        assert_eq!(config.inference.args.last().map(String::as_str), Some("--"));
        assert_eq!(config.inference.timeout(), Duration::from_secs(10));
        assert_eq!(config.user.default_user_id, UserId(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.inference.timeout_secs = 3;
        config.user.default_user_id = UserId(7);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.inference.timeout_secs, 3);
        assert_eq!(loaded.user.default_user_id, UserId(7));
        assert_eq!(loaded.inference.args, config.inference.args);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[inference]
enabled = false
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(!config.inference.enabled);
        assert_eq!(config.inference.timeout_secs, 10); // default
        assert_eq!(config.user.default_user_id, UserId(1)); // default
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[inference]\ntimeout_secs = 0\n").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
