//! Configuration file loading
//!
//! An optional TOML file sets the driver configuration and the defaults
//! for the `pwm` command:
//!
//! ```toml
//! [driver]
//! numbering = "bcm"
//! warnings = false
//!
//! [pwm]
//! frequency_hz = 1000.0
//! duty_percent = 50.0
//! ```
//!
//! Every key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use rpgpio_core::DriverConfig;
use serde::Deserialize;
use thiserror::Error;

/// File looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "rpgpio.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration in {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Defaults for the `pwm` command
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PwmDefaults {
    pub frequency_hz: f32,
    pub duty_percent: f32,
}

impl Default for PwmDefaults {
    fn default() -> Self {
        Self {
            frequency_hz: 1000.0,
            duty_percent: 50.0,
        }
    }
}

/// Whole configuration file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub driver: DriverConfig,
    pub pwm: PwmDefaults,
}

impl AppConfig {
    /// Parse configuration text
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load the configuration
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`]
    /// is used if present, otherwise built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpgpio_hal::NumberingScheme;
    use std::io::Write;

    #[test]
    fn test_empty_config_is_default() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.driver.numbering, NumberingScheme::Bcm);
        assert!(!config.driver.warnings);
        assert_eq!(config.pwm.frequency_hz, 1000.0);
    }

    #[test]
    fn test_full_config() {
        let config = AppConfig::parse(
            r#"
            # Physical numbering with warnings
            [driver]
            numbering = "board"
            warnings = true

            [pwm]
            frequency_hz = 50.0
            duty_percent = 7.5
            "#,
        )
        .unwrap();

        assert_eq!(config.driver.numbering, NumberingScheme::Board);
        assert!(config.driver.warnings);
        assert_eq!(config.pwm.frequency_hz, 50.0);
        assert_eq!(config.pwm.duty_percent, 7.5);
    }

    #[test]
    fn test_partial_section() {
        let config = AppConfig::parse("[pwm]\nduty_percent = 10.0\n").unwrap();
        assert_eq!(config.pwm.frequency_hz, 1000.0);
        assert_eq!(config.pwm.duty_percent, 10.0);
    }

    #[test]
    fn test_rejects_unknown_numbering() {
        assert!(AppConfig::parse("[driver]\nnumbering = \"wiringpi\"\n").is_err());
    }

    #[test]
    fn test_rejects_unknown_section() {
        assert!(AppConfig::parse("[pins]\nled = 17\n").is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[driver]\nwarnings = true").unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert!(config.driver.warnings);
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            AppConfig::load(Some(&missing)),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[driver\nwarnings = ").unwrap();
        assert!(matches!(
            AppConfig::load(Some(file.path())),
            Err(ConfigError::Parse { .. })
        ));
    }
}
