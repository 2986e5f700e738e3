//! Conversion settings and their TOML representation
//!
//! ```toml
//! [target]
//! delta_x = 10.0
//! delta_y = 20.0
//! z_position = 0.0
//! thickness = 0.35
//!
//! [output]
//! title = "Import Stdhep Events"
//! comment = "Imported from LHE generated from MadGraph"
//! ```
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::vertex::TargetConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}'", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse TOML configuration")]
    Parse(#[from] toml::de::Error),
    #[error(
        "Target parameter '{name}' must be finite and non-negative, \
         and span a finite range, got {value}"
    )]
    BadTarget { name: &'static str, value: f64 },
}

/// Free-text run information stored in the StdHep file header
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunHeader {
    pub title: String,
    pub comment: String,
}

impl Default for RunHeader {
    fn default() -> Self {
        Self {
            title: "Import Stdhep Events".to_owned(),
            comment: "Imported from LHE generated from MadGraph".to_owned(),
        }
    }
}

/// Contents of a configuration file
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub target: TargetConfig,
    pub output: RunHeader,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_owned(),
                source,
            })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.target.validate()?;
        Ok(config)
    }
}

/// Settings for converting a single file
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConvertOptions {
    pub target: TargetConfig,
    pub header: RunHeader,
    /// Log every event and particle at debug level
    pub verbose: bool,
    /// Seed for vertex smearing, random if unset
    pub seed: Option<u64>,
}

impl From<Config> for ConvertOptions {
    fn from(config: Config) -> Self {
        Self {
            target: config.target,
            header: config.output,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_config() {
        let toml = r#"
            [target]
            delta_x = 5.0
            thickness = 0.7

            [output]
            title = "Signal"
        "#;
        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.target.delta_x, 5.0);
        assert_eq!(config.target.delta_y, 20.0);
        assert_eq!(config.target.thickness, 0.7);
        assert_eq!(config.output.title, "Signal");
        assert_eq!(config.output.comment, RunHeader::default().comment);
    }

    #[test]
    fn empty_config() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn reject_unknown_key() {
        assert!(matches!(
            Config::from_toml("[target]\nradius = 3.0"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn reject_negative_extent() {
        assert!(matches!(
            Config::from_toml("[target]\ndelta_y = -1.0"),
            Err(ConfigError::BadTarget { name: "delta_y", .. })
        ));
    }

    #[test]
    fn reject_overflowing_extent() {
        assert!(matches!(
            Config::from_toml("[target]\ndelta_x = 1e308"),
            Err(ConfigError::BadTarget { name: "delta_x", .. })
        ));
    }
}
