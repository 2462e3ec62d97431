//! Configuration file loading for the terminal front end.
//!
//! Settings come from `chess.toml` in the working directory, or from the
//! file named with `--config`. Every field is optional.

use chess_engine::OutcomePolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// How a position without legal moves is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PolicySetting {
    /// The side to move loses, in check or not.
    #[default]
    SideToMoveLoses,
    /// Stalemate is a draw.
    DistinguishStalemate,
}

impl From<PolicySetting> for OutcomePolicy {
    fn from(setting: PolicySetting) -> Self {
        match setting {
            PolicySetting::SideToMoveLoses => OutcomePolicy::SideToMoveLoses,
            PolicySetting::DistinguishStalemate => OutcomePolicy::DistinguishStalemate,
        }
    }
}

/// Front end settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct CliConfig {
    /// Scoring of positions without legal moves.
    pub outcome_policy: PolicySetting,
    /// Mark empty squares the opponent attacks when drawing the board.
    pub show_attacked: bool,
    /// Draw pieces with Unicode chess glyphs instead of letters.
    pub unicode: bool,
}

impl CliConfig {
    /// Loads the configuration.
    ///
    /// An explicit `path` must exist. Without one, `chess.toml` is read if
    /// present and the defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = Self::config_path();
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
            path: path.clone(),
            source,
        })?;
        let config = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Returns `chess.toml` in the current working directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from("chess.toml")
    }
}
