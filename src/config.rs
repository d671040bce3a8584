//! config
//!
//! cf CLI configuration loading.
//!
//! # Overview
//!
//! The plugin never acquires credentials itself. It reads the session the
//! cf CLI already established: the API target and access token stored in
//! the CLI's `config.json`.
//!
//! # Locations
//!
//! Searched in order:
//! 1. `$CF_HOME/.cf/config.json` if `CF_HOME` is set
//! 2. `~/.cf/config.json`
//!
//! # Example
//!
//! ```no_run
//! use renamify::config::CfConfig;
//!
//! let config = CfConfig::load().unwrap();
//! println!("target: {}", config.target);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("not logged in; no access token in '{path}'")]
    MissingToken { path: PathBuf },

    #[error("home directory not found")]
    NoHomeDir,
}

/// The slice of the cf CLI configuration this plugin consumes.
///
/// Field names match the CLI's `config.json` keys; everything else in the
/// file is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CfConfig {
    /// Cloud Controller API endpoint, e.g. `https://api.example.com`
    #[serde(rename = "Target")]
    pub target: String,

    /// Bearer token for the current session (includes the `bearer ` prefix
    /// as written by the CLI)
    #[serde(rename = "AccessToken", default)]
    pub access_token: String,

    /// Whether TLS verification is disabled for the target
    #[serde(rename = "SSLDisabled", default)]
    pub ssl_disabled: bool,
}

impl CfConfig {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        let config: CfConfig =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        if config.access_token.is_empty() {
            return Err(ConfigError::MissingToken {
                path: path.to_path_buf(),
            });
        }

        Ok(config)
    }

    /// Resolve the path to `config.json`.
    ///
    /// `CF_HOME` overrides the home directory, matching the cf CLI.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let base = match std::env::var_os("CF_HOME") {
            Some(home) => PathBuf::from(home),
            None => dirs::home_dir().ok_or(ConfigError::NoHomeDir)?,
        };
        Ok(base.join(".cf").join("config.json"))
    }

    /// The value for the `Authorization` header.
    ///
    /// The CLI writes the token with a `bearer ` prefix already attached;
    /// tolerate a bare token as well.
    pub fn authorization_header(&self) -> String {
        let token = self.access_token.trim();
        if token.to_lowercase().starts_with("bearer ") {
            token.to_string()
        } else {
            format!("bearer {}", token)
        }
    }
}
