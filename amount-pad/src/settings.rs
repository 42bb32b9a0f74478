//! Loading the amount field configuration from a TOML file.

use std::fs;
use std::path::{Path, PathBuf};

use amount_core::{EntryConfig, EntryConfigError};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading a configuration file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(#[from] EntryConfigError),
}

/// Parses a configuration from TOML text.
///
/// Fields missing from the text keep their defaults. The result is not
/// validated; [`load_config`] does that.
pub fn parse_config(text: &str) -> Result<EntryConfig, toml::de::Error> {
    toml::from_str(text)
}

/// Loads the configuration at `path`, or the defaults when `path` is `None`.
pub fn load_config(path: Option<&Path>) -> Result<EntryConfig, SettingsError> {
    let config = match path {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            parse_config(&text).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        }
        None => EntryConfig::default(),
    };
    config.validate()?;
    Ok(config)
}
