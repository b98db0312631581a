//! Configuration file loading.
//!
//! A config file is TOML with the [`Config`] keys at the top level:
//!
//! ```toml
//! include-stack = true
//! truncate-threshold = 60
//! proxy-excluded-keys = ["then", "toJSON"]
//! ```
//!
//! Missing keys keep their defaults.

use std::path::{Path, PathBuf};

use affirm_registry::Config;
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("failed to read {}: {error}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		error: std::io::Error,
	},
	#[error("failed to parse config: {0}")]
	Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Parses a TOML config document.
pub fn parse_config(input: &str) -> Result<Config> {
	Ok(toml::from_str(input)?)
}

/// Reads and parses the config file at `path`.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config> {
	let path = path.as_ref();
	let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
		path: path.to_path_buf(),
		error,
	})?;
	let config = parse_config(&input)?;
	debug!(path = %path.display(), "config loaded");
	Ok(config)
}
