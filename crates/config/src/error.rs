//! Error types for configuration loading.

use std::path::PathBuf;

use shelf_catalog::CatalogError;
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML syntax or shape.
	#[error("invalid configuration{}: {error}", .path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default())]
	Parse {
		/// File the TOML came from, if any.
		path: Option<PathBuf>,
		/// The underlying TOML error.
		error: toml::de::Error,
	},

	/// The catalog base URL is not a valid absolute URL.
	#[error("invalid catalog base URL {url:?}: {reason}")]
	InvalidUrl {
		/// The rejected value.
		url: String,
		/// Why it was rejected.
		reason: String,
	},

	/// The catalog client could not be set up from the configuration.
	#[error(transparent)]
	Catalog(#[from] CatalogError),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
