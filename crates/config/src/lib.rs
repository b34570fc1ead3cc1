//! Configuration for shelf.
//!
//! Configuration is written in TOML and read from, in order:
//!
//! 1. an explicit path (`shelf --config PATH`)
//! 2. `$XDG_CONFIG_HOME/shelf/config.toml` (or the platform equivalent)
//!
//! A missing default file is not an error; every key has a default.
//!
//! ```toml
//! [catalog]
//! base_url = "http://localhost:3000/api/"
//! list_path = "products"
//! search_path = "products/search"
//! timeout_ms = 10000
//! user_agent = "shelf/0.1"
//!
//! [search]
//! debounce_ms = 500
//! abort_superseded = false
//!
//! # Optional: replaces the default category_id / is_active / is_in_stock schema.
//! [[filters]]
//! key = "category_id"
//! kind = "text"
//! ```

pub mod error;

use std::path::{Path, PathBuf};
use std::time::Duration;

pub use error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use shelf_catalog::{CatalogEndpoints, HttpCatalog, Product};
use shelf_coordinator::{CoordinatorConfig, DEFAULT_DEBOUNCE};
use shelf_query::{FilterField, FilterSchema};
use url::Url;

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Where the catalog lives.
	pub catalog: CatalogSection,
	/// Coordinator tuning.
	pub search: SearchSection,
	/// Filter schema override.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub filters: Option<Vec<FilterField>>,
}

/// `[catalog]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogSection {
	pub base_url: String,
	pub list_path: String,
	pub search_path: String,
	pub timeout_ms: Option<u64>,
	pub user_agent: Option<String>,
}

impl Default for CatalogSection {
	fn default() -> Self {
		Self {
			base_url: "http://localhost:3000/api/".to_string(),
			list_path: "products".to_string(),
			search_path: "products/search".to_string(),
			timeout_ms: None,
			user_agent: Some(concat!("shelf/", env!("CARGO_PKG_VERSION")).to_string()),
		}
	}
}

/// `[search]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchSection {
	pub debounce_ms: u64,
	pub abort_superseded: bool,
}

impl Default for SearchSection {
	fn default() -> Self {
		Self {
			debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
			abort_superseded: false,
		}
	}
}

impl Config {
	/// Parses configuration from TOML text.
	pub fn parse(input: &str) -> Result<Self> {
		toml::from_str(input).map_err(|error| ConfigError::Parse { path: None, error })
	}

	/// Reads and parses a configuration file.
	pub fn load(path: &Path) -> Result<Self> {
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		toml::from_str(&input).map_err(|error| ConfigError::Parse {
			path: Some(path.to_path_buf()),
			error,
		})
	}

	/// Loads the default configuration file, falling back to defaults when
	/// it does not exist.
	pub fn load_default() -> Result<Self> {
		match Self::default_path() {
			Some(path) if path.exists() => Self::load(&path),
			_ => Ok(Self::default()),
		}
	}

	/// Platform location of the default configuration file.
	pub fn default_path() -> Option<PathBuf> {
		dirs::config_dir().map(|dir| dir.join("shelf").join("config.toml"))
	}

	/// Parsed and validated catalog base URL.
	pub fn base_url(&self) -> Result<Url> {
		let url = Url::parse(&self.catalog.base_url).map_err(|e| ConfigError::InvalidUrl {
			url: self.catalog.base_url.clone(),
			reason: e.to_string(),
		})?;
		if url.cannot_be_a_base() {
			return Err(ConfigError::InvalidUrl {
				url: self.catalog.base_url.clone(),
				reason: "URL cannot be used as a base".to_string(),
			});
		}
		Ok(url)
	}

	pub fn endpoints(&self) -> Result<CatalogEndpoints> {
		let base = self.base_url()?;
		Ok(CatalogEndpoints::new(&base, &self.catalog.list_path, &self.catalog.search_path)?)
	}

	/// Builds the HTTP catalog client described by `[catalog]`.
	pub fn catalog_client(&self) -> Result<HttpCatalog<Product>> {
		let mut builder = HttpCatalog::builder(self.endpoints()?);
		if let Some(timeout_ms) = self.catalog.timeout_ms {
			builder = builder.timeout(Duration::from_millis(timeout_ms));
		}
		if let Some(user_agent) = &self.catalog.user_agent {
			builder = builder.user_agent(user_agent.clone());
		}
		Ok(builder.build()?)
	}

	pub fn coordinator(&self) -> CoordinatorConfig {
		CoordinatorConfig {
			debounce: Duration::from_millis(self.search.debounce_ms),
			abort_superseded: self.search.abort_superseded,
		}
	}

	/// Filter schema from `[[filters]]`, or the catalog default.
	pub fn filter_schema(&self) -> FilterSchema {
		match &self.filters {
			Some(fields) => FilterSchema::new(fields.iter().cloned()),
			None => FilterSchema::catalog(),
		}
	}
}
