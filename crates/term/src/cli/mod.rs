use std::path::PathBuf;

use clap::Parser;
use shelf_config::Config;

#[derive(Parser, Debug)]
#[command(name = "shelf")]
#[command(about = "Search a product catalog from the terminal")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Configuration file (defaults to $XDG_CONFIG_HOME/shelf/config.toml)
	#[arg(long, short = 'c', value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Catalog base URL, overriding the configuration file
	#[arg(long, value_name = "URL")]
	pub base_url: Option<String>,

	/// Debounce delay for typed text, in milliseconds
	#[arg(long, value_name = "MS")]
	pub debounce_ms: Option<u64>,

	/// Cancel in-flight requests as soon as a newer one is sent
	#[arg(long)]
	pub abort_superseded: bool,

	/// Skip the listing request normally sent on startup
	#[arg(long)]
	pub no_initial_load: bool,

	/// Verbose logging
	#[arg(short, long)]
	pub verbose: bool,
}

impl Cli {
	/// Loads the configuration file and applies command-line overrides.
	pub fn load_config(&self) -> shelf_config::Result<Config> {
		let mut config = match &self.config {
			Some(path) => Config::load(path)?,
			None => Config::load_default()?,
		};
		self.apply_overrides(&mut config);
		Ok(config)
	}

	pub fn apply_overrides(&self, config: &mut Config) {
		if let Some(base_url) = &self.base_url {
			config.catalog.base_url = base_url.clone();
		}
		if let Some(debounce_ms) = self.debounce_ms {
			config.search.debounce_ms = debounce_ms;
		}
		if self.abort_superseded {
			config.search.abort_superseded = true;
		}
	}
}

#[cfg(test)]
mod tests;
