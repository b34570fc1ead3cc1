use std::fs::OpenOptions;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const VERBOSE_FILTER: &str = "shelf_term=debug,shelf_coordinator=debug,shelf_catalog=debug,shelf_worker=trace,info";
const DEFAULT_FILTER: &str = "shelf_term=info,warn";

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over the built-in filters. With `SHELF_LOG_DIR` set, logs
/// go to a per-process file in that directory instead of stderr.
pub fn setup(verbose: bool) {
	let filter = || {
		EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| EnvFilter::new(if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER }))
	};

	if let Some(log_dir) = std::env::var("SHELF_LOG_DIR").ok().map(PathBuf::from)
		&& std::fs::create_dir_all(&log_dir).is_ok()
	{
		let log_path = log_dir.join(format!("shelf.{}.log", std::process::id()));

		if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
			let file_layer = tracing_subscriber::fmt::layer()
				.with_writer(file)
				.with_ansi(false)
				.with_target(true);

			tracing_subscriber::registry().with(filter()).with(file_layer).init();

			tracing::info!(path = ?log_path, "tracing initialized");
			return;
		}
	}

	tracing_subscriber::fmt()
		.with_env_filter(filter())
		.with_writer(std::io::stderr)
		.init();
}
