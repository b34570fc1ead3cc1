//! Shelf: interactive product catalog search.
//!
//! Reads line commands from stdin and prints results as they settle. Every
//! plain line replaces the search text, so piping a sequence of lines in
//! quick succession exercises the debounce the same way typing does.

mod cli;
mod command;
mod logging;
mod render;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use command::Command;
use shelf_catalog::{CatalogService, Product};
use shelf_coordinator::SearchCoordinator;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();
	logging::setup(cli.verbose);

	let config = cli.load_config().context("failed to load configuration")?;
	let service = Arc::new(config.catalog_client().context("failed to build catalog client")?);
	let mut coordinator = SearchCoordinator::new(service, Arc::new(config.filter_schema()), config.coordinator());

	tracing::info!(base_url = %config.catalog.base_url, debounce_ms = config.search.debounce_ms, "shelf.start");

	if !cli.no_initial_load
		&& let Some(sequence) = coordinator.refresh()
	{
		println!("{}", render::dispatched(sequence, coordinator.endpoint()));
	}

	let mut lines = BufReader::new(tokio::io::stdin()).lines();
	loop {
		tokio::select! {
			line = lines.next_line() => {
				let Some(line) = line.context("failed to read stdin")? else {
					break;
				};
				match run(&mut coordinator, &line) {
					Step::Continue => {}
					Step::Print(text) => println!("{text}"),
					Step::Warn(text) => eprintln!("{text}"),
					Step::Quit => break,
				}
			}
			Some(update) = coordinator.next_update() => {
				if let Some(text) = render::update(update, coordinator.state()) {
					println!("{text}");
				}
			}
		}
	}

	coordinator.shutdown();
	tracing::info!("shelf.exit");
	Ok(())
}

/// What the host does after one input line.
#[derive(Debug, PartialEq, Eq)]
enum Step {
	Continue,
	/// Print to stdout.
	Print(String),
	/// Print to stderr.
	Warn(String),
	Quit,
}

/// Applies one input line to the coordinator.
fn run<S>(coordinator: &mut SearchCoordinator<S>, line: &str) -> Step
where
	S: CatalogService<Item = Product>,
{
	let command = match Command::parse(line) {
		Ok(command) => command,
		Err(error) => return Step::Warn(error.to_string()),
	};

	let dispatched = match command {
		Command::Text(text) => coordinator.set_text(text),
		Command::Clear => coordinator.set_text(""),
		Command::Set { key, value } => match coordinator.update_filters(|filters| filters.with_input(&key, &value)) {
			Ok(sequence) => sequence,
			Err(error) => return Step::Warn(error.to_string()),
		},
		Command::Unset(key) => match coordinator.update_filters(|filters| filters.without(&key)) {
			Ok(sequence) => sequence,
			Err(error) => return Step::Warn(error.to_string()),
		},
		Command::Refresh => coordinator.refresh(),
		Command::State => {
			return Step::Print(render::summary(
				coordinator.text(),
				coordinator.filters(),
				coordinator.phase(),
				coordinator.state(),
			));
		}
		Command::Quit => return Step::Quit,
	};

	match dispatched {
		Some(sequence) => Step::Print(render::dispatched(sequence, coordinator.endpoint())),
		None => Step::Continue,
	}
}

#[cfg(test)]
mod tests {
	use async_trait::async_trait;
	use pretty_assertions::assert_eq;
	use shelf_catalog::{CatalogResponse, Endpoint};
	use shelf_coordinator::CoordinatorConfig;
	use shelf_query::{FilterSchema, QueryParams};

	use super::*;

	struct EmptyCatalog;

	#[async_trait]
	impl CatalogService for EmptyCatalog {
		type Item = Product;

		async fn fetch(&self, _: Endpoint, _: &QueryParams) -> shelf_catalog::Result<CatalogResponse<Product>> {
			Ok(CatalogResponse::ok(Vec::new()))
		}
	}

	fn coordinator() -> SearchCoordinator<EmptyCatalog> {
		SearchCoordinator::new(
			Arc::new(EmptyCatalog),
			Arc::new(FilterSchema::catalog()),
			CoordinatorConfig::default(),
		)
	}

	#[tokio::test]
	async fn immediate_dispatches_are_announced() {
		let mut coordinator = coordinator();

		assert_eq!(run(&mut coordinator, ":refresh"), Step::Print("searching #1 (listing)...".into()));
		assert_eq!(run(&mut coordinator, "rum"), Step::Continue);
		assert_eq!(run(&mut coordinator, ":set is_active=yes"), Step::Continue);
		assert_eq!(run(&mut coordinator, ":refresh"), Step::Print("searching #2 (search)...".into()));
		assert_eq!(run(&mut coordinator, ":clear"), Step::Print("searching #3 (listing)...".into()));
		assert_eq!(
			run(&mut coordinator, ":unset is_active"),
			Step::Print("searching #4 (listing)...".into())
		);
	}

	#[tokio::test]
	async fn bad_input_warns_without_dispatching() {
		let mut coordinator = coordinator();

		assert!(matches!(run(&mut coordinator, ":set colour=red"), Step::Warn(_)));
		assert!(matches!(run(&mut coordinator, ":bogus"), Step::Warn(_)));
		assert_eq!(coordinator.last_dispatched(), shelf_coordinator::Sequence::NONE);
		assert_eq!(run(&mut coordinator, ":quit"), Step::Quit);
	}
}
