use std::fmt;
use std::sync::Arc;

use shelf_catalog::{CatalogService, Endpoint};
use shelf_query::{FilterSet, QueryParams, SearchText, build};
use shelf_worker::{GenerationToken, TaskClass};
use tracing::{debug, trace};

use crate::QueryResult;

/// Dispatch order of a request within one coordinator.
///
/// The first dispatched request is 1; [`Sequence::NONE`] means nothing has
/// been dispatched yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Sequence(pub(crate) u64);

impl Sequence {
	pub const NONE: Self = Self(0);

	pub const fn get(self) -> u64 {
		self.0
	}

	fn next(self) -> Self {
		Self(self.0 + 1)
	}
}

impl fmt::Display for Sequence {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// One catalog query, identified by its sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
	pub text: SearchText,
	pub filters: FilterSet,
	pub multi_word: bool,
	pub sequence: Sequence,
}

impl QueryRequest {
	/// Outgoing parameters for this request.
	pub fn params(&self) -> QueryParams {
		build(&self.text, &self.filters)
	}

	pub fn endpoint(&self) -> Endpoint {
		if self.text.is_empty() { Endpoint::Listing } else { Endpoint::Search }
	}
}

/// Issues catalog requests and numbers them.
///
/// Owns the sequence counter: it starts at 0, only grows, and is never reset
/// for the life of the dispatcher.
#[derive(Debug)]
pub struct Dispatcher {
	sequence: Sequence,
	abort_superseded: bool,
	root: GenerationToken,
	latest: Option<GenerationToken>,
}

impl Dispatcher {
	pub fn new(abort_superseded: bool) -> Self {
		Self {
			sequence: Sequence::NONE,
			abort_superseded,
			root: GenerationToken::root(),
			latest: None,
		}
	}

	/// Claims the next sequence and captures the inputs it will query with.
	pub fn prepare(&mut self, text: &SearchText, filters: &FilterSet) -> QueryRequest {
		self.sequence = self.sequence.next();
		QueryRequest {
			text: text.clone(),
			filters: filters.clone(),
			multi_word: text.is_multi_word(),
			sequence: self.sequence,
		}
	}

	/// Spawns the catalog call for `request` and hands its outcome to `report`.
	///
	/// The call runs under a child of the dispatcher's cancellation token. A
	/// cancelled call never reports.
	pub fn send<S, R>(&mut self, service: &Arc<S>, request: QueryRequest, report: R)
	where
		S: CatalogService,
		R: FnOnce(QueryResult<S::Item>) + Send + 'static,
	{
		let sequence = request.sequence;
		let endpoint = request.endpoint();
		let params = request.params();
		let token = self.root.child(sequence.get());

		if let Some(previous) = self.latest.replace(token.clone())
			&& self.abort_superseded
		{
			trace!(sequence = previous.generation(), "search.abort_superseded");
			previous.cancel();
		}

		debug!(
			sequence = sequence.get(),
			endpoint = endpoint.as_str(),
			multi_word = request.multi_word,
			params = params.len(),
			"search.dispatch"
		);

		let service = Arc::clone(service);
		shelf_worker::spawn(TaskClass::Interactive, async move {
			let outcome = tokio::select! {
				biased;
				_ = token.cancelled() => {
					trace!(sequence = sequence.get(), "search.cancelled");
					return;
				}
				outcome = service.fetch(endpoint, &params) => outcome,
			};
			if let Err(error) = &outcome {
				debug!(sequence = sequence.get(), %error, "search.fetch_failed");
			}
			report(QueryResult::from_outcome(sequence, outcome));
		});
	}

	/// Cancels every in-flight request.
	pub fn shutdown(&mut self) {
		self.latest = None;
		self.root.cancel();
	}
}

impl Drop for Dispatcher {
	fn drop(&mut self) {
		self.root.cancel();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sequences_increase_from_one() {
		let mut dispatcher = Dispatcher::new(false);
		let filters = FilterSet::default();

		let first = dispatcher.prepare(&SearchText::new("old tom"), &filters);
		let second = dispatcher.prepare(&SearchText::default(), &filters);

		assert_eq!(first.sequence.get(), 1);
		assert_eq!(second.sequence.get(), 2);
		assert!(first.multi_word);
		assert_eq!(first.endpoint(), Endpoint::Search);
		assert_eq!(second.endpoint(), Endpoint::Listing);
		assert!(second.params().is_empty());
	}
}
