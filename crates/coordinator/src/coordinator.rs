use std::sync::Arc;

use shelf_catalog::{CatalogService, Endpoint};
use shelf_query::{FilterError, FilterSchema, FilterSet, SearchText};
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

use crate::{CoordinatorConfig, Debouncer, Dispatcher, QueryResult, SearchState, Sequence, StalenessGuard};

/// Messages from timer and request tasks back to the coordinator.
enum Event<T> {
	DebounceElapsed { generation: u64 },
	Settled(QueryResult<T>),
}

/// Observable effect of one processed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchUpdate {
	/// A debounced change settled and a request went out.
	Dispatched { sequence: Sequence, endpoint: Endpoint },
	/// The latest request settled and its outcome is now visible.
	Applied { sequence: Sequence, succeeded: bool },
	/// A superseded request settled and was dropped.
	Discarded { sequence: Sequence },
}

/// Coarse lifecycle position of the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
	/// Nothing scheduled and the latest request has settled.
	Idle,
	/// A debounced change is waiting for its quiet period.
	Pending,
	/// The latest request is on the wire.
	InFlight,
}

/// Turns text and filter changes into sequenced catalog queries.
///
/// Owned by one view for its lifetime and driven from that view's event loop.
/// Inputs are applied synchronously; request completions and debounce
/// expirations arrive asynchronously and take effect when the host calls
/// [`pump`](Self::pump) or awaits [`next_update`](Self::next_update).
pub struct SearchCoordinator<S: CatalogService> {
	service: Arc<S>,
	text: SearchText,
	filters: FilterSet,
	debounce: Debouncer,
	dispatcher: Dispatcher,
	guard: StalenessGuard,
	state: SearchState<S::Item>,
	events_tx: mpsc::UnboundedSender<Event<S::Item>>,
	events_rx: mpsc::UnboundedReceiver<Event<S::Item>>,
	shut_down: bool,
}

impl<S: CatalogService> std::fmt::Debug for SearchCoordinator<S> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SearchCoordinator")
			.field("text", &self.text)
			.field("filters", &self.filters)
			.field("debounce", &self.debounce)
			.field("dispatcher", &self.dispatcher)
			.field("guard", &self.guard)
			.field("shut_down", &self.shut_down)
			.finish_non_exhaustive()
	}
}

impl<S: CatalogService> SearchCoordinator<S> {
	/// Creates an idle coordinator with empty text and every filter unset.
	///
	/// Nothing is dispatched until the first input or [`refresh`](Self::refresh).
	pub fn new(service: Arc<S>, schema: Arc<FilterSchema>, config: CoordinatorConfig) -> Self {
		let (events_tx, events_rx) = mpsc::unbounded_channel();
		Self {
			service,
			text: SearchText::default(),
			filters: FilterSet::new(schema),
			debounce: Debouncer::new(config.debounce),
			dispatcher: Dispatcher::new(config.abort_superseded),
			guard: StalenessGuard::new(),
			state: SearchState::default(),
			events_tx,
			events_rx,
			shut_down: false,
		}
	}

	pub fn text(&self) -> &SearchText {
		&self.text
	}

	pub fn filters(&self) -> &FilterSet {
		&self.filters
	}

	pub fn state(&self) -> &SearchState<S::Item> {
		&self.state
	}

	pub fn last_dispatched(&self) -> Sequence {
		self.guard.last_dispatched()
	}

	/// Endpoint the current text would be queried on.
	pub fn endpoint(&self) -> Endpoint {
		if self.text.is_empty() { Endpoint::Listing } else { Endpoint::Search }
	}

	pub fn phase(&self) -> Phase {
		if self.debounce.is_pending() {
			Phase::Pending
		} else if self.state.loading() {
			Phase::InFlight
		} else {
			Phase::Idle
		}
	}

	/// Replaces the search text.
	///
	/// Clearing non-empty text dispatches a listing immediately and returns its
	/// sequence; no [`SearchUpdate::Dispatched`] is emitted for it. Other changes to the trimmed text are debounced. Changes that
	/// leave the trimmed text as it was do nothing.
	pub fn set_text(&mut self, text: impl Into<String>) -> Option<Sequence> {
		if self.shut_down {
			return None;
		}

		let next = SearchText::new(text);
		let unchanged = next.trimmed() == self.text.trimmed();
		let cleared = next.is_empty() && !self.text.is_empty();
		self.text = next;

		if unchanged {
			return None;
		}
		if cleared {
			self.debounce.cancel();
			return Some(self.dispatch_now().0);
		}
		self.schedule();
		None
	}

	/// Replaces the filter snapshot.
	///
	/// With empty text the listing is dispatched immediately; otherwise the
	/// change rides the debounce with the text. Identical snapshots do nothing.
	pub fn set_filters(&mut self, filters: FilterSet) -> Option<Sequence> {
		if self.shut_down || filters == self.filters {
			return None;
		}

		self.filters = filters;
		if self.text.is_empty() {
			self.debounce.cancel();
			return Some(self.dispatch_now().0);
		}
		self.schedule();
		None
	}

	/// Derives a new filter snapshot from the current one and applies it.
	pub fn update_filters<F>(&mut self, update: F) -> Result<Option<Sequence>, FilterError>
	where
		F: FnOnce(&FilterSet) -> Result<FilterSet, FilterError>,
	{
		let next = update(&self.filters)?;
		Ok(self.set_filters(next))
	}

	/// Dispatches the current text and filters right away, dropping any pending
	/// debounce. Used for the initial load and for retries.
	pub fn refresh(&mut self) -> Option<Sequence> {
		if self.shut_down {
			return None;
		}
		self.debounce.cancel();
		Some(self.dispatch_now().0)
	}

	/// Processes every event already delivered, without waiting.
	pub fn pump(&mut self) -> Vec<SearchUpdate> {
		let mut updates = Vec::new();
		if self.shut_down {
			return updates;
		}
		while let Ok(event) = self.events_rx.try_recv() {
			if let Some(update) = self.handle(event) {
				updates.push(update);
			}
		}
		updates
	}

	/// Waits for the next event that changes something observable.
	///
	/// Returns `None` once the coordinator has been shut down. Waits forever
	/// when nothing is pending or in flight.
	pub async fn next_update(&mut self) -> Option<SearchUpdate> {
		while !self.shut_down {
			let event = self.events_rx.recv().await?;
			if let Some(update) = self.handle(event) {
				return Some(update);
			}
		}
		None
	}

	/// Tears the coordinator down: cancels the pending debounce and every
	/// in-flight request, and stops accepting input.
	pub fn shutdown(&mut self) {
		if self.shut_down {
			return;
		}
		debug!(last_dispatched = self.guard.last_dispatched().get(), "search.shutdown");
		self.shut_down = true;
		self.debounce.shutdown();
		self.dispatcher.shutdown();
		self.events_rx.close();
	}

	fn schedule(&mut self) {
		let events = self.events_tx.clone();
		self.debounce.schedule(move |generation| {
			let _ = events.send(Event::DebounceElapsed { generation });
		});
	}

	fn dispatch_now(&mut self) -> (Sequence, Endpoint) {
		let request = self.dispatcher.prepare(&self.text, &self.filters);
		let sequence = request.sequence;
		let endpoint = request.endpoint();
		self.guard.record_dispatch(sequence);
		self.state.begin();

		let events = self.events_tx.clone();
		self.dispatcher.send(&self.service, request, move |result| {
			let _ = events.send(Event::Settled(result));
		});
		(sequence, endpoint)
	}

	fn handle(&mut self, event: Event<S::Item>) -> Option<SearchUpdate> {
		match event {
			Event::DebounceElapsed { generation } => {
				if !self.debounce.settle(generation) {
					trace!(generation, "debounce.stale");
					return None;
				}
				let (sequence, endpoint) = self.dispatch_now();
				Some(SearchUpdate::Dispatched { sequence, endpoint })
			}
			Event::Settled(result) => {
				let sequence = result.sequence;
				if !self.guard.accept(sequence) {
					trace!(
						sequence = sequence.get(),
						latest = self.guard.last_dispatched().get(),
						"search.discard"
					);
					return Some(SearchUpdate::Discarded { sequence });
				}

				let succeeded = result.succeeded;
				if succeeded {
					debug!(sequence = sequence.get(), items = result.items.len(), "search.apply");
				} else {
					warn!(
						sequence = sequence.get(),
						message = result.message.as_deref().unwrap_or_default(),
						"search.apply_failure"
					);
				}
				self.state.apply(result);
				Some(SearchUpdate::Applied { sequence, succeeded })
			}
		}
	}
}

impl<S: CatalogService> Drop for SearchCoordinator<S> {
	fn drop(&mut self) {
		self.shutdown();
	}
}
