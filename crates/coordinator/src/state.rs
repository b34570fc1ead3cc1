use shelf_catalog::{CatalogError, CatalogResponse};

use crate::Sequence;

/// Settled outcome of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<T> {
	pub items: Vec<T>,
	pub sequence: Sequence,
	pub succeeded: bool,
	pub message: Option<String>,
}

impl<T> QueryResult<T> {
	/// Folds transport errors and `success = false` envelopes into one shape.
	pub fn from_outcome(sequence: Sequence, outcome: Result<CatalogResponse<T>, CatalogError>) -> Self {
		match outcome.and_then(CatalogResponse::into_result) {
			Ok(items) => Self {
				items,
				sequence,
				succeeded: true,
				message: None,
			},
			Err(error) => Self {
				items: Vec::new(),
				sequence,
				succeeded: false,
				message: Some(error.user_message()),
			},
		}
	}
}

/// Externally visible search state.
///
/// Mutated only by accepted results; a failure keeps the previous items.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState<T> {
	items: Vec<T>,
	loading: bool,
	error: Option<String>,
	has_queried: bool,
}

impl<T> Default for SearchState<T> {
	fn default() -> Self {
		Self {
			items: Vec::new(),
			loading: false,
			error: None,
			has_queried: false,
		}
	}
}

impl<T> SearchState<T> {
	pub fn items(&self) -> &[T] {
		&self.items
	}

	/// True while the latest dispatched request has not settled.
	pub fn loading(&self) -> bool {
		self.loading
	}

	pub fn error(&self) -> Option<&str> {
		self.error.as_deref()
	}

	/// True once any request has been accepted.
	pub fn has_queried(&self) -> bool {
		self.has_queried
	}

	pub(crate) fn begin(&mut self) {
		self.loading = true;
	}

	pub(crate) fn apply(&mut self, result: QueryResult<T>) {
		self.loading = false;
		self.has_queried = true;
		if result.succeeded {
			self.items = result.items;
			self.error = None;
		} else {
			self.error = result.message;
		}
	}
}
