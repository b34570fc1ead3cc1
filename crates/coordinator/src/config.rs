use std::time::Duration;

/// Quiet period a burst of text changes must observe before a query fires.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Tuning for a [`crate::SearchCoordinator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorConfig {
	/// Debounce delay applied to text changes.
	pub debounce: Duration,
	/// Cancel the previous in-flight request whenever a newer one is sent.
	pub abort_superseded: bool,
}

impl Default for CoordinatorConfig {
	fn default() -> Self {
		Self {
			debounce: DEFAULT_DEBOUNCE,
			abort_superseded: false,
		}
	}
}
