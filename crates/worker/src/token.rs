use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio_util::sync::CancellationToken;

/// Monotonic generation clock.
///
/// The first call to [`GenerationClock::next`] returns 1, so 0 can stand for
/// "nothing issued yet". Clones share the same counter.
#[derive(Debug, Default, Clone)]
pub struct GenerationClock {
	next: Arc<AtomicU64>,
}

impl GenerationClock {
	/// Creates a new generation clock starting at generation 1.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the next generation ID.
	pub fn next(&self) -> u64 {
		self.next.fetch_add(1, Ordering::AcqRel).wrapping_add(1)
	}
}

/// Generation-scoped cancellation token.
#[derive(Debug, Clone)]
pub struct GenerationToken {
	generation: u64,
	cancel: CancellationToken,
}

impl GenerationToken {
	/// Creates a new generation token.
	pub fn new(generation: u64, cancel: CancellationToken) -> Self {
		Self { generation, cancel }
	}

	/// Creates an uncancelled root token at generation 0.
	pub fn root() -> Self {
		Self::new(0, CancellationToken::new())
	}

	/// Returns generation ID.
	pub const fn generation(&self) -> u64 {
		self.generation
	}

	/// Returns true when cancellation is requested.
	pub fn is_cancelled(&self) -> bool {
		self.cancel.is_cancelled()
	}

	/// Requests cancellation.
	pub fn cancel(&self) {
		self.cancel.cancel();
	}

	/// Future resolving when cancellation is requested.
	pub async fn cancelled(&self) {
		self.cancel.cancelled().await;
	}

	/// Creates a child token for another generation.
	///
	/// Cancelling `self` cancels the child; cancelling the child leaves `self`
	/// untouched.
	pub fn child(&self, generation: u64) -> Self {
		Self {
			generation,
			cancel: self.cancel.child_token(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clock_starts_at_one_and_is_shared() {
		let clock = GenerationClock::new();
		let other = clock.clone();
		assert_eq!(clock.next(), 1);
		assert_eq!(other.next(), 2);
		assert_eq!(clock.next(), 3);
	}

	#[test]
	fn parent_cancel_reaches_children() {
		let root = GenerationToken::root();
		let first = root.child(1);
		let second = root.child(2);

		first.cancel();
		assert!(first.is_cancelled());
		assert!(!second.is_cancelled());
		assert!(!root.is_cancelled());

		root.cancel();
		assert!(second.is_cancelled());
		assert_eq!(second.generation(), 2);
	}
}
