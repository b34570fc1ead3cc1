use crate::Sequence;

/// Admits only the result of the most recently dispatched request.
#[derive(Debug, Default)]
pub struct StalenessGuard {
	last_dispatched: Sequence,
}

impl StalenessGuard {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records a newly dispatched sequence.
	pub fn record_dispatch(&mut self, sequence: Sequence) {
		debug_assert!(sequence > self.last_dispatched, "sequence went backwards");
		self.last_dispatched = self.last_dispatched.max(sequence);
	}

	pub fn last_dispatched(&self) -> Sequence {
		self.last_dispatched
	}

	/// Returns true when `sequence` is the latest dispatched request.
	pub fn accept(&self, sequence: Sequence) -> bool {
		sequence != Sequence::NONE && sequence == self.last_dispatched
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn only_latest_is_accepted() {
		let mut guard = StalenessGuard::new();
		assert!(!guard.accept(Sequence::NONE));

		guard.record_dispatch(Sequence(1));
		assert!(guard.accept(Sequence(1)));

		guard.record_dispatch(Sequence(2));
		assert!(!guard.accept(Sequence(1)));
		assert!(guard.accept(Sequence(2)));
		assert!(!guard.accept(Sequence(3)));
		assert_eq!(guard.last_dispatched(), Sequence(2));
	}
}
