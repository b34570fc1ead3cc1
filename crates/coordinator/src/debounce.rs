use std::time::Duration;

use shelf_worker::{GenerationClock, GenerationToken, TaskClass};
use tokio::time::Instant;
use tracing::trace;

/// Single-slot debounce timer.
///
/// Holds at most one pending timer. Scheduling cancels the pending timer and
/// arms a new one; an uncancelled timer invokes its trigger once with its
/// generation. Because a timer can elapse just before it is superseded, the
/// owner confirms each trigger with [`Debouncer::settle`] before acting on it.
#[derive(Debug)]
pub struct Debouncer {
	delay: Duration,
	clock: GenerationClock,
	root: GenerationToken,
	pending: Option<GenerationToken>,
}

impl Debouncer {
	pub fn new(delay: Duration) -> Self {
		Self {
			delay,
			clock: GenerationClock::new(),
			root: GenerationToken::root(),
			pending: None,
		}
	}

	/// Arms a new timer, cancelling any pending one, and returns its generation.
	///
	/// `trigger` runs on the timer task when the delay elapses.
	pub fn schedule<F>(&mut self, trigger: F) -> u64
	where
		F: FnOnce(u64) + Send + 'static,
	{
		self.cancel();

		let generation = self.clock.next();
		let token = self.root.child(generation);
		let deadline = Instant::now() + self.delay;
		self.pending = Some(token.clone());

		trace!(generation, delay_ms = self.delay.as_millis() as u64, "debounce.schedule");
		shelf_worker::spawn(TaskClass::Background, async move {
			tokio::select! {
				biased;
				_ = token.cancelled() => {}
				_ = tokio::time::sleep_until(deadline) => trigger(token.generation()),
			}
		});

		generation
	}

	/// Cancels the pending timer. Returns true if one was pending.
	pub fn cancel(&mut self) -> bool {
		match self.pending.take() {
			Some(token) => {
				trace!(generation = token.generation(), "debounce.cancel");
				token.cancel();
				true
			}
			None => false,
		}
	}

	/// Confirms that an elapsed timer is still the pending one and clears it.
	///
	/// Returns false for superseded or cancelled generations.
	pub fn settle(&mut self, generation: u64) -> bool {
		match &self.pending {
			Some(token) if token.generation() == generation && !token.is_cancelled() => {
				self.pending = None;
				true
			}
			_ => false,
		}
	}

	pub fn is_pending(&self) -> bool {
		self.pending.is_some()
	}

	/// Cancels the pending timer and any timer scheduled afterwards.
	pub fn shutdown(&mut self) {
		self.pending = None;
		self.root.cancel();
	}
}

impl Drop for Debouncer {
	fn drop(&mut self) {
		self.root.cancel();
	}
}

#[cfg(test)]
mod tests {
	use tokio::sync::mpsc;

	use super::*;

	fn sender(tx: &mpsc::UnboundedSender<u64>) -> impl FnOnce(u64) + Send + 'static {
		let tx = tx.clone();
		move |generation| {
			let _ = tx.send(generation);
		}
	}

	#[tokio::test(flavor = "current_thread", start_paused = true)]
	async fn rescheduling_fires_only_latest_once() {
		let mut debouncer = Debouncer::new(Duration::from_millis(500));
		let (tx, mut rx) = mpsc::unbounded_channel();

		let first = debouncer.schedule(sender(&tx));
		tokio::time::advance(Duration::from_millis(300)).await;
		let second = debouncer.schedule(sender(&tx));
		drop(tx);

		let start = Instant::now();
		assert_eq!(rx.recv().await, Some(second));
		assert!(Instant::now() - start >= Duration::from_millis(500));
		assert!(!debouncer.settle(first));
		assert!(debouncer.settle(second));
		assert!(!debouncer.is_pending());
		assert_eq!(rx.recv().await, None);
	}

	#[tokio::test(flavor = "current_thread", start_paused = true)]
	async fn cancelled_timer_never_fires() {
		let mut debouncer = Debouncer::new(Duration::from_millis(500));
		let (tx, mut rx) = mpsc::unbounded_channel();

		let generation = debouncer.schedule(sender(&tx));
		drop(tx);
		assert!(debouncer.cancel());
		assert!(!debouncer.cancel());

		assert_eq!(rx.recv().await, None);
		assert!(!debouncer.settle(generation));
	}

	#[tokio::test(flavor = "current_thread", start_paused = true)]
	async fn shutdown_stops_pending_timer() {
		let mut debouncer = Debouncer::new(Duration::from_millis(500));
		let (tx, mut rx) = mpsc::unbounded_channel();

		debouncer.schedule(sender(&tx));
		drop(tx);
		debouncer.shutdown();

		assert!(!debouncer.is_pending());
		assert_eq!(rx.recv().await, None);
	}
}
