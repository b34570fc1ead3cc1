use std::future::Future;
use std::sync::LazyLock;

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::JoinHandle;

use crate::TaskClass;

/// Runtime for hosts that drive a coordinator from a thread with no tokio
/// runtime entered. One worker thread is enough for timers and request
/// futures; the host observes their results through channels.
static DETACHED: LazyLock<Runtime> = LazyLock::new(|| {
	Builder::new_multi_thread()
		.enable_all()
		.worker_threads(1)
		.thread_name("shelf-detached")
		.build()
		.expect("failed to start the detached shelf runtime")
});

/// Spawns an async task on the runtime the caller is running in.
///
/// Outside any runtime the task goes to a process-wide detached runtime that
/// is started on first use.
pub fn spawn<F>(class: TaskClass, fut: F) -> JoinHandle<F::Output>
where
	F: Future + Send + 'static,
	F::Output: Send + 'static,
{
	tracing::trace!(worker_class = class.as_str(), "worker.spawn");
	match Handle::try_current() {
		Ok(handle) => handle.spawn(fut),
		Err(_) => {
			tracing::debug!(worker_class = class.as_str(), "worker.spawn_detached");
			DETACHED.spawn(fut)
		}
	}
}
