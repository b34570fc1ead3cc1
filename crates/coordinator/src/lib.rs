//! Search coordination between user input and a remote catalog.
//!
//! A view owns one [`SearchCoordinator`] for its lifetime and feeds it text and
//! filter changes. The coordinator turns that stream into as few catalog
//! requests as possible and guarantees the visible [`SearchState`] reflects the
//! most recently issued request, whatever order responses arrive in.
//!
//! # Pipeline
//!
//! 1. Text changes go through the [`Debouncer`]; a burst settles into one
//!    trigger once input has been quiet for [`CoordinatorConfig::debounce`].
//!    Clearing the text, and filter changes while the text is empty, skip the
//!    delay.
//! 2. The [`Dispatcher`] stamps each request with the next [`Sequence`] and
//!    spawns the catalog call. Calls overlap freely; nothing is queued.
//! 3. Completions come back over a channel the host drains with
//!    [`SearchCoordinator::pump`] or [`SearchCoordinator::next_update`].
//! 4. The [`StalenessGuard`] lets only the latest sequence through. Older
//!    results are dropped without touching state.
//!
//! # Failures
//!
//! Transport and service failures never escape: an accepted failure sets
//! [`SearchState::error`] and leaves the previous items in place.
//!
//! # Cancellation
//!
//! Superseded requests run to completion by default. With
//! [`CoordinatorConfig::abort_superseded`] each new dispatch cancels the
//! previous in-flight request. Shutting the coordinator down (or dropping it)
//! cancels the pending debounce timer and every in-flight request.

mod config;
mod coordinator;
mod debounce;
mod dispatch;
mod guard;
mod state;

pub use config::{CoordinatorConfig, DEFAULT_DEBOUNCE};
pub use coordinator::{Phase, SearchCoordinator, SearchUpdate};
pub use debounce::Debouncer;
pub use dispatch::{Dispatcher, QueryRequest, Sequence};
pub use guard::StalenessGuard;
pub use state::{QueryResult, SearchState};
