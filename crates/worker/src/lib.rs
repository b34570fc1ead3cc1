//! Shared worker primitives for shelf.
//!
//! Every task the search coordinator starts (debounce timers and catalog
//! requests) goes through [`spawn`] so it is attached to the active tokio
//! runtime and tagged with a [`TaskClass`] for tracing. Timers and requests are
//! identified by generations handed out by a [`GenerationClock`] and stopped
//! through [`GenerationToken`]s.
//!
//! Hosts normally call into the coordinator from inside a tokio runtime, and
//! tasks join that runtime. A host with no runtime of its own (a synchronous
//! UI loop, for instance) may still drive a coordinator: its tasks then run on
//! a detached single-worker runtime started on first use, and results reach
//! the host through the coordinator's channel as usual.

mod class;
mod spawn;
mod token;

pub use class::TaskClass;
pub use spawn::spawn;
pub use token::{GenerationClock, GenerationToken};
