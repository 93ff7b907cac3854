//! Background tasks and scheduled jobs.
//!
//! Each trigger is a long-running task spawned via `tokio::spawn` that
//! accepts a [`CancellationToken`](tokio_util::sync::CancellationToken) for
//! graceful shutdown.

pub mod scheduler;

pub use scheduler::{next_instant, next_occurrence, Scheduler, TriggerHandle};
