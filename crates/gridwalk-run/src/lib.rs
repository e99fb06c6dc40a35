//! Run control and paced animation for gridwalk searches.
//!
//! A [`RunController`] owns the [`Grid`](gridwalk_core::Grid). Starting a
//! run snapshots the grid, locks it against edits and moves the chosen
//! search to a worker thread, which applies each step to the grid, queues a
//! [`Notice`] and pauses for the configured delay. The foreground drains the
//! queue into a [`Renderer`] with [`RunController::pump`].
//!
//! Cancellation is cooperative through a shared [`Context`]: the worker
//! checks it before every write and wakes from its pause as soon as it is
//! set.

mod animator;
pub mod config;
pub mod context;
pub mod controller;
pub mod display;
pub mod session;

pub use config::{DEFAULT_SPEED_MILLIS, MAX_SPEED_MILLIS, MIN_SPEED_MILLIS, RunConfig};
pub use context::Context;
pub use controller::RunController;
pub use display::{Notice, Renderer};
pub use session::{RunReport, RunStatus};
