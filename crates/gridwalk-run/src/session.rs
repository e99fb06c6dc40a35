//! Run state shared between the controller and the worker.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use gridwalk_core::{Grid, Point};
use gridwalk_search::AlgorithmKind;

/// Lifecycle of the current run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunStatus {
    #[default]
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// Read-only result of a completed run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunReport {
    pub algorithm: AlgorithmKind,
    /// Coordinates in visitation order.
    pub visited: Vec<Point>,
    pub found: bool,
    /// Start to End inclusive; empty when `found` is false.
    pub path: Vec<Point>,
}

/// The grid and the run status, guarded together so that a status
/// transition and the cell writes it governs never interleave.
#[derive(Debug)]
pub(crate) struct Session {
    pub(crate) grid: Grid,
    pub(crate) status: RunStatus,
    pub(crate) report: Option<RunReport>,
}

impl Session {
    pub(crate) fn new(grid: Grid) -> Self {
        Self {
            grid,
            status: RunStatus::Idle,
            report: None,
        }
    }
}

/// Lock the session, recovering from a worker that panicked while
/// holding it.
pub(crate) fn lock(session: &Mutex<Session>) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}
