//! The animation driver: turns search steps into paced grid updates.
//!
//! Runs on the worker thread. For each `Visit` it marks the cell, queues a
//! [`Notice`] for the display and pauses; on the terminal `Result` it
//! replays the path the same way and reports completion. Cancellation is
//! checked under the session lock before every write, so nothing changes
//! once [`RunController::cancel`](crate::RunController::cancel) returns.

use std::sync::mpsc::{SyncSender, TrySendError};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gridwalk_core::{CellState, Point};
use gridwalk_search::{AlgorithmKind, Outcome, Step};

use crate::context::Context;
use crate::display::Notice;
use crate::session::{RunReport, RunStatus, Session, lock};

/// Wait between retries while the display queue is full.
const BACKOFF: Duration = Duration::from_millis(2);

pub(crate) struct Animator<I> {
    pub(crate) steps: I,
    pub(crate) session: Arc<Mutex<Session>>,
    pub(crate) ctx: Context,
    pub(crate) tx: SyncSender<Notice>,
    pub(crate) pace: Duration,
    pub(crate) algorithm: AlgorithmKind,
}

impl<I: Iterator<Item = Step>> Animator<I> {
    /// Consume every step, then publish the report. Returns early, without
    /// touching anything else, once the run is cancelled.
    pub(crate) fn run(mut self) {
        let mut visited = Vec::new();
        let outcome = loop {
            if self.ctx.is_done() {
                return;
            }
            match self.steps.next() {
                Some(Step::Visit(p)) => {
                    visited.push(p);
                    if !self.apply(p, CellState::Visited) {
                        return;
                    }
                }
                Some(Step::Result(outcome)) => break outcome,
                None => {
                    log::warn!("{} search ended without a result", self.algorithm);
                    break Outcome::not_found();
                }
            }
        };

        if outcome.found {
            // Start and End keep their roles.
            let inner = outcome
                .path
                .get(1..outcome.path.len().saturating_sub(1))
                .unwrap_or_default();
            for &p in inner {
                if !self.apply(p, CellState::Path) {
                    return;
                }
            }
        }

        let found = outcome.found;
        let path_len = outcome.path_len();
        {
            let mut s = lock(&self.session);
            if self.ctx.is_done() {
                return;
            }
            s.status = RunStatus::Completed;
            s.grid.unlock();
            s.report = Some(RunReport {
                algorithm: self.algorithm,
                visited,
                found,
                path: outcome.path,
            });
        }
        log::info!(
            "{} run completed: found={found}, path of {path_len} cells",
            self.algorithm
        );
        self.deliver(Notice::Finished { found, path_len });
    }

    /// Write one cell, notify the display, then pause.
    ///
    /// Returns `false` once the run is cancelled or the display is gone.
    fn apply(&mut self, p: Point, state: CellState) -> bool {
        let shown = {
            let mut s = lock(&self.session);
            if self.ctx.is_done() {
                return false;
            }
            s.grid.mark(p, state);
            s.grid.at(p).unwrap_or_default()
        };
        if !self.deliver(Notice::Cell { pos: p, state: shown }) {
            return false;
        }
        !self.ctx.sleep(self.pace)
    }

    /// Queue a notice without blocking indefinitely: a full queue is
    /// retried until the display drains it, the run is cancelled or the
    /// receiver is dropped.
    fn deliver(&self, mut notice: Notice) -> bool {
        loop {
            match self.tx.try_send(notice) {
                Ok(()) => return true,
                Err(TrySendError::Disconnected(_)) => {
                    log::debug!("display receiver dropped, stopping {} run", self.algorithm);
                    return false;
                }
                Err(TrySendError::Full(n)) => {
                    if self.ctx.sleep(BACKOFF) {
                        return false;
                    }
                    notice = n;
                }
            }
        }
    }
}
