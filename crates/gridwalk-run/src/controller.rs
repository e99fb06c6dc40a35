//! [`RunController`]: owns the grid, starts and cancels runs.

use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use gridwalk_core::{Error, Grid};
use gridwalk_search::Search;

use crate::animator::Animator;
use crate::config::RunConfig;
use crate::context::Context;
use crate::display::{Notice, Renderer};
use crate::session::{RunReport, RunStatus, Session, lock};

/// Capacity of the worker-to-display notice queue.
pub(crate) const NOTICE_CAPACITY: usize = 64;

const WORKER_NAME: &str = "gridwalk-search";

// ---------------------------------------------------------------------------
// Worker
// ---------------------------------------------------------------------------

struct Worker {
    ctx: Context,
    handle: JoinHandle<()>,
}

impl Worker {
    fn join(self) {
        if self.handle.join().is_err() {
            log::warn!("search worker panicked");
        }
    }

    /// Cancel and wait for the thread to exit.
    fn stop(self) {
        self.ctx.cancel();
        self.join();
    }
}

// ---------------------------------------------------------------------------
// RunController
// ---------------------------------------------------------------------------

/// Runs searches over a [`Grid`] on a background worker.
///
/// Lifecycle: `Idle -> Running -> {Completed, Cancelled}`; a terminal status
/// holds until the next [`start`](Self::start) or [`reset`](Self::reset).
/// While Running the grid is locked and every edit fails with
/// [`Error::GridLocked`]. Display updates produced by the worker are queued
/// and handed to a [`Renderer`] by [`pump`](Self::pump) or
/// [`wait`](Self::wait), in the order they were applied.
///
/// ```no_run
/// use gridwalk_core::{Grid, Point};
/// use gridwalk_run::{Notice, RunConfig, RunController, RunStatus};
/// use gridwalk_search::AlgorithmKind;
///
/// let mut ctl = RunController::new(Grid::new(5, 5));
/// ctl.edit(|g| {
///     g.set_start(Point::new(0, 0))?;
///     g.set_end(Point::new(4, 4))
/// })?;
/// ctl.start(RunConfig::new(AlgorithmKind::Astar, 5))?;
/// let mut seen: Vec<Notice> = Vec::new();
/// assert_eq!(ctl.wait(&mut seen), RunStatus::Completed);
/// # Ok::<(), gridwalk_core::Error>(())
/// ```
pub struct RunController {
    session: Arc<Mutex<Session>>,
    worker: Option<Worker>,
    notices: Option<Receiver<Notice>>,
}

impl RunController {
    /// Take ownership of `grid`. Any lock it carries is released; only a
    /// run holds the lock.
    pub fn new(mut grid: Grid) -> Self {
        grid.unlock();
        Self {
            session: Arc::new(Mutex::new(Session::new(grid))),
            worker: None,
            notices: None,
        }
    }

    /// A controller over an empty `rows x cols` grid.
    pub fn with_size(rows: i32, cols: i32) -> Self {
        Self::new(Grid::new(rows, cols))
    }

    /// Lock the session. A run whose worker exited without finishing is
    /// settled as Cancelled first.
    fn session(&self) -> MutexGuard<'_, Session> {
        let mut s = lock(&self.session);
        if s.status == RunStatus::Running
            && self.worker.as_ref().is_none_or(|w| w.handle.is_finished())
        {
            log::warn!("search worker exited mid-run");
            s.status = RunStatus::Cancelled;
            s.grid.unlock();
        }
        s
    }

    pub fn status(&self) -> RunStatus {
        self.session().status
    }

    /// The result of the last completed run, if it has not been discarded
    /// by a new start or a reset.
    pub fn report(&self) -> Option<RunReport> {
        self.session().report.clone()
    }

    /// Run `f` against the current grid.
    pub fn read<T>(&self, f: impl FnOnce(&Grid) -> T) -> T {
        f(&self.session().grid)
    }

    /// Run `f` against the grid for editing.
    ///
    /// Fails with [`Error::GridLocked`] without calling `f` while a run is
    /// in progress. The grid lock belongs to the run: a lock taken inside
    /// `f` is released when `f` returns.
    pub fn edit<T>(&mut self, f: impl FnOnce(&mut Grid) -> Result<T, Error>) -> Result<T, Error> {
        let mut s = self.session();
        if s.status == RunStatus::Running {
            return Err(Error::GridLocked);
        }
        let out = f(&mut s.grid);
        s.grid.unlock();
        out
    }

    /// Start a run.
    ///
    /// Clears the trace of any previous run, snapshots the grid, locks it
    /// and hands the search to a new worker thread. Notices still queued
    /// from a previous run are discarded.
    pub fn start(&mut self, config: RunConfig) -> Result<(), Error> {
        config.validate()?;
        {
            let s = self.session();
            if s.status == RunStatus::Running {
                return Err(Error::Busy);
            }
            if s.grid.start().is_none() || s.grid.end().is_none() {
                return Err(Error::PreconditionFailed);
            }
        }
        self.retire();

        let search = {
            let mut s = self.session();
            s.grid.clear_trace()?;
            let search = Search::from_snapshot(config.algorithm, s.grid.snapshot())?;
            s.grid.lock();
            s.status = RunStatus::Running;
            s.report = None;
            search
        };

        let ctx = Context::new();
        let (tx, rx) = mpsc::sync_channel(NOTICE_CAPACITY);
        let animator = Animator {
            steps: search,
            session: Arc::clone(&self.session),
            ctx: ctx.clone(),
            tx,
            pace: config.pace(),
            algorithm: config.algorithm,
        };
        let spawned = thread::Builder::new()
            .name(WORKER_NAME.into())
            .spawn(move || animator.run());
        match spawned {
            Ok(handle) => {
                log::info!(
                    "started {} run at {}ms per step",
                    config.algorithm,
                    config.speed_millis
                );
                self.worker = Some(Worker { ctx, handle });
                self.notices = Some(rx);
                Ok(())
            }
            Err(e) => {
                let mut s = lock(&self.session);
                s.status = RunStatus::Idle;
                s.grid.unlock();
                Err(Error::Spawn(e.to_string()))
            }
        }
    }

    /// Cancel the current run, keeping whatever it has drawn.
    ///
    /// Does nothing unless Running. Once this returns the worker has exited
    /// and no further cell is written; notices it queued before that can
    /// still be pumped.
    pub fn cancel(&mut self) {
        {
            let mut s = self.session();
            if s.status != RunStatus::Running {
                return;
            }
            if let Some(w) = &self.worker {
                w.ctx.cancel();
            }
            s.status = RunStatus::Cancelled;
            s.grid.unlock();
        }
        log::info!("run cancelled");
        if let Some(w) = self.worker.take() {
            w.join();
        }
    }

    /// Cancel any run, then clear the grid back to all Empty with no
    /// endpoints. The status returns to Idle.
    pub fn reset(&mut self) -> Result<(), Error> {
        self.cancel();
        self.retire();
        let mut s = self.session();
        s.grid.reset()?;
        s.status = RunStatus::Idle;
        s.report = None;
        Ok(())
    }

    /// Hand every queued notice to `renderer` without blocking. Returns how
    /// many were delivered.
    pub fn pump<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> usize {
        if let Some(w) = self.worker.take_if(|w| w.handle.is_finished()) {
            w.join();
        }
        let Some(rx) = &self.notices else {
            return 0;
        };
        let mut n = 0;
        while let Ok(notice) = rx.try_recv() {
            notice.dispatch(renderer);
            n += 1;
        }
        n
    }

    /// Deliver notices to `renderer` until the worker exits, then return
    /// the final status.
    pub fn wait<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> RunStatus {
        if let Some(rx) = &self.notices {
            // Ends once the worker drops its sender and the queue is empty.
            while let Ok(notice) = rx.recv() {
                notice.dispatch(renderer);
            }
        }
        if let Some(w) = self.worker.take() {
            w.join();
        }
        self.status()
    }

    /// Stop and join the previous worker and drop its queue.
    fn retire(&mut self) {
        if let Some(w) = self.worker.take() {
            w.stop();
        }
        self.notices = None;
    }
}

impl Drop for RunController {
    fn drop(&mut self) {
        self.retire();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_SPEED_MILLIS;
    use gridwalk_core::{CellState, Point};
    use gridwalk_search::AlgorithmKind;
    use std::time::{Duration, Instant};

    fn controller(ascii: &str) -> RunController {
        RunController::new(Grid::from_ascii(ascii).unwrap())
    }

    fn open_5x5() -> RunController {
        controller(
            "S....
             .....
             .....
             .....
             ....E",
        )
    }

    fn count(ctl: &RunController, state: CellState) -> usize {
        ctl.read(|g| g.iter().filter(|&(_, s)| s == state).count())
    }

    fn slow() -> RunConfig {
        RunConfig::new(AlgorithmKind::Bfs, MAX_SPEED_MILLIS)
    }

    #[test]
    fn start_checks_config_first() {
        let mut ctl = RunController::with_size(3, 3);
        assert_eq!(
            ctl.start(RunConfig::new(AlgorithmKind::Bfs, 0)),
            Err(Error::InvalidConfig { speed_millis: 0 })
        );
        assert_eq!(ctl.start(RunConfig::default()), Err(Error::PreconditionFailed));
        ctl.edit(|g| g.set_start(Point::new(0, 0))).unwrap();
        assert_eq!(ctl.start(RunConfig::default()), Err(Error::PreconditionFailed));
        assert_eq!(ctl.status(), RunStatus::Idle);
    }

    #[test]
    fn running_rejects_start_and_edits() {
        let mut ctl = open_5x5();
        ctl.start(slow()).unwrap();
        assert_eq!(ctl.status(), RunStatus::Running);
        assert_eq!(ctl.start(slow()), Err(Error::Busy));
        assert_eq!(
            ctl.edit(|g| g.set_cell(Point::new(2, 2), CellState::Wall)),
            Err(Error::GridLocked)
        );
        assert!(ctl.read(|g| g.is_locked()));
        ctl.cancel();
        assert!(!ctl.read(|g| g.is_locked()));
        ctl.edit(|g| g.set_cell(Point::new(2, 2), CellState::Wall))
            .unwrap();
    }

    #[test]
    fn completed_run_draws_the_path() {
        let mut ctl = open_5x5();
        ctl.start(RunConfig::new(AlgorithmKind::Bfs, 1)).unwrap();
        let mut notices: Vec<Notice> = Vec::new();
        assert_eq!(ctl.wait(&mut notices), RunStatus::Completed);

        assert_eq!(
            notices.last(),
            Some(&Notice::Finished {
                found: true,
                path_len: 9
            })
        );
        let report = ctl.report().unwrap();
        assert_eq!(report.algorithm, AlgorithmKind::Bfs);
        assert!(report.found);
        assert_eq!(report.path.len(), 9);
        // One notice per visit, one per interior path cell, one to finish.
        assert_eq!(notices.len(), report.visited.len() + 7 + 1);
        assert_eq!(count(&ctl, CellState::Path), 7);
        assert!(!ctl.read(|g| g.is_locked()));
    }

    #[test]
    fn cancel_keeps_the_trace_and_stops_writing() {
        let mut ctl = open_5x5();
        ctl.start(RunConfig::new(AlgorithmKind::Dfs, 10)).unwrap();
        thread::sleep(Duration::from_millis(60));
        ctl.cancel();
        assert_eq!(ctl.status(), RunStatus::Cancelled);
        let drawn = ctl.read(|g| g.to_ascii());
        assert!(drawn.contains('v'));

        thread::sleep(Duration::from_millis(40));
        assert_eq!(ctl.read(|g| g.to_ascii()), drawn);
        assert!(ctl.report().is_none());

        let mut notices: Vec<Notice> = Vec::new();
        ctl.pump(&mut notices);
        assert!(!notices.is_empty());
        assert!(notices.iter().all(|n| matches!(n, Notice::Cell { .. })));
        assert_eq!(ctl.pump(&mut notices), 0);
    }

    #[test]
    fn cancel_is_a_no_op_unless_running() {
        let mut ctl = controller("SE");
        ctl.cancel();
        assert_eq!(ctl.status(), RunStatus::Idle);
        ctl.start(RunConfig::new(AlgorithmKind::Astar, 1)).unwrap();
        assert_eq!(ctl.wait(&mut Vec::<Notice>::new()), RunStatus::Completed);
        ctl.cancel();
        assert_eq!(ctl.status(), RunStatus::Completed);
        assert!(ctl.report().is_some());
    }

    #[test]
    fn reset_during_a_run() {
        let mut ctl = open_5x5();
        ctl.edit(|g| g.set_cell(Point::new(1, 1), CellState::Wall))
            .unwrap();
        ctl.start(slow()).unwrap();
        ctl.reset().unwrap();
        assert_eq!(ctl.status(), RunStatus::Idle);
        assert_eq!(ctl.read(|g| g.start()), None);
        assert_eq!(ctl.read(|g| g.end()), None);
        assert_eq!(count(&ctl, CellState::Empty), 25);
        assert_eq!(ctl.pump(&mut Vec::<Notice>::new()), 0);
    }

    #[test]
    fn start_equal_to_end() {
        let mut ctl = RunController::with_size(3, 3);
        let p = Point::new(1, 1);
        ctl.edit(|g| {
            g.set_start(p)?;
            g.set_end(p)
        })
        .unwrap();
        ctl.start(RunConfig::new(AlgorithmKind::Dijkstra, 1)).unwrap();
        let mut notices: Vec<Notice> = Vec::new();
        assert_eq!(ctl.wait(&mut notices), RunStatus::Completed);
        assert_eq!(
            notices,
            vec![
                Notice::Cell {
                    pos: p,
                    state: CellState::Start
                },
                Notice::Finished {
                    found: true,
                    path_len: 1
                },
            ]
        );
    }

    #[test]
    fn unreachable_end_completes_without_a_path() {
        let mut ctl = controller(
            "S.#.
             ..#E",
        );
        ctl.start(RunConfig::new(AlgorithmKind::Astar, 1)).unwrap();
        let mut notices: Vec<Notice> = Vec::new();
        assert_eq!(ctl.wait(&mut notices), RunStatus::Completed);
        assert_eq!(
            notices.last(),
            Some(&Notice::Finished {
                found: false,
                path_len: 0
            })
        );
        // Start plus the three other reachable cells.
        assert_eq!(notices.len(), 5);
        assert_eq!(count(&ctl, CellState::Visited), 3);
        assert_eq!(count(&ctl, CellState::Path), 0);
        assert!(!ctl.report().unwrap().found);
    }

    #[test]
    fn restart_clears_the_previous_trace() {
        let mut ctl = controller("S..E");
        ctl.start(RunConfig::new(AlgorithmKind::Bfs, 1)).unwrap();
        ctl.wait(&mut Vec::<Notice>::new());
        assert_eq!(ctl.read(|g| g.to_ascii()), "S**E");

        ctl.start(slow()).unwrap();
        assert_eq!(ctl.read(|g| g.to_ascii()), "S..E");
        assert!(ctl.report().is_none());
        ctl.cancel();
    }

    #[test]
    fn edits_after_completion_clear_the_trace() {
        let mut ctl = controller("S..E");
        ctl.start(RunConfig::new(AlgorithmKind::Bfs, 1)).unwrap();
        ctl.wait(&mut Vec::<Notice>::new());
        ctl.edit(|g| g.set_cell(Point::new(0, 1), CellState::Wall))
            .unwrap();
        assert_eq!(ctl.read(|g| g.to_ascii()), "S#.E");
        assert_eq!(ctl.status(), RunStatus::Completed);
    }

    #[test]
    fn slow_display_does_not_hold_up_cancel() {
        let mut ctl = RunController::with_size(40, 40);
        ctl.edit(|g| {
            g.set_start(Point::new(0, 0))?;
            g.set_end(Point::new(39, 39))
        })
        .unwrap();
        ctl.start(RunConfig::new(AlgorithmKind::Bfs, 1)).unwrap();
        // Never pumped, so the queue fills and the worker backs off.
        thread::sleep(Duration::from_millis(200));
        let t = Instant::now();
        ctl.cancel();
        assert!(t.elapsed() < Duration::from_secs(2));
        assert_eq!(ctl.status(), RunStatus::Cancelled);
        assert!(ctl.pump(&mut Vec::<Notice>::new()) <= NOTICE_CAPACITY);
    }

    #[test]
    fn grid_lock_stays_with_the_run() {
        let mut locked = Grid::from_ascii("S.E").unwrap();
        locked.lock();
        let mut ctl = RunController::new(locked);
        assert!(!ctl.read(|g| g.is_locked()));

        ctl.edit(|g| {
            g.lock();
            Ok(())
        })
        .unwrap();
        assert!(!ctl.read(|g| g.is_locked()));
        assert_eq!(ctl.status(), RunStatus::Idle);

        ctl.edit(|g| g.set_cell(Point::new(0, 1), CellState::Wall))
            .unwrap();
        ctl.edit(|g| g.set_cell(Point::new(0, 1), CellState::Empty))
            .unwrap();
        ctl.start(RunConfig::new(AlgorithmKind::Bfs, 1)).unwrap();
        assert_eq!(ctl.wait(&mut Vec::<Notice>::new()), RunStatus::Completed);
        ctl.reset().unwrap();
        assert_eq!(ctl.status(), RunStatus::Idle);
    }

    #[test]
    fn drop_stops_the_worker() {
        let mut ctl = open_5x5();
        ctl.start(slow()).unwrap();
        let t = Instant::now();
        drop(ctl);
        assert!(t.elapsed() < Duration::from_secs(2));
    }
}
