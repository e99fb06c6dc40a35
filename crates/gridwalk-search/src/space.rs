//! Bookkeeping shared by every search strategy.

use gridwalk_core::{Point, Range};

use crate::step::{Outcome, Step};

/// Sentinel parent index meaning "no predecessor".
pub(crate) const NO_PARENT: usize = usize::MAX;

/// Where a search is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Exploring,
    /// End was visited; the path result is pending.
    Reached(usize),
    /// The frontier emptied; the not-found result is pending.
    Exhausted,
    Done,
}

// ---------------------------------------------------------------------------
// SearchSpace
// ---------------------------------------------------------------------------

/// State shared by every strategy: flat indexing over the bounds, the
/// parent map used for path reconstruction, a neighbor scratch buffer and
/// the lifecycle phase.
pub(crate) struct SearchSpace {
    pub(crate) rng: Range,
    pub(crate) parents: Vec<usize>,
    pub(crate) nbuf: Vec<Point>,
    goal: Option<usize>,
    phase: Phase,
    visits: usize,
    label: &'static str,
}

impl SearchSpace {
    /// Create the space for a search from `from` to `to`.
    ///
    /// Returns the start index as well, or `None` if `from` is outside
    /// `rng`, in which case the search reports not-found straight away.
    pub(crate) fn new(label: &'static str, rng: Range, from: Point, to: Point) -> (Self, Option<usize>) {
        let start = rng.index(from);
        let space = Self {
            rng,
            parents: vec![NO_PARENT; rng.len()],
            nbuf: Vec::with_capacity(4),
            goal: rng.index(to),
            phase: if start.is_some() {
                Phase::Exploring
            } else {
                Phase::Exhausted
            },
            visits: 0,
            label,
        };
        (space, start)
    }

    #[inline]
    pub(crate) fn is_exploring(&self) -> bool {
        self.phase == Phase::Exploring
    }

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        self.rng.index(p)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        self.rng.point(idx)
    }

    /// Emit the `Visit` for a settled index. Visiting the goal ends
    /// exploration.
    pub(crate) fn visit(&mut self, idx: usize) -> Step {
        self.visits += 1;
        if self.goal == Some(idx) {
            self.phase = Phase::Reached(idx);
        }
        Step::Visit(self.point(idx))
    }

    /// Whether `idx` is the goal.
    #[inline]
    pub(crate) fn is_goal(&self, idx: usize) -> bool {
        self.goal == Some(idx)
    }

    /// Mark the frontier as empty.
    pub(crate) fn exhaust(&mut self) {
        if self.phase == Phase::Exploring {
            self.phase = Phase::Exhausted;
        }
    }

    /// Produce the pending terminal step, then nothing.
    pub(crate) fn finish(&mut self) -> Option<Step> {
        let outcome = match self.phase {
            Phase::Exploring | Phase::Done => return None,
            Phase::Reached(goal) => Outcome::found(self.path_to(goal)),
            Phase::Exhausted => Outcome::not_found(),
        };
        self.phase = Phase::Done;
        log::debug!(
            "{}: found={} after {} visits, path of {} cells",
            self.label,
            outcome.found,
            self.visits,
            outcome.path_len()
        );
        Some(Step::Result(outcome))
    }

    /// Walk the parent map back from `goal` and reverse.
    fn path_to(&self, goal: usize) -> Vec<Point> {
        let mut path = Vec::new();
        let mut ci = goal;
        while ci != NO_PARENT {
            path.push(self.point(ci));
            ci = self.parents[ci];
        }
        path.reverse();
        path
    }
}
