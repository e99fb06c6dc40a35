//! [`Search`]: the single seam selecting one of the four strategies.

use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

use gridwalk_core::{Error, Point, Snapshot};

use crate::astar::Astar;
use crate::bfs::Bfs;
use crate::dfs::Dfs;
use crate::dijkstra::Dijkstra;
use crate::step::{Outcome, Step};
use crate::traits::AstarPather;

// ---------------------------------------------------------------------------
// AlgorithmKind
// ---------------------------------------------------------------------------

/// Which traversal strategy a run uses.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AlgorithmKind {
    #[default]
    Bfs,
    Dfs,
    Dijkstra,
    Astar,
}

impl AlgorithmKind {
    /// Every strategy, in menu order.
    pub const ALL: [AlgorithmKind; 4] = [Self::Bfs, Self::Dfs, Self::Dijkstra, Self::Astar];

    /// Short lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
            Self::Dijkstra => "dijkstra",
            Self::Astar => "astar",
        }
    }

    /// Whether the strategy always reports a shortest path.
    pub const fn is_shortest(self) -> bool {
        !matches!(self, Self::Dfs)
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlgorithmKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Self::Bfs),
            "dfs" => Ok(Self::Dfs),
            "dijkstra" => Ok(Self::Dijkstra),
            "astar" | "a*" => Ok(Self::Astar),
            other => Err(Error::Parse(format!("unknown algorithm {other:?}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// A lazily evaluated search, one of the four strategies.
///
/// Yields `Step::Visit` for every settled coordinate, then exactly one
/// `Step::Result`, then nothing.
pub enum Search<P> {
    Bfs(Bfs<P>),
    Dfs(Dfs<P>),
    Dijkstra(Dijkstra<P>),
    Astar(Astar<P>),
}

impl<P: AstarPather> Search<P> {
    /// Prepare a search of `kind` from `from` to `to`.
    pub fn new(kind: AlgorithmKind, pather: P, from: Point, to: Point) -> Self {
        match kind {
            AlgorithmKind::Bfs => Self::Bfs(Bfs::new(pather, from, to)),
            AlgorithmKind::Dfs => Self::Dfs(Dfs::new(pather, from, to)),
            AlgorithmKind::Dijkstra => Self::Dijkstra(Dijkstra::new(pather, from, to)),
            AlgorithmKind::Astar => Self::Astar(Astar::new(pather, from, to)),
        }
    }

    /// The strategy in use.
    pub fn kind(&self) -> AlgorithmKind {
        match self {
            Self::Bfs(_) => AlgorithmKind::Bfs,
            Self::Dfs(_) => AlgorithmKind::Dfs,
            Self::Dijkstra(_) => AlgorithmKind::Dijkstra,
            Self::Astar(_) => AlgorithmKind::Astar,
        }
    }

    /// Drain the remaining steps synchronously.
    pub fn run_to_end(self) -> Trace {
        let mut trace = Trace::default();
        for step in self {
            match step {
                Step::Visit(p) => trace.visited.push(p),
                Step::Result(outcome) => trace.outcome = outcome,
            }
        }
        trace
    }
}

impl Search<Snapshot> {
    /// Prepare a search over a snapshot between its Start and End.
    ///
    /// Fails with [`Error::PreconditionFailed`] unless both are set.
    pub fn from_snapshot(kind: AlgorithmKind, snapshot: Snapshot) -> Result<Self, Error> {
        let (from, to) = snapshot.endpoints().ok_or(Error::PreconditionFailed)?;
        Ok(Self::new(kind, snapshot, from, to))
    }
}

impl<P: AstarPather> Iterator for Search<P> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        match self {
            Self::Bfs(s) => s.next(),
            Self::Dfs(s) => s.next(),
            Self::Dijkstra(s) => s.next(),
            Self::Astar(s) => s.next(),
        }
    }
}

impl<P: AstarPather> FusedIterator for Search<P> {}

/// Everything a search emitted, collected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    /// Coordinates in visitation order.
    pub visited: Vec<Point>,
    pub outcome: Outcome,
}
