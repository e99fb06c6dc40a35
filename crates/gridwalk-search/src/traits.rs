//! Pather traits: [`Pather`], [`WeightedPather`], [`AstarPather`].

use gridwalk_core::{Point, Range, Snapshot};

use crate::distance::manhattan;

/// Minimal search interface: bounds and neighbor enumeration.
pub trait Pather {
    /// The rectangle every searched point lies in.
    fn bounds(&self) -> Range;

    /// Append passable neighbors of `p` into `buf`, in East, South, West,
    /// North order. The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Point, to: Point) -> i32;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of distance from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Point, to: Point) -> i32;
}

impl Pather for Snapshot {
    #[inline]
    fn bounds(&self) -> Range {
        Snapshot::bounds(self)
    }

    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(p.neighbors_4().into_iter().filter(|&n| self.is_passable(n)));
    }
}

impl WeightedPather for Snapshot {
    #[inline]
    fn cost(&self, _from: Point, _to: Point) -> i32 {
        1
    }
}

impl AstarPather for Snapshot {
    #[inline]
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}
