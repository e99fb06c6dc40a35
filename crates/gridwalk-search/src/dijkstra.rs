//! Dijkstra's algorithm over weighted pathers: [`Dijkstra`].

use std::iter::FusedIterator;

use gridwalk_core::Point;

use crate::frontier::PriorityFrontier;
use crate::space::SearchSpace;
use crate::step::Step;
use crate::traits::WeightedPather;

/// Sentinel distance for coordinates not reached yet.
pub const UNREACHABLE: i32 = i32::MAX;

/// Dijkstra's algorithm.
///
/// Min-priority frontier keyed by accumulated cost. A neighbor is
/// re-enqueued whenever a strictly shorter path to it is found; entries for
/// coordinates already finalized are discarded when popped. Equal costs pop
/// in insertion order.
pub struct Dijkstra<P> {
    pather: P,
    space: SearchSpace,
    dist: Vec<i32>,
    closed: Vec<bool>,
    open: PriorityFrontier<usize>,
}

impl<P: WeightedPather> Dijkstra<P> {
    /// Prepare a search from `from` to `to`.
    pub fn new(pather: P, from: Point, to: Point) -> Self {
        let (space, start) = SearchSpace::new("dijkstra", pather.bounds(), from, to);
        let len = space.rng.len();
        let mut dist = vec![UNREACHABLE; len];
        let mut open = PriorityFrontier::new();
        if let Some(si) = start {
            dist[si] = 0;
            open.push(si, 0);
        }
        Self {
            pather,
            space,
            dist,
            closed: vec![false; len],
            open,
        }
    }

    /// Tentative (or final, once visited) cost to reach `p`.
    ///
    /// Returns [`UNREACHABLE`] if `p` has not been reached.
    pub fn distance_at(&self, p: Point) -> i32 {
        match self.space.idx(p) {
            Some(i) => self.dist[i],
            None => UNREACHABLE,
        }
    }

    fn relax(&mut self, ci: usize) {
        let cp = self.space.point(ci);
        let current = self.dist[ci];
        let mut nbuf = std::mem::take(&mut self.space.nbuf);
        nbuf.clear();
        self.pather.neighbors(cp, &mut nbuf);

        for &np in nbuf.iter() {
            let Some(ni) = self.space.idx(np) else {
                continue;
            };
            if self.closed[ni] {
                continue;
            }
            let tentative = current + self.pather.cost(cp, np);
            if tentative >= self.dist[ni] {
                continue;
            }
            self.dist[ni] = tentative;
            self.space.parents[ni] = ci;
            self.open.push(ni, tentative);
        }
        self.space.nbuf = nbuf;
    }
}

impl<P: WeightedPather> Iterator for Dijkstra<P> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if !self.space.is_exploring() {
            return self.space.finish();
        }
        loop {
            let Some((ci, _)) = self.open.pop() else {
                self.space.exhaust();
                return self.space.finish();
            };
            // Skip stale entries.
            if self.closed[ci] {
                continue;
            }
            self.closed[ci] = true;
            if !self.space.is_goal(ci) {
                self.relax(ci);
            }
            return Some(self.space.visit(ci));
        }
    }
}

impl<P: WeightedPather> FusedIterator for Dijkstra<P> {}
