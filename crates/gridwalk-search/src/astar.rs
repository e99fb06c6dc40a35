//! A* search guided by a distance estimate: [`Astar`].

use std::iter::FusedIterator;

use gridwalk_core::Point;

use crate::dijkstra::UNREACHABLE;
use crate::frontier::PriorityFrontier;
use crate::space::SearchSpace;
use crate::step::Step;
use crate::traits::AstarPather;

/// A* search.
///
/// Same relaxation discipline as [`Dijkstra`](crate::Dijkstra), but the
/// frontier is ordered by `g + estimate(p, to)`. With an admissible,
/// consistent estimate (Manhattan distance on a 4-connected unit grid) the
/// path is shortest. Equal priorities pop in insertion order.
pub struct Astar<P> {
    pather: P,
    space: SearchSpace,
    to: Point,
    g: Vec<i32>,
    closed: Vec<bool>,
    open: PriorityFrontier<usize>,
}

impl<P: AstarPather> Astar<P> {
    /// Prepare a search from `from` to `to`.
    pub fn new(pather: P, from: Point, to: Point) -> Self {
        let (space, start) = SearchSpace::new("astar", pather.bounds(), from, to);
        let len = space.rng.len();
        let mut g = vec![UNREACHABLE; len];
        let mut open = PriorityFrontier::new();
        if let Some(si) = start {
            g[si] = 0;
            open.push(si, pather.estimate(from, to));
        }
        Self {
            pather,
            space,
            to,
            g,
            closed: vec![false; len],
            open,
        }
    }

    /// Best known cost from the start to `p`.
    ///
    /// Returns [`UNREACHABLE`] if `p` has not been reached.
    pub fn cost_at(&self, p: Point) -> i32 {
        match self.space.idx(p) {
            Some(i) => self.g[i],
            None => UNREACHABLE,
        }
    }

    fn relax(&mut self, ci: usize) {
        let cp = self.space.point(ci);
        let current = self.g[ci];
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
            if tentative >= self.g[ni] {
                continue;
            }
            self.g[ni] = tentative;
            self.space.parents[ni] = ci;
            self.open
                .push(ni, tentative + self.pather.estimate(np, self.to));
        }
        self.space.nbuf = nbuf;
    }
}

impl<P: AstarPather> Iterator for Astar<P> {
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

impl<P: AstarPather> FusedIterator for Astar<P> {}
