//! Breadth-first search: [`Bfs`].

use std::collections::VecDeque;
use std::iter::FusedIterator;

use gridwalk_core::Point;

use crate::space::SearchSpace;
use crate::step::Step;
use crate::traits::Pather;

/// Breadth-first search.
///
/// FIFO frontier. A coordinate is marked seen the moment it is enqueued, so
/// each coordinate is visited at most once and visits come in non-decreasing
/// edge distance from the start. The path found is shortest in edge count.
pub struct Bfs<P> {
    pather: P,
    space: SearchSpace,
    seen: Vec<bool>,
    queue: VecDeque<usize>,
}

impl<P: Pather> Bfs<P> {
    /// Prepare a search from `from` to `to`. Nothing is explored until the
    /// first call to `next`.
    pub fn new(pather: P, from: Point, to: Point) -> Self {
        let (space, start) = SearchSpace::new("bfs", pather.bounds(), from, to);
        let mut seen = vec![false; space.rng.len()];
        let mut queue = VecDeque::new();
        if let Some(si) = start {
            seen[si] = true;
            queue.push_back(si);
        }
        Self {
            pather,
            space,
            seen,
            queue,
        }
    }
}

impl<P: Pather> Iterator for Bfs<P> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if !self.space.is_exploring() {
            return self.space.finish();
        }
        let Some(ci) = self.queue.pop_front() else {
            self.space.exhaust();
            return self.space.finish();
        };

        if !self.space.is_goal(ci) {
            let cp = self.space.point(ci);
            let mut nbuf = std::mem::take(&mut self.space.nbuf);
            nbuf.clear();
            self.pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.space.idx(np) else {
                    continue;
                };
                if self.seen[ni] {
                    continue;
                }
                self.seen[ni] = true;
                self.space.parents[ni] = ci;
                self.queue.push_back(ni);
            }
            self.space.nbuf = nbuf;
        }

        Some(self.space.visit(ci))
    }
}

impl<P: Pather> FusedIterator for Bfs<P> {}
