//! Depth-first search: [`Dfs`].

use std::iter::FusedIterator;

use gridwalk_core::Point;

use crate::space::SearchSpace;
use crate::step::Step;
use crate::traits::Pather;

/// Depth-first search.
///
/// LIFO frontier, marking coordinates seen when they are pushed. The path
/// it reports is valid but usually not the shortest one.
pub struct Dfs<P> {
    pather: P,
    space: SearchSpace,
    seen: Vec<bool>,
    stack: Vec<usize>,
}

impl<P: Pather> Dfs<P> {
    /// Prepare a search from `from` to `to`.
    pub fn new(pather: P, from: Point, to: Point) -> Self {
        let (space, start) = SearchSpace::new("dfs", pather.bounds(), from, to);
        let mut seen = vec![false; space.rng.len()];
        let mut stack = Vec::new();
        if let Some(si) = start {
            seen[si] = true;
            stack.push(si);
        }
        Self {
            pather,
            space,
            seen,
            stack,
        }
    }
}

impl<P: Pather> Iterator for Dfs<P> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if !self.space.is_exploring() {
            return self.space.finish();
        }
        let Some(ci) = self.stack.pop() else {
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
                self.stack.push(ni);
            }
            self.space.nbuf = nbuf;
        }

        Some(self.space.visit(ci))
    }
}

impl<P: Pather> FusedIterator for Dfs<P> {}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwalk_core::Grid;

    #[test]
    fn dives_along_last_pushed_neighbor() {
        let snap = Grid::from_ascii("S..\n...\n..E").unwrap().snapshot();
        let steps: Vec<Step> = Dfs::new(snap, Point::new(0, 0), Point::new(2, 2)).collect();
        let expected = vec![
            Point::new(0, 0),
            Point::new(1, 0),
            Point::new(2, 0),
            Point::new(2, 1),
            Point::new(2, 2),
        ];
        let visited: Vec<Point> = steps
            .iter()
            .filter_map(|s| match s {
                Step::Visit(p) => Some(*p),
                Step::Result(_) => None,
            })
            .collect();
        assert_eq!(visited, expected);
        assert_eq!(
            steps.last(),
            Some(&Step::Result(crate::Outcome::found(expected)))
        );
    }

    #[test]
    fn path_may_be_longer_than_shortest() {
        // North is pushed last, so DFS heads up first and detours.
        let snap = Grid::from_ascii(
            "....
             S..E
             ....",
        )
        .unwrap()
        .snapshot();
        let outcome = match Dfs::new(snap, Point::new(1, 0), Point::new(1, 3)).last() {
            Some(Step::Result(o)) => o,
            other => panic!("unexpected {other:?}"),
        };
        assert!(outcome.found);
        assert!(outcome.path_len() > 4);
        assert!(outcome.path.windows(2).all(|w| w[0].is_adjacent(w[1])));
    }
}
