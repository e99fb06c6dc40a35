//! [`Snapshot`]: the frozen Wall/Start/End layout a search runs against.

use crate::geom::{Point, Range};

/// An immutable copy of a grid's layout, taken when a run starts.
///
/// Later edits to the grid do not affect a snapshot, so an in-flight search
/// never observes them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub(crate) bounds: Range,
    pub(crate) walls: Vec<bool>,
    pub(crate) start: Option<Point>,
    pub(crate) end: Option<Point>,
}

impl Snapshot {
    /// The grid rectangle.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// The Start coordinate, if one was set.
    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// The End coordinate, if one was set.
    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// Both endpoints, or `None` unless Start and End are set.
    #[inline]
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        Some((self.start?, self.end?))
    }

    /// Whether `p` is a wall. Out-of-range points count as walls.
    #[inline]
    pub fn is_wall(&self, p: Point) -> bool {
        match self.bounds.index(p) {
            Some(i) => self.walls[i],
            None => true,
        }
    }

    /// Whether a search may step onto `p`.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        !self.is_wall(p)
    }

    /// Number of wall cells.
    pub fn wall_count(&self) -> usize {
        self.walls.iter().filter(|&&w| w).count()
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use crate::grid::Grid;
    use super::Snapshot;

    #[test]
    fn snapshot_round_trip() {
        let g = Grid::from_ascii("S.#\n..E").unwrap();
        let snap = g.snapshot();
        let json = serde_json::to_string(&snap).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snap, back);
    }
}
