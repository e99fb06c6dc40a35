//! The [`Grid`] type: the session's cell grid and its edit operations.
//!
//! A `Grid` owns the Wall layout, the Start/End roles and the transient
//! Visited/Path trace written by the animation driver. Edits are rejected
//! with [`Error::GridLocked`] while a run holds the grid.

use rand::Rng;

use crate::cell::CellState;
use crate::error::Error;
use crate::geom::{Point, Range};
use crate::snapshot::Snapshot;

/// A fixed-size 2D grid of [`CellState`]s.
///
/// Start and End are stored as roles on top of the cell layer, so at most
/// one cell holds each role. The same cell may hold both, in which case it
/// reads as `Start`.
#[derive(Debug, Clone)]
pub struct Grid {
    bounds: Range,
    // Empty, Wall, Visited or Path only.
    cells: Vec<CellState>,
    start: Option<Point>,
    end: Option<Point>,
    locked: bool,
}

impl Grid {
    /// Create an empty grid with `rows` rows and `cols` columns.
    pub fn new(rows: i32, cols: i32) -> Self {
        let bounds = Range::with_size(rows, cols);
        Self {
            bounds,
            cells: vec![CellState::Empty; bounds.len()],
            start: None,
            end: None,
            locked: false,
        }
    }

    /// Parse a grid from rows of `.`, `#`, `S`, `E`, `v` and `*`.
    ///
    /// Blank lines and surrounding whitespace are ignored.
    pub fn from_ascii(text: &str) -> Result<Self, Error> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let cols = rows.first().map_or(0, |r| r.chars().count());
        let mut grid = Self::new(rows.len() as i32, cols as i32);

        for (r, line) in rows.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(Error::Parse(format!(
                    "row {r} has {} columns, expected {cols}",
                    line.chars().count()
                )));
            }
            for (c, ch) in line.chars().enumerate() {
                let p = Point::new(r as i32, c as i32);
                let state = CellState::from_char(ch)
                    .ok_or_else(|| Error::Parse(format!("invalid character {ch:?} at {p}")))?;
                match state {
                    CellState::Start if grid.start.is_some() => {
                        return Err(Error::Parse(format!("second start at {p}")));
                    }
                    CellState::End if grid.end.is_some() => {
                        return Err(Error::Parse(format!("second end at {p}")));
                    }
                    CellState::Start => grid.start = Some(p),
                    CellState::End => grid.end = Some(p),
                    other => grid.write(p, other),
                }
            }
        }
        Ok(grid)
    }

    /// Render the grid in the format accepted by [`from_ascii`](Self::from_ascii).
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.bounds.len() + self.rows() as usize);
        for row in 0..self.rows() {
            if row > 0 {
                out.push('\n');
            }
            for col in 0..self.cols() {
                out.push(self.state(Point::new(row, col)).to_char());
            }
        }
        out
    }

    /// The bounding range of the grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.height()
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.width()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// The Start coordinate, if set.
    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// The End coordinate, if set.
    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// Read the state at `p`. Returns `None` if `p` is outside the grid.
    pub fn at(&self, p: Point) -> Option<CellState> {
        self.contains(p).then(|| self.state(p))
    }

    /// Row-major iterator over `(Point, CellState)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, CellState)> + '_ {
        self.bounds.iter().map(move |p| (p, self.state(p)))
    }

    // -----------------------------------------------------------------------
    // Edits
    // -----------------------------------------------------------------------

    /// Set `p` to `Wall` or `Empty`.
    ///
    /// If `p` held Start or End, that role is cleared.
    pub fn set_cell(&mut self, p: Point, state: CellState) -> Result<(), Error> {
        self.check_edit(p)?;
        if !matches!(state, CellState::Wall | CellState::Empty) {
            return Err(Error::InvalidState(state));
        }
        self.clear_trace_unchecked();
        if self.start == Some(p) {
            self.start = None;
        }
        if self.end == Some(p) {
            self.end = None;
        }
        self.write(p, state);
        Ok(())
    }

    /// Move the Start role to `p`. No-op if `p` already holds it.
    pub fn set_start(&mut self, p: Point) -> Result<(), Error> {
        self.check_edit(p)?;
        if self.start == Some(p) {
            return Ok(());
        }
        self.clear_trace_unchecked();
        self.write(p, CellState::Empty);
        self.start = Some(p);
        Ok(())
    }

    /// Move the End role to `p`. No-op if `p` already holds it.
    pub fn set_end(&mut self, p: Point) -> Result<(), Error> {
        self.check_edit(p)?;
        if self.end == Some(p) {
            return Ok(());
        }
        self.clear_trace_unchecked();
        self.write(p, CellState::Empty);
        self.end = Some(p);
        Ok(())
    }

    /// Clear every cell to `Empty` and drop both roles.
    pub fn reset(&mut self) -> Result<(), Error> {
        if self.locked {
            return Err(Error::GridLocked);
        }
        self.cells.fill(CellState::Empty);
        self.start = None;
        self.end = None;
        Ok(())
    }

    /// Clear Visited and Path cells, keeping the layout.
    pub fn clear_trace(&mut self) -> Result<(), Error> {
        if self.locked {
            return Err(Error::GridLocked);
        }
        self.clear_trace_unchecked();
        Ok(())
    }

    /// Replace the wall layout with random walls.
    ///
    /// Each cell other than Start and End becomes a wall with probability
    /// `density` (clamped to `[0, 1]`).
    pub fn scatter_walls<R: Rng>(&mut self, rng: &mut R, density: f64) -> Result<(), Error> {
        if self.locked {
            return Err(Error::GridLocked);
        }
        let density = density.clamp(0.0, 1.0);
        for i in 0..self.cells.len() {
            let p = self.bounds.point(i);
            let wall = !self.is_endpoint(p) && rng.random_bool(density);
            self.cells[i] = if wall { CellState::Wall } else { CellState::Empty };
        }
        Ok(())
    }

    /// Immutable copy of the Wall/Start/End layout.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            bounds: self.bounds,
            walls: self.cells.iter().map(|&c| c == CellState::Wall).collect(),
            start: self.start,
            end: self.end,
        }
    }

    // -----------------------------------------------------------------------
    // Run support
    // -----------------------------------------------------------------------

    /// Reject edits until [`unlock`](Self::unlock). Held by the run
    /// controller while a search is in flight.
    #[inline]
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Accept edits again.
    #[inline]
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// Whether edits are currently rejected.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Write a `Visited` or `Path` trace state at `p`.
    ///
    /// Start and End keep their role and walls are never overwritten.
    /// Returns `true` if the cell changed.
    pub fn mark(&mut self, p: Point, state: CellState) -> bool {
        if !state.is_transient() || self.is_endpoint(p) {
            return false;
        }
        let Some(i) = self.bounds.index(p) else {
            return false;
        };
        if self.cells[i] == CellState::Wall || self.cells[i] == state {
            return false;
        }
        self.cells[i] = state;
        true
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn check_edit(&self, p: Point) -> Result<(), Error> {
        if self.locked {
            return Err(Error::GridLocked);
        }
        if !self.contains(p) {
            return Err(Error::InvalidCoordinate(p));
        }
        Ok(())
    }

    #[inline]
    fn is_endpoint(&self, p: Point) -> bool {
        self.start == Some(p) || self.end == Some(p)
    }

    fn state(&self, p: Point) -> CellState {
        if self.start == Some(p) {
            CellState::Start
        } else if self.end == Some(p) {
            CellState::End
        } else {
            self.bounds
                .index(p)
                .map(|i| self.cells[i])
                .unwrap_or_default()
        }
    }

    fn write(&mut self, p: Point, state: CellState) {
        if let Some(i) = self.bounds.index(p) {
            self.cells[i] = state;
        }
    }

    fn clear_trace_unchecked(&mut self) {
        for c in self.cells.iter_mut() {
            if c.is_transient() {
                *c = CellState::Empty;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn new_grid_is_empty() {
        let g = Grid::new(3, 4);
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cols(), 4);
        assert!(g.iter().all(|(_, s)| s == CellState::Empty));
        assert_eq!(g.at(Point::new(3, 0)), None);
    }

    #[test]
    fn set_start_moves_the_role() {
        let mut g = Grid::new(3, 3);
        g.set_start(Point::new(0, 0)).unwrap();
        g.set_start(Point::new(1, 1)).unwrap();
        assert_eq!(g.at(Point::new(0, 0)), Some(CellState::Empty));
        assert_eq!(g.at(Point::new(1, 1)), Some(CellState::Start));
        assert_eq!(g.iter().filter(|(_, s)| *s == CellState::Start).count(), 1);
    }

    #[test]
    fn set_end_over_wall_replaces_it() {
        let mut g = Grid::new(3, 3);
        g.set_cell(Point::new(2, 2), CellState::Wall).unwrap();
        g.set_end(Point::new(2, 2)).unwrap();
        assert_eq!(g.at(Point::new(2, 2)), Some(CellState::End));
        assert!(!g.snapshot().is_wall(Point::new(2, 2)));
    }

    #[test]
    fn wall_over_start_clears_role() {
        let mut g = Grid::new(3, 3);
        g.set_start(Point::new(1, 1)).unwrap();
        g.set_cell(Point::new(1, 1), CellState::Wall).unwrap();
        assert_eq!(g.start(), None);
        assert_eq!(g.at(Point::new(1, 1)), Some(CellState::Wall));
    }

    #[test]
    fn out_of_range_edits_are_rejected() {
        let mut g = Grid::new(2, 2);
        let p = Point::new(2, 0);
        assert_eq!(g.set_start(p), Err(Error::InvalidCoordinate(p)));
        assert_eq!(g.set_end(p), Err(Error::InvalidCoordinate(p)));
        assert_eq!(
            g.set_cell(p, CellState::Wall),
            Err(Error::InvalidCoordinate(p))
        );
        assert_eq!(g.start(), None);
    }

    #[test]
    fn set_cell_rejects_roles_and_trace_states() {
        let mut g = Grid::new(2, 2);
        for s in [CellState::Start, CellState::End, CellState::Visited, CellState::Path] {
            assert_eq!(
                g.set_cell(Point::ZERO, s),
                Err(Error::InvalidState(s))
            );
        }
    }

    #[test]
    fn locked_grid_rejects_edits() {
        let mut g = Grid::new(2, 2);
        g.lock();
        assert_eq!(g.set_start(Point::ZERO), Err(Error::GridLocked));
        assert_eq!(g.set_cell(Point::ZERO, CellState::Wall), Err(Error::GridLocked));
        assert_eq!(g.reset(), Err(Error::GridLocked));
        assert_eq!(g.clear_trace(), Err(Error::GridLocked));
        assert_eq!(g.at(Point::ZERO), Some(CellState::Empty));
        g.unlock();
        assert!(g.set_start(Point::ZERO).is_ok());
    }

    #[test]
    fn edits_clear_the_trace() {
        let mut g = Grid::from_ascii("Sv*\n..E").unwrap();
        g.set_cell(Point::new(1, 0), CellState::Wall).unwrap();
        assert_eq!(g.to_ascii(), "S..\n#.E");
    }

    #[test]
    fn mark_keeps_endpoints_and_walls() {
        let mut g = Grid::from_ascii("S#E").unwrap();
        assert!(!g.mark(Point::new(0, 0), CellState::Visited));
        assert!(!g.mark(Point::new(0, 1), CellState::Visited));
        assert!(!g.mark(Point::new(0, 2), CellState::Path));
        assert!(!g.mark(Point::new(0, 2), CellState::Wall));
        assert_eq!(g.to_ascii(), "S#E");

        let mut g = Grid::from_ascii("S.E").unwrap();
        assert!(g.mark(Point::new(0, 1), CellState::Visited));
        assert!(g.mark(Point::new(0, 1), CellState::Path));
        assert_eq!(g.to_ascii(), "S*E");
    }

    #[test]
    fn reset_is_idempotent() {
        let mut g = Grid::from_ascii("S#v\n.*E").unwrap();
        g.reset().unwrap();
        let once = g.to_ascii();
        g.reset().unwrap();
        assert_eq!(g.to_ascii(), once);
        assert_eq!(once, "...\n...");
        assert_eq!(g.start(), None);
        assert_eq!(g.end(), None);
    }

    #[test]
    fn snapshot_is_stable_and_detached() {
        let mut g = Grid::from_ascii("S.#\n..E").unwrap();
        let a = g.snapshot();
        assert_eq!(a, g.snapshot());

        g.set_cell(Point::new(0, 1), CellState::Wall).unwrap();
        assert!(!a.is_wall(Point::new(0, 1)));
        assert_ne!(a, g.snapshot());
    }

    #[test]
    fn ascii_parse_errors() {
        assert!(matches!(Grid::from_ascii("..\n..."), Err(Error::Parse(_))));
        assert!(matches!(Grid::from_ascii(".x"), Err(Error::Parse(_))));
        assert!(matches!(Grid::from_ascii("SS"), Err(Error::Parse(_))));
    }

    #[test]
    fn scatter_walls_spares_endpoints() {
        let mut g = Grid::new(10, 10);
        g.set_start(Point::new(0, 0)).unwrap();
        g.set_end(Point::new(9, 9)).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        g.scatter_walls(&mut rng, 1.0).unwrap();
        assert_eq!(g.at(Point::new(0, 0)), Some(CellState::Start));
        assert_eq!(g.at(Point::new(9, 9)), Some(CellState::End));
        assert_eq!(g.snapshot().wall_count(), 98);

        g.scatter_walls(&mut rng, 0.0).unwrap();
        assert_eq!(g.snapshot().wall_count(), 0);
    }
}
