//! The display capability: [`Renderer`] and the [`Notice`]s sent to it.

use gridwalk_core::{CellState, Point};

/// A display update produced by the animation driver.
///
/// Notices are queued by the worker in the order the changes were applied
/// and handed to a [`Renderer`] on the foreground thread.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Notice {
    /// The cell at `pos` now reads `state`.
    Cell { pos: Point, state: CellState },
    /// The run completed.
    Finished { found: bool, path_len: usize },
}

impl Notice {
    /// Forward to the matching [`Renderer`] method.
    pub fn dispatch<R: Renderer + ?Sized>(self, renderer: &mut R) {
        match self {
            Self::Cell { pos, state } => renderer.cell_changed(pos, state),
            Self::Finished { found, path_len } => renderer.finished(found, path_len),
        }
    }
}

/// Implemented by whatever draws the grid.
pub trait Renderer {
    /// Called once per applied step.
    fn cell_changed(&mut self, pos: Point, state: CellState);

    /// Called once when a run completes, with the path length in
    /// coordinates (0 when no path exists).
    fn finished(&mut self, found: bool, path_len: usize);
}

/// Records notices, for headless callers and tests.
impl Renderer for Vec<Notice> {
    fn cell_changed(&mut self, pos: Point, state: CellState) {
        self.push(Notice::Cell { pos, state });
    }

    fn finished(&mut self, found: bool, path_len: usize) {
        self.push(Notice::Finished { found, path_len });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_reaches_the_renderer() {
        let mut log: Vec<Notice> = Vec::new();
        let notices = [
            Notice::Cell {
                pos: Point::new(1, 2),
                state: CellState::Visited,
            },
            Notice::Finished {
                found: false,
                path_len: 0,
            },
        ];
        for n in notices.clone() {
            n.dispatch(&mut log);
        }
        assert_eq!(log, notices);
    }
}
