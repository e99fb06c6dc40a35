//! [`Step`] and [`Outcome`]: what a search yields.

use gridwalk_core::Point;

/// One unit of observable search progress.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Step {
    /// A coordinate was settled for the first time.
    Visit(Point),
    /// Exploration ended. Always the last step of a search.
    Result(Outcome),
}

/// Terminal outcome of a search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Outcome {
    pub found: bool,
    /// Start to End inclusive; empty when `found` is false.
    pub path: Vec<Point>,
}

impl Outcome {
    /// A successful outcome along `path`.
    pub fn found(path: Vec<Point>) -> Self {
        Self { found: true, path }
    }

    /// The frontier emptied before End was reached.
    pub fn not_found() -> Self {
        Self::default()
    }

    /// Number of coordinates on the path.
    #[inline]
    pub fn path_len(&self) -> usize {
        self.path.len()
    }
}
