//! The [`Error`] type shared by every gridwalk crate.

use std::fmt;

use crate::cell::CellState;
use crate::geom::Point;

/// Errors reported synchronously by grid edits and run control.
///
/// None of these are fatal. A search that finds no path is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The coordinate lies outside the grid.
    InvalidCoordinate(Point),
    /// `set_cell` only accepts `Wall` or `Empty`.
    InvalidState(CellState),
    /// An edit was attempted while a run holds the grid.
    GridLocked,
    /// A run was requested without both Start and End set.
    PreconditionFailed,
    /// A run was requested while another is still running.
    Busy,
    /// The pacing delay is outside the accepted domain.
    InvalidConfig { speed_millis: u64 },
    /// An ASCII grid could not be parsed.
    Parse(String),
    /// The background worker could not be spawned.
    Spawn(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCoordinate(p) => write!(f, "coordinate {p} is outside the grid"),
            Self::InvalidState(s) => write!(f, "cannot set a cell to {s} directly"),
            Self::GridLocked => f.write_str("grid is locked by a running search"),
            Self::PreconditionFailed => f.write_str("start and end must both be set"),
            Self::Busy => f.write_str("a search is already running"),
            Self::InvalidConfig { speed_millis } => {
                write!(f, "speed {speed_millis}ms is outside the accepted range")
            }
            Self::Parse(msg) => write!(f, "grid: {msg}"),
            Self::Spawn(msg) => write!(f, "could not start search worker: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(
            Error::InvalidCoordinate(Point::new(7, -1)).to_string(),
            "coordinate (7, -1) is outside the grid"
        );
        assert_eq!(
            Error::InvalidConfig { speed_millis: 0 }.to_string(),
            "speed 0ms is outside the accepted range"
        );
    }
}
