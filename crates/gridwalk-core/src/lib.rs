//! **gridwalk-core**: the grid model behind animated path search.
//!
//! This crate provides the types every other gridwalk crate builds on:
//! coordinates and bounds, cell states, the editable [`Grid`], the frozen
//! [`Snapshot`] a search runs against, and the shared [`Error`] type.

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;
pub mod snapshot;

pub use cell::CellState;
pub use error::Error;
pub use geom::{Point, Range};
pub use grid::Grid;
pub use snapshot::Snapshot;
