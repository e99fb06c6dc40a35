//! The [`CellState`] type: what a single grid cell currently shows.

use std::fmt;

/// State of one grid cell.
///
/// `Wall`, `Start` and `End` form the layout a search runs against.
/// `Visited` and `Path` are transient: they are written by the animation
/// driver and cleared by any edit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Empty,
    Wall,
    Start,
    End,
    Visited,
    Path,
}

impl CellState {
    /// Whether the state is a visualization-only state.
    #[inline]
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::Visited | Self::Path)
    }

    /// Whether the state is an endpoint role.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }

    /// The character used by the ASCII grid format.
    pub const fn to_char(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Wall => '#',
            Self::Start => 'S',
            Self::End => 'E',
            Self::Visited => 'v',
            Self::Path => '*',
        }
    }

    /// Parse a character of the ASCII grid format.
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::Empty),
            '#' => Some(Self::Wall),
            'S' => Some(Self::Start),
            'E' => Some(Self::End),
            'v' => Some(Self::Visited),
            '*' => Some(Self::Path),
            _ => None,
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Wall => "wall",
            Self::Start => "start",
            Self::End => "end",
            Self::Visited => "visited",
            Self::Path => "path",
        };
        f.write_str(name)
    }
}
