//! Grid cell coordinates.
//!
//! A `Cell` is a plain value: two cells are the same cell iff their row and
//! column match. Ordering is row-major, which keeps every set of cells in the
//! crate iterating in a stable order.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A `(row, col)` coordinate on the grid.
///
/// # Examples
///
/// ```
/// use minelogic::Cell;
///
/// let cell = Cell::new(1, 2);
/// assert_eq!(cell.row, 1);
/// assert_eq!(cell.to_string(), "(1, 2)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Zero-based row index.
    pub row: usize,
    /// Zero-based column index.
    pub col: usize,
}

impl Cell {
    /// Creates a cell at `(row, col)`.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns true if `other` is one of the eight cells surrounding this one.
    #[must_use]
    pub const fn is_adjacent(&self, other: &Self) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        dr <= 1 && dc <= 1 && !(dr == 0 && dc == 0)
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
