//! Grid dimensions and neighbourhood generation.

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::ValidationError;

/// Validated grid dimensions.
///
/// Both dimensions are non-zero and their product fits in `usize`. Bounds are
/// fixed for the lifetime of a knowledge base and are what clips the
/// 8-neighbourhood of border cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridBounds {
    height: usize,
    width: usize,
}

impl GridBounds {
    /// Creates bounds for a `height` x `width` grid.
    pub fn new(height: usize, width: usize) -> Result<Self, ValidationError> {
        if height == 0 || width == 0 {
            return Err(ValidationError::EmptyGrid { height, width });
        }
        if height.checked_mul(width).is_none() {
            return Err(ValidationError::GridTooLarge { height, width });
        }
        Ok(Self { height, width })
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Total number of cells.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.height * self.width
    }

    /// Returns true if `cell` lies on the grid.
    #[must_use]
    pub const fn contains(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    /// Returns an error if `cell` lies off the grid.
    pub fn check(&self, cell: Cell) -> Result<(), ValidationError> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(ValidationError::CellOutOfBounds {
                cell,
                height: self.height,
                width: self.width,
            })
        }
    }

    /// The 8-neighbourhood of `cell`, clipped to the grid, in row-major order.
    ///
    /// `cell` itself is never yielded.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> {
        let last_row = self.height - 1;
        let last_col = self.width - 1;
        let rows = cell.row.saturating_sub(1)..=cell.row.saturating_add(1).min(last_row);
        rows.flat_map(move |row| {
            let cols = cell.col.saturating_sub(1)..=cell.col.saturating_add(1).min(last_col);
            cols.map(move |col| Cell::new(row, col))
        })
        .filter(move |candidate| *candidate != cell)
    }

    /// Every cell of the grid in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |col| Cell::new(row, col)))
    }
}

impl<'de> Deserialize<'de> for GridBounds {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            height: usize,
            width: usize,
        }

        let raw = Raw::deserialize(deserializer)?;
        GridBounds::new(raw.height, raw.width).map_err(serde::de::Error::custom)
    }
}
