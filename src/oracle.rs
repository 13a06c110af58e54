//! The grid collaborator contract.
//!
//! The knowledge base never sees where hazards are. It only learns what an
//! oracle reports about cells it chose to open. By using a trait, games can
//! be driven by:
//! - A simulated `Board` for tests, benches and the CLI
//! - Any external grid that answers adjacency queries

use crate::cell::Cell;
use crate::error::MineResult;
use crate::grid::GridBounds;

/// Answers adjacency-count queries about a hidden hazard layout.
pub trait HazardOracle {
    /// Dimensions of the grid.
    fn bounds(&self) -> GridBounds;

    /// Total number of hazards on the grid.
    fn hazard_count(&self) -> usize;

    /// Open `cell` and report how many of its 8 neighbours hold a hazard.
    ///
    /// # Errors
    /// - `Play(Detonated)` if `cell` itself holds a hazard.
    /// - `Validation` if `cell` is off the grid.
    fn query(&self, cell: Cell) -> MineResult<u8>;
}
