use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::facts::FactStore;
use crate::grid::GridBounds;
use crate::statement::Statement;

/// What one call into the knowledge base learned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceReport {
    /// Fixed-point passes run, including the final unproductive one.
    pub passes: usize,
    /// Cells newly proven safe, in discovery order.
    pub new_safe: Vec<Cell>,
    /// Cells newly proven hazardous, in discovery order.
    pub new_hazards: Vec<Cell>,
    /// Statements added by subsumption.
    pub derived_statements: usize,
    /// Statements dropped as vacuous or duplicate.
    pub pruned_statements: usize,
}

impl InferenceReport {
    /// Returns true if anything new was proven about a cell.
    #[must_use]
    pub fn resolved_any(&self) -> bool {
        !self.new_safe.is_empty() || !self.new_hazards.is_empty()
    }
}

/// Serializable copy of a knowledge base, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeSnapshot {
    /// Grid bounds.
    pub bounds: GridBounds,
    /// Moves, safe cells and hazards.
    pub facts: FactStore,
    /// Live statements in insertion order.
    pub statements: Vec<Statement>,
}
