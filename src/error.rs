//! Error types for minelogic.
//!
//! All errors are strongly typed using thiserror so callers can match on
//! the exact condition. Inconsistencies are never absorbed silently: they
//! mean the observations fed to the knowledge base contradict each other.

use thiserror::Error;

use crate::cell::Cell;

/// Validation errors that occur during input validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Grid dimensions must be non-zero (height {height}, width {width})")]
    EmptyGrid {
        height: usize,
        width: usize,
    },

    #[error("Grid of {height}x{width} has more cells than can be addressed")]
    GridTooLarge {
        height: usize,
        width: usize,
    },

    #[error("Cell {cell} is outside the {height}x{width} grid")]
    CellOutOfBounds {
        cell: Cell,
        height: usize,
        width: usize,
    },

    #[error("Statement count {count} exceeds its {size} cells")]
    CountExceedsCells {
        count: usize,
        size: usize,
    },

    #[error("Adjacent hazard count {count} exceeds the maximum of 8")]
    AdjacentCountTooLarge {
        count: u8,
    },

    #[error("Cannot place {hazards} hazards on a grid of {cells} cells")]
    TooManyHazards {
        hazards: usize,
        cells: usize,
    },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        reason: String,
    },
}

/// Contradictions detected while ingesting observations or running inference.
///
/// Any of these means the caller fed contradictory input or the fact store
/// was corrupted. Retrying the same input cannot help.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InconsistentObservation {
    #[error("Cell {cell} was observed but is a known hazard")]
    ObservedHazard {
        cell: Cell,
    },

    #[error("Observation at {cell} reports {count} hazards below {known_hazards} known neighbours")]
    NegativeCount {
        cell: Cell,
        count: usize,
        known_hazards: usize,
    },

    #[error("Statement {statement} claims fewer than its {known_hazards} known hazards")]
    TooFewHazards {
        statement: String,
        known_hazards: usize,
    },

    #[error("Constraint claims {count} hazards among only {size} unresolved cells")]
    CountExceedsCells {
        count: usize,
        size: usize,
    },

    #[error("Subsumption of {subset} by {superset} yields a negative count")]
    NegativeDerivedCount {
        subset: String,
        superset: String,
    },

    #[error("Statements over the same cells disagree: {existing} vs {incoming}")]
    ConflictingCounts {
        existing: String,
        incoming: String,
    },

    #[error("Cell {cell} is inferred both safe and hazard")]
    SafeAndHazard {
        cell: Cell,
    },

    #[error("Marking {cell} as hazard underflows statement {statement}")]
    StatementUnderflow {
        cell: Cell,
        statement: String,
    },

    #[error("Marking {cell} as safe overflows statement {statement}")]
    StatementOverflow {
        cell: Cell,
        statement: String,
    },
}

/// Errors raised by the grid collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error("Stepped on a hazard at {cell}")]
    Detonated {
        cell: Cell,
    },
}

/// Top-level error type for minelogic.
#[derive(Debug, Error)]
pub enum MineError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Inconsistent observation: {0}")]
    Inconsistent(#[from] InconsistentObservation),

    #[error("Play error: {0}")]
    Play(#[from] PlayError),

    #[error("Configuration error: {message}")]
    Config {
        message: String,
    },
}

impl MineError {
    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is an inconsistency.
    #[must_use]
    pub const fn is_inconsistent(&self) -> bool {
        matches!(self, Self::Inconsistent(_))
    }

    /// Returns true if a move hit a hazard.
    #[must_use]
    pub const fn is_detonation(&self) -> bool {
        matches!(self, Self::Play(PlayError::Detonated { .. }))
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

/// Result type alias for minelogic operations.
pub type MineResult<T> = Result<T, MineError>;
