//! # minelogic - knowledge-base inference for grid deduction
//!
//! minelogic tracks logical statements of the form "exactly N of these cells
//! are hazards" and resolves them into certain conclusions as observations
//! arrive. It is the reasoning core of a minesweeper player: it never sees
//! the board, only the adjacency counts of cells it chose to open.
//!
//! ## Core Concepts
//!
//! - **Statement**: a set of unresolved cells and how many of them are hazards
//! - **FactStore**: cells observed, proven safe, and proven hazardous
//! - **KnowledgeBase**: owns both and runs inference to a fixed point
//! - **Inference**: direct resolution (count 0 or count == size) and subsumption
//!   (`A ⊂ B` yields `B - A` with count `B.count - A.count`)
//!
//! ## Usage
//!
//! ```rust
//! use minelogic::{Cell, GridBounds, KnowledgeBase};
//!
//! let mut kb = KnowledgeBase::new(GridBounds::new(3, 3)?);
//!
//! // The corner has no hazards around it: its three neighbours are safe.
//! kb.observe(Cell::new(0, 0), 0)?;
//! assert!(kb.is_known_safe(Cell::new(1, 1)));
//!
//! let next = kb.safe_move_candidate();
//! assert!(next.is_some());
//! # Ok::<(), minelogic::MineError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Core types
pub mod cell;
pub mod error;
pub mod facts;
pub mod grid;
pub mod statement;

// Inference
pub mod config;
pub mod derivation;
pub mod engine;
pub mod inference;

// Collaborators
pub mod board;
pub mod game;
pub mod oracle;
pub mod policy;

// Re-export primary types at crate root for convenience
pub use cell::Cell;
pub use error::{InconsistentObservation, MineError, MineResult, PlayError, ValidationError};
pub use facts::FactStore;
pub use grid::GridBounds;
pub use statement::Statement;

pub use config::{EngineConfig, GameConfig};
pub use derivation::{Conclusion, DerivationId, DerivationRecord, InferenceRule};
pub use engine::{InferenceReport, KnowledgeBase, KnowledgeSnapshot, MAX_ADJACENT};

pub use board::Board;
pub use game::{Game, GameSummary, Outcome, Step};
pub use oracle::HazardOracle;
pub use policy::{Move, MoveKind};
