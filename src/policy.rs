//! Move selection.
//!
//! Policies only read the knowledge base. A proven-safe cell is always
//! preferred; otherwise a guess is drawn uniformly from the cells that are
//! neither observed nor known hazards.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::engine::KnowledgeBase;

/// How a move was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    /// The cell is proven safe.
    Safe,
    /// No safe cell was known; the cell was picked at random.
    Guess,
}

/// A chosen cell and how it was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Cell to open.
    pub cell: Cell,
    /// How the cell was chosen.
    pub kind: MoveKind,
}

/// A proven-safe cell that has not been observed yet.
#[must_use]
pub fn safe_move(kb: &KnowledgeBase) -> Option<Cell> {
    kb.safe_move_candidate()
}

/// A random cell that is neither observed nor a known hazard.
///
/// Returns `None` when no such cell is left.
pub fn random_move<R: Rng + ?Sized>(kb: &KnowledgeBase, rng: &mut R) -> Option<Cell> {
    let candidates: Vec<Cell> = kb
        .bounds()
        .cells()
        .filter(|cell| !kb.facts().has_moved(*cell) && !kb.is_known_hazard(*cell))
        .collect();
    candidates.choose(rng).copied()
}

/// The safe move if one is known, else a random guess.
pub fn next_move<R: Rng + ?Sized>(kb: &KnowledgeBase, rng: &mut R) -> Option<Move> {
    if let Some(cell) = safe_move(kb) {
        return Some(Move {
            cell,
            kind: MoveKind::Safe,
        });
    }
    random_move(kb, rng).map(|cell| Move {
        cell,
        kind: MoveKind::Guess,
    })
}
