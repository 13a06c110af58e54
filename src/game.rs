//! Game driver: a knowledge base playing against an oracle.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cell::Cell;
use crate::config::EngineConfig;
use crate::engine::{InferenceReport, KnowledgeBase};
use crate::error::MineResult;
use crate::oracle::HazardOracle;
use crate::policy::{self, Move, MoveKind};

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Outcome {
    /// Every cell without a hazard was observed.
    Won,
    /// A move opened a hazard.
    Lost {
        /// The hazard that was opened.
        cell: Cell,
    },
    /// No candidate move was left before the board was cleared.
    NoMoves,
}

/// Result of one call to [`Game::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The move was safe and its observation was ingested.
    Observed {
        /// The move made.
        mv: Move,
        /// Adjacent hazards reported for the opened cell.
        count: u8,
        /// What the knowledge base learned from it.
        report: InferenceReport,
    },
    /// The move opened a hazard; the game is lost.
    Detonated {
        /// The losing move.
        mv: Move,
    },
    /// The game is already over.
    Finished,
}

/// Totals for a finished (or interrupted) game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// How the game ended.
    pub outcome: Outcome,
    /// Cells opened, including a losing move.
    pub moves: usize,
    /// Moves on proven-safe cells.
    pub safe_moves: usize,
    /// Moves chosen at random.
    pub guesses: usize,
    /// Hazards the knowledge base proved.
    pub flagged: usize,
}

/// One game.
#[derive(Debug)]
pub struct Game<O, R> {
    oracle: O,
    kb: KnowledgeBase,
    rng: R,
    safe_moves: usize,
    guesses: usize,
    lost: Option<Cell>,
}

impl<O: HazardOracle, R: Rng> Game<O, R> {
    /// Start a game with an empty knowledge base sized to the oracle's grid.
    pub fn new(oracle: O, config: EngineConfig, rng: R) -> Self {
        let kb = KnowledgeBase::with_config(oracle.bounds(), config);
        Self {
            oracle,
            kb,
            rng,
            safe_moves: 0,
            guesses: 0,
            lost: None,
        }
    }

    /// The knowledge base.
    #[must_use]
    pub const fn knowledge(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// The oracle.
    #[must_use]
    pub const fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Returns true once every cell without a hazard has been observed.
    #[must_use]
    pub fn is_won(&self) -> bool {
        let bounds = self.oracle.bounds();
        self.lost.is_none()
            && self.kb.moves_made().len() + self.oracle.hazard_count() >= bounds.cell_count()
    }

    /// Returns true once the game is won or lost.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.lost.is_some() || self.is_won()
    }

    /// Make one move and feed the result back to the knowledge base.
    ///
    /// # Errors
    /// Propagates inconsistencies from the knowledge base and any oracle
    /// error other than a detonation.
    pub fn step(&mut self) -> MineResult<Step> {
        if self.is_over() {
            return Ok(Step::Finished);
        }
        let Some(mv) = policy::next_move(&self.kb, &mut self.rng) else {
            return Ok(Step::Finished);
        };
        match mv.kind {
            MoveKind::Safe => self.safe_moves += 1,
            MoveKind::Guess => self.guesses += 1,
        }

        match self.oracle.query(mv.cell) {
            Ok(count) => {
                debug!(cell = %mv.cell, kind = ?mv.kind, count, "move made");
                let report = self.kb.observe(mv.cell, count)?;
                Ok(Step::Observed { mv, count, report })
            }
            Err(e) if e.is_detonation() => {
                info!(cell = %mv.cell, kind = ?mv.kind, "hazard opened");
                self.lost = Some(mv.cell);
                Ok(Step::Detonated { mv })
            }
            Err(e) => Err(e),
        }
    }

    /// Play until the game is over or no move is left.
    ///
    /// Every observed step opens a cell never opened before, so this makes
    /// at most one step per cell.
    pub fn play(&mut self) -> MineResult<GameSummary> {
        while !matches!(self.step()?, Step::Finished | Step::Detonated { .. }) {}
        let summary = self.summary();
        info!(
            outcome = ?summary.outcome,
            moves = summary.moves,
            guesses = summary.guesses,
            flagged = summary.flagged,
            "game over"
        );
        Ok(summary)
    }

    /// Totals so far.
    #[must_use]
    pub fn summary(&self) -> GameSummary {
        let outcome = if let Some(cell) = self.lost {
            Outcome::Lost { cell }
        } else if self.is_won() {
            Outcome::Won
        } else {
            Outcome::NoMoves
        };
        GameSummary {
            outcome,
            moves: self.safe_moves + self.guesses,
            safe_moves: self.safe_moves,
            guesses: self.guesses,
            flagged: self.kb.hazard_cells().len(),
        }
    }
}
