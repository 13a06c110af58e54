//! Derivation records.
//!
//! Every conclusion the knowledge base reaches (a safe cell, a hazard, or a
//! new statement) can be logged together with the rule and the premise
//! statements that produced it. The log is an audit trail: replaying it
//! explains why a cell was flagged.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::statement::Statement;

/// Stable identifier for a derivation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DerivationId(uuid::Uuid);

impl DerivationId {
    /// Creates a new random derivation ID.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for DerivationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DerivationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The inference rule that produced a conclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InferenceRule {
    /// A statement admitted from an observation or an external constraint.
    Observation,
    /// A statement with count 0: every cell is safe.
    AllSafe,
    /// A statement with count equal to its size: every cell is a hazard.
    AllHazards,
    /// `B - A` derived from statements with `A ⊂ B`.
    Subsumption,
}

impl InferenceRule {
    /// Returns a short stable identifier suitable for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Observation => "observation",
            Self::AllSafe => "all_safe",
            Self::AllHazards => "all_hazards",
            Self::Subsumption => "subsumption",
        }
    }
}

/// What a derivation concluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Conclusion {
    /// The cell holds no hazard.
    Safe(Cell),
    /// The cell holds a hazard.
    Hazard(Cell),
    /// A new statement was admitted.
    Statement(Statement),
}

/// Immutable derivation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivationRecord {
    /// Derivation record identifier.
    pub id: DerivationId,

    /// When this derivation was recorded.
    pub tx_time: DateTime<Utc>,

    /// Rule that fired.
    pub rule: InferenceRule,

    /// Premise statements, as they stood when the rule fired.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub premises: Vec<Statement>,

    /// What was concluded.
    pub conclusion: Conclusion,
}

impl DerivationRecord {
    /// Construct a record stamped with the current time.
    #[must_use]
    pub fn new(rule: InferenceRule, premises: Vec<Statement>, conclusion: Conclusion) -> Self {
        Self {
            id: DerivationId::new(),
            tx_time: Utc::now(),
            rule,
            premises,
            conclusion,
        }
    }

    /// Returns true if this record concluded that `cell` is a hazard.
    #[must_use]
    pub fn concludes_hazard(&self, cell: Cell) -> bool {
        matches!(self.conclusion, Conclusion::Hazard(c) if c == cell)
    }

    /// Returns true if this record concluded that `cell` is safe.
    #[must_use]
    pub fn concludes_safe(&self, cell: Cell) -> bool {
        matches!(self.conclusion, Conclusion::Safe(c) if c == cell)
    }
}

impl fmt::Display for DerivationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.conclusion {
            Conclusion::Safe(cell) => write!(f, "[{}] {cell} is safe", self.rule.name())?,
            Conclusion::Hazard(cell) => write!(f, "[{}] {cell} is a hazard", self.rule.name())?,
            Conclusion::Statement(s) => write!(f, "[{}] {s}", self.rule.name())?,
        }
        for premise in &self.premises {
            write!(f, " <- {premise}")?;
        }
        Ok(())
    }
}
