//! The knowledge base.
//!
//! `KnowledgeBase` owns every live statement and the fact store. Each
//! observation becomes a statement over the observed cell's unresolved
//! neighbours, then inference runs to a fixed point: direct resolution,
//! pruning, and pairwise subsumption repeat until a pass changes nothing.
//!
//! The knowledge base is single-owner and synchronous. After any
//! `InconsistentObservation` error its state is unspecified and it should be
//! discarded along with the game that fed it.

mod report;

use std::collections::BTreeSet;

use tracing::{debug, trace, warn};

use crate::cell::Cell;
use crate::config::EngineConfig;
use crate::derivation::{Conclusion, DerivationRecord, InferenceRule};
use crate::error::{InconsistentObservation, MineResult, ValidationError};
use crate::facts::FactStore;
use crate::grid::GridBounds;
use crate::inference::{self, Subsumption};
use crate::statement::Statement;

pub use report::{InferenceReport, KnowledgeSnapshot};

/// Largest adjacency count a cell can report.
pub const MAX_ADJACENT: u8 = 8;

/// Statements and facts about one grid.
///
/// # Examples
///
/// ```
/// use minelogic::{Cell, GridBounds, KnowledgeBase};
///
/// let mut kb = KnowledgeBase::new(GridBounds::new(3, 3).unwrap());
/// kb.observe(Cell::new(0, 0), 0).unwrap();
/// assert!(kb.is_known_safe(Cell::new(1, 1)));
/// assert_eq!(kb.safe_move_candidate(), Some(Cell::new(0, 1)));
/// ```
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    bounds: GridBounds,
    config: EngineConfig,
    statements: Vec<Statement>,
    facts: FactStore,
    derivations: Vec<DerivationRecord>,
}

impl KnowledgeBase {
    /// Create an empty knowledge base with the default engine configuration.
    #[must_use]
    pub fn new(bounds: GridBounds) -> Self {
        Self::with_config(bounds, EngineConfig::default())
    }

    /// Create an empty knowledge base.
    #[must_use]
    pub fn with_config(bounds: GridBounds, config: EngineConfig) -> Self {
        Self {
            bounds,
            config,
            statements: Vec::new(),
            facts: FactStore::new(),
            derivations: Vec::new(),
        }
    }

    /// Ingest an observation: `cell` is safe and has `count` adjacent hazards.
    ///
    /// # Errors
    /// - `Validation` if `cell` is off the grid or `count` exceeds 8.
    /// - `Inconsistent` if `cell` is a known hazard or the count contradicts
    ///   what is already known.
    pub fn observe(&mut self, cell: Cell, count: u8) -> MineResult<InferenceReport> {
        self.bounds.check(cell)?;
        if count > MAX_ADJACENT {
            return Err(ValidationError::AdjacentCountTooLarge { count }.into());
        }
        self.ingest(cell, count).map_err(|e| {
            warn!(cell = %cell, count, error = %e, "observation rejected");
            e
        })
    }

    fn ingest(&mut self, cell: Cell, count: u8) -> MineResult<InferenceReport> {
        if self.facts.is_hazard(cell) {
            return Err(InconsistentObservation::ObservedHazard { cell }.into());
        }

        let mut report = InferenceReport::default();
        self.facts.record_move(cell);
        if self.apply_safe(cell)? {
            report.new_safe.push(cell);
        }

        let mut known_hazards = 0usize;
        let mut unresolved = BTreeSet::new();
        for neighbor in self.bounds.neighbors(cell) {
            if self.facts.has_moved(neighbor) || self.facts.is_safe(neighbor) {
                continue;
            }
            if self.facts.is_hazard(neighbor) {
                known_hazards += 1;
            } else {
                unresolved.insert(neighbor);
            }
        }

        let count = usize::from(count);
        let adjusted = count
            .checked_sub(known_hazards)
            .ok_or(InconsistentObservation::NegativeCount {
                cell,
                count,
                known_hazards,
            })?;
        debug!(
            cell = %cell,
            count,
            adjusted,
            unresolved = unresolved.len(),
            "observation recorded"
        );

        self.admit(unresolved, adjusted)?;
        self.run_to_fixed_point(&mut report)?;
        Ok(report)
    }

    /// Add an externally known constraint and run inference.
    ///
    /// Cells already resolved are dropped from the statement; known hazards
    /// among them are subtracted from its count first.
    pub fn add_statement(&mut self, statement: Statement) -> MineResult<InferenceReport> {
        for cell in statement.cells() {
            self.bounds.check(*cell)?;
        }

        let known_hazards = statement
            .cells()
            .iter()
            .filter(|cell| self.facts.is_hazard(**cell))
            .count();
        let adjusted = statement.count().checked_sub(known_hazards).ok_or_else(|| {
            InconsistentObservation::TooFewHazards {
                statement: statement.to_string(),
                known_hazards,
            }
        })?;
        let unresolved: BTreeSet<Cell> = statement
            .cells()
            .iter()
            .copied()
            .filter(|cell| !self.facts.is_resolved(*cell))
            .collect();

        let mut report = InferenceReport::default();
        self.admit(unresolved, adjusted)?;
        self.run_to_fixed_point(&mut report)?;
        Ok(report)
    }

    /// Record `cell` as safe and run inference. Idempotent.
    pub fn record_safe(&mut self, cell: Cell) -> MineResult<InferenceReport> {
        self.bounds.check(cell)?;
        let mut report = InferenceReport::default();
        if self.apply_safe(cell)? {
            report.new_safe.push(cell);
        }
        self.run_to_fixed_point(&mut report)?;
        Ok(report)
    }

    /// Record `cell` as a hazard and run inference. Idempotent.
    pub fn record_hazard(&mut self, cell: Cell) -> MineResult<InferenceReport> {
        self.bounds.check(cell)?;
        let mut report = InferenceReport::default();
        if self.apply_hazard(cell)? {
            report.new_hazards.push(cell);
        }
        self.run_to_fixed_point(&mut report)?;
        Ok(report)
    }

    /// A safe cell not yet observed, if any. The smallest in row-major order.
    #[must_use]
    pub fn safe_move_candidate(&self) -> Option<Cell> {
        self.facts.unexplored_safe().next()
    }

    /// Returns true if `cell` is proven to be a hazard.
    #[must_use]
    pub fn is_known_hazard(&self, cell: Cell) -> bool {
        self.facts.is_hazard(cell)
    }

    /// Returns true if `cell` is proven safe.
    #[must_use]
    pub fn is_known_safe(&self, cell: Cell) -> bool {
        self.facts.is_safe(cell)
    }

    /// Cells already observed.
    #[must_use]
    pub const fn moves_made(&self) -> &BTreeSet<Cell> {
        self.facts.moves_made()
    }

    /// Cells proven safe.
    #[must_use]
    pub const fn safe_cells(&self) -> &BTreeSet<Cell> {
        self.facts.safe_cells()
    }

    /// Cells proven to hold a hazard.
    #[must_use]
    pub const fn hazard_cells(&self) -> &BTreeSet<Cell> {
        self.facts.hazard_cells()
    }

    /// The fact store.
    #[must_use]
    pub const fn facts(&self) -> &FactStore {
        &self.facts
    }

    /// Live statements, in insertion order.
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Grid bounds.
    #[must_use]
    pub const fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Engine configuration.
    #[must_use]
    pub const fn config(&self) -> EngineConfig {
        self.config
    }

    /// Derivation log, oldest first. Empty unless `record_derivations` is set.
    #[must_use]
    pub fn derivations(&self) -> &[DerivationRecord] {
        &self.derivations
    }

    /// The derivation that resolved `cell`, if it was inferred rather than observed.
    #[must_use]
    pub fn explain(&self, cell: Cell) -> Option<&DerivationRecord> {
        self.derivations
            .iter()
            .find(|record| record.concludes_hazard(cell) || record.concludes_safe(cell))
    }

    /// Serializable copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> KnowledgeSnapshot {
        KnowledgeSnapshot {
            bounds: self.bounds,
            facts: self.facts.clone(),
            statements: self.statements.clone(),
        }
    }

    /// Build the statement for an unresolved cell set and insert it.
    fn admit(&mut self, unresolved: BTreeSet<Cell>, count: usize) -> MineResult<()> {
        if count > unresolved.len() {
            return Err(InconsistentObservation::CountExceedsCells {
                count,
                size: unresolved.len(),
            }
            .into());
        }
        if unresolved.is_empty() {
            return Ok(());
        }

        let statement = Statement::new(unresolved, count)?;
        if self.insert_statement(statement.clone())? {
            self.record(InferenceRule::Observation, Vec::new(), Conclusion::Statement(statement));
        }
        Ok(())
    }

    /// Append `statement` unless one over the same cells is already live.
    fn insert_statement(&mut self, statement: Statement) -> Result<bool, InconsistentObservation> {
        if let Some(existing) = self.statements.iter().find(|s| s.cells() == statement.cells()) {
            if existing.count() != statement.count() {
                return Err(InconsistentObservation::ConflictingCounts {
                    existing: existing.to_string(),
                    incoming: statement.to_string(),
                });
            }
            return Ok(false);
        }
        self.statements.push(statement);
        Ok(true)
    }

    /// Add `cell` to the safe set and remove it from every live statement.
    fn apply_safe(&mut self, cell: Cell) -> Result<bool, InconsistentObservation> {
        if !self.facts.insert_safe(cell)? {
            return Ok(false);
        }
        for statement in &mut self.statements {
            statement.mark_safe(cell)?;
        }
        Ok(true)
    }

    /// Add `cell` to the hazard set and remove it from every live statement.
    fn apply_hazard(&mut self, cell: Cell) -> Result<bool, InconsistentObservation> {
        if !self.facts.insert_hazard(cell)? {
            return Ok(false);
        }
        for statement in &mut self.statements {
            statement.mark_hazard(cell)?;
        }
        Ok(true)
    }

    fn record(&mut self, rule: InferenceRule, premises: Vec<Statement>, conclusion: Conclusion) {
        if self.config.record_derivations {
            self.derivations.push(DerivationRecord::new(rule, premises, conclusion));
        }
    }

    fn run_to_fixed_point(&mut self, report: &mut InferenceReport) -> MineResult<()> {
        loop {
            report.passes += 1;
            let mut changed = false;

            let resolution = inference::scan(&self.statements, &self.facts)?;
            for (cell, premise) in resolution.safe {
                if self.apply_safe(cell)? {
                    debug!(cell = %cell, premise = %premise, "safe cell inferred");
                    self.record(InferenceRule::AllSafe, vec![premise], Conclusion::Safe(cell));
                    report.new_safe.push(cell);
                    changed = true;
                }
            }
            for (cell, premise) in resolution.hazards {
                if self.apply_hazard(cell)? {
                    debug!(cell = %cell, premise = %premise, "hazard inferred");
                    self.record(InferenceRule::AllHazards, vec![premise], Conclusion::Hazard(cell));
                    report.new_hazards.push(cell);
                    changed = true;
                }
            }

            let pruned = inference::prune(&mut self.statements)?;
            if pruned > 0 {
                report.pruned_statements += pruned;
                changed = true;
            }

            if self.config.subsumption {
                let staged = inference::derive(&self.statements)?;
                for Subsumption {
                    subset,
                    superset,
                    derived,
                } in staged
                {
                    let premises = if self.config.record_derivations {
                        vec![self.statements[subset].clone(), self.statements[superset].clone()]
                    } else {
                        Vec::new()
                    };
                    if self.insert_statement(derived.clone())? {
                        trace!(statement = %derived, "statement derived");
                        self.record(
                            InferenceRule::Subsumption,
                            premises,
                            Conclusion::Statement(derived),
                        );
                        report.derived_statements += 1;
                        changed = true;
                    }
                }
            }

            trace!(
                pass = report.passes,
                statements = self.statements.len(),
                changed,
                "inference pass"
            );
            if !changed {
                break;
            }
        }

        debug!(
            passes = report.passes,
            new_safe = report.new_safe.len(),
            new_hazards = report.new_hazards.len(),
            derived = report.derived_statements,
            statements = self.statements.len(),
            "fixed point reached"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MineError;

    fn kb(height: usize, width: usize) -> KnowledgeBase {
        KnowledgeBase::new(GridBounds::new(height, width).unwrap())
    }

    fn statement(coords: &[(usize, usize)], count: usize) -> Statement {
        Statement::new(coords.iter().copied().map(Cell::from), count).unwrap()
    }

    fn assert_invariants(kb: &KnowledgeBase) {
        for s in kb.statements() {
            assert!(s.count() <= s.len(), "statement {s} breaks count <= size");
            assert!(!s.is_empty(), "vacuous statement {s} left live");
            assert!(
                s.cells().iter().all(|c| !kb.facts().is_resolved(*c)),
                "statement {s} holds a resolved cell"
            );
        }
        assert!(kb.safe_cells().is_disjoint(kb.hazard_cells()));
    }

    #[test]
    fn observe_zero_clears_all_neighbors() {
        let mut kb = kb(5, 5);
        let report = kb.observe(Cell::new(2, 2), 0).unwrap();
        for neighbor in kb.bounds().neighbors(Cell::new(2, 2)) {
            assert!(kb.is_known_safe(neighbor), "{neighbor} should be safe");
        }
        assert_eq!(report.new_safe.len(), 9);
        assert!(kb.statements().is_empty());
        assert_invariants(&kb);
    }

    #[test]
    fn observe_full_count_marks_hazards() {
        let mut kb = kb(2, 2);
        let report = kb.observe(Cell::new(0, 0), 3).unwrap();
        assert_eq!(report.new_hazards.len(), 3);
        assert!(kb.is_known_hazard(Cell::new(1, 1)));
        assert_eq!(kb.safe_move_candidate(), None);
        assert_invariants(&kb);
    }

    #[test]
    fn observe_subtracts_known_hazards_and_drops_safe() {
        let mut kb = kb(3, 3);
        kb.record_hazard(Cell::new(0, 1)).unwrap();
        kb.record_safe(Cell::new(1, 0)).unwrap();
        kb.observe(Cell::new(0, 0), 2).unwrap();
        // Only (1, 1) is left unresolved and it must carry the second hazard.
        assert!(kb.is_known_hazard(Cell::new(1, 1)));
        assert_invariants(&kb);
    }

    #[test]
    fn observe_rejects_bad_input() {
        let mut kb = kb(3, 3);
        assert!(kb.observe(Cell::new(3, 0), 0).unwrap_err().is_validation());
        assert!(kb.observe(Cell::new(0, 0), 9).unwrap_err().is_validation());

        kb.record_hazard(Cell::new(1, 1)).unwrap();
        let err = kb.observe(Cell::new(1, 1), 0).unwrap_err();
        assert!(matches!(
            err,
            MineError::Inconsistent(InconsistentObservation::ObservedHazard { .. })
        ));
    }

    #[test]
    fn observe_rejects_count_below_known_hazards() {
        let mut kb = kb(3, 3);
        kb.record_hazard(Cell::new(0, 1)).unwrap();
        kb.record_hazard(Cell::new(1, 0)).unwrap();
        let err = kb.observe(Cell::new(0, 0), 1).unwrap_err();
        assert!(matches!(
            err,
            MineError::Inconsistent(InconsistentObservation::NegativeCount {
                count: 1,
                known_hazards: 2,
                ..
            })
        ));
    }

    #[test]
    fn observe_rejects_count_above_unresolved() {
        let mut kb = kb(3, 3);
        let err = kb.observe(Cell::new(0, 0), 4).unwrap_err();
        assert!(matches!(
            err,
            MineError::Inconsistent(InconsistentObservation::CountExceedsCells {
                count: 4,
                size: 3,
            })
        ));

        let mut single = kb_single();
        let err = single.observe(Cell::new(0, 0), 1).unwrap_err();
        assert!(err.is_inconsistent());
    }

    fn kb_single() -> KnowledgeBase {
        kb(1, 1)
    }

    #[test]
    fn observe_isolated_cell_adds_nothing() {
        let mut kb = kb_single();
        let report = kb.observe(Cell::new(0, 0), 0).unwrap();
        assert!(kb.statements().is_empty());
        assert_eq!(report.new_safe, vec![Cell::new(0, 0)]);
        assert!(kb.moves_made().contains(&Cell::new(0, 0)));
    }

    #[test]
    fn subsumption_derives_and_resolves() {
        let mut kb = kb(3, 5);
        kb.add_statement(statement(&[(1, 1), (1, 2)], 1)).unwrap();
        let report = kb.add_statement(statement(&[(1, 1), (1, 2), (1, 3)], 2)).unwrap();

        assert!(kb.is_known_hazard(Cell::new(1, 3)));
        assert_eq!(report.new_hazards, vec![Cell::new(1, 3)]);
        assert!(report.derived_statements >= 1);
        assert!(kb.derivations().iter().any(|r| r.rule == InferenceRule::Subsumption
            && r.conclusion == Conclusion::Statement(statement(&[(1, 3)], 1))));
        assert_eq!(kb.explain(Cell::new(1, 3)).unwrap().rule, InferenceRule::AllHazards);
        assert_invariants(&kb);
    }

    #[test]
    fn subsumption_can_be_disabled() {
        let bounds = GridBounds::new(3, 5).unwrap();
        let config = EngineConfig {
            subsumption: false,
            record_derivations: false,
        };
        let mut kb = KnowledgeBase::with_config(bounds, config);
        kb.add_statement(statement(&[(1, 1), (1, 2)], 1)).unwrap();
        kb.add_statement(statement(&[(1, 1), (1, 2), (1, 3)], 2)).unwrap();
        assert!(!kb.is_known_hazard(Cell::new(1, 3)));
        assert_eq!(kb.statements().len(), 2);
        assert!(kb.derivations().is_empty());
    }

    #[test]
    fn add_statement_normalizes_against_facts() {
        let mut kb = kb(3, 3);
        kb.record_hazard(Cell::new(0, 0)).unwrap();
        kb.record_safe(Cell::new(0, 1)).unwrap();
        kb.add_statement(statement(&[(0, 0), (0, 1), (0, 2), (1, 2)], 1)).unwrap();
        assert!(kb.statements().is_empty());
        assert!(kb.is_known_safe(Cell::new(0, 2)));
        assert!(kb.is_known_safe(Cell::new(1, 2)));

        let err = kb.add_statement(statement(&[(0, 0), (2, 2)], 0)).unwrap_err();
        assert!(matches!(
            err,
            MineError::Inconsistent(InconsistentObservation::TooFewHazards { known_hazards: 1, .. })
        ));
    }

    #[test]
    fn add_statement_rejects_conflicting_duplicate() {
        let mut kb = kb(3, 3);
        kb.add_statement(statement(&[(2, 0), (2, 1)], 1)).unwrap();
        kb.add_statement(statement(&[(2, 1), (2, 0)], 1)).unwrap();
        assert_eq!(kb.statements().len(), 1);

        let err = kb.add_statement(statement(&[(2, 0), (2, 1)], 2)).unwrap_err();
        assert!(matches!(
            err,
            MineError::Inconsistent(InconsistentObservation::ConflictingCounts { .. })
        ));
    }

    #[test]
    fn record_safe_and_hazard_are_idempotent() {
        let mut kb = kb(4, 4);
        kb.add_statement(statement(&[(0, 0), (0, 1), (0, 2)], 1)).unwrap();

        kb.record_safe(Cell::new(0, 0)).unwrap();
        let once = kb.snapshot();
        let report = kb.record_safe(Cell::new(0, 0)).unwrap();
        assert_eq!(kb.snapshot(), once);
        assert!(!report.resolved_any());

        kb.record_hazard(Cell::new(3, 3)).unwrap();
        let once = kb.snapshot();
        kb.record_hazard(Cell::new(3, 3)).unwrap();
        assert_eq!(kb.snapshot(), once);
    }

    #[test]
    fn record_rejects_contradiction() {
        let mut kb = kb(2, 2);
        kb.record_safe(Cell::new(0, 0)).unwrap();
        assert!(kb.record_hazard(Cell::new(0, 0)).unwrap_err().is_inconsistent());
    }

    #[test]
    fn marks_propagate_to_every_statement() {
        let mut kb = kb(3, 3);
        kb.add_statement(statement(&[(0, 0), (0, 1)], 1)).unwrap();
        kb.add_statement(statement(&[(0, 1), (0, 2)], 1)).unwrap();
        kb.record_hazard(Cell::new(0, 1)).unwrap();
        assert!(kb.is_known_safe(Cell::new(0, 0)));
        assert!(kb.is_known_safe(Cell::new(0, 2)));
        assert!(kb.statements().is_empty());
    }

    #[test]
    fn snapshot_serializes() {
        let mut kb = kb(3, 3);
        kb.observe(Cell::new(0, 0), 1).unwrap();
        let json = serde_json::to_string(&kb.snapshot()).unwrap();
        let back: KnowledgeSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kb.snapshot());
        assert_eq!(back.statements.len(), 1);
    }

    #[test]
    fn snapshot_rejects_contradictory_facts() {
        let mut kb = kb(3, 3);
        kb.observe(Cell::new(0, 0), 1).unwrap();
        let mut json = serde_json::to_value(kb.snapshot()).unwrap();
        json["facts"]["hazard_cells"] = serde_json::json!([{ "row": 0, "col": 0 }]);
        assert!(serde_json::from_value::<KnowledgeSnapshot>(json).is_err());
    }
}
