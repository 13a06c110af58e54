//! Subsumption between statements.
//!
//! If statement A's cells are a strict subset of statement B's, then the
//! hazards of B are those of A plus those in `B - A`, so `B - A` holds exactly
//! `B.count - A.count` hazards.

use crate::error::InconsistentObservation;
use crate::statement::Statement;

/// A statement derived from a subset/superset pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subsumption {
    /// Index of the subset statement in the scanned slice.
    pub subset: usize,
    /// Index of the superset statement in the scanned slice.
    pub superset: usize,
    /// `superset - subset`.
    pub derived: Statement,
}

/// Derive every new statement obtainable from one pass over all ordered pairs.
///
/// Derived statements whose cell set is already live, or already derived in
/// this pass, are dropped; if their counts disagree the statements contradict
/// each other.
pub fn derive(statements: &[Statement]) -> Result<Vec<Subsumption>, InconsistentObservation> {
    let mut staged: Vec<Subsumption> = Vec::new();

    for (i, subset) in statements.iter().enumerate() {
        for (j, superset) in statements.iter().enumerate() {
            if i == j || !subset.is_strict_subset_of(superset) {
                continue;
            }

            let derived = superset.subtract(subset)?;
            if let Some(existing) = statements.iter().find(|s| s.cells() == derived.cells()) {
                check_agreement(existing, &derived)?;
                continue;
            }
            if let Some(earlier) = staged.iter().find(|s| s.derived.cells() == derived.cells()) {
                check_agreement(&earlier.derived, &derived)?;
                continue;
            }

            staged.push(Subsumption {
                subset: i,
                superset: j,
                derived,
            });
        }
    }

    Ok(staged)
}

fn check_agreement(
    existing: &Statement,
    incoming: &Statement,
) -> Result<(), InconsistentObservation> {
    if existing.count() == incoming.count() {
        Ok(())
    } else {
        Err(InconsistentObservation::ConflictingCounts {
            existing: existing.to_string(),
            incoming: incoming.to_string(),
        })
    }
}
