use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::cell::Cell;
use crate::error::InconsistentObservation;
use crate::statement::Statement;

/// Drop vacuous statements and statements that duplicate an earlier one.
///
/// Marks can shrink two different statements to the same cell set; the later
/// one is dropped when the counts agree. Returns how many were removed. On
/// error the collection is left untouched.
pub fn prune(statements: &mut Vec<Statement>) -> Result<usize, InconsistentObservation> {
    let mut seen: BTreeMap<&BTreeSet<Cell>, &Statement> = BTreeMap::new();
    let mut keep = Vec::with_capacity(statements.len());

    for statement in statements.iter() {
        if statement.is_empty() {
            keep.push(false);
            continue;
        }
        match seen.get(statement.cells()) {
            Some(earlier) if earlier.count() == statement.count() => keep.push(false),
            Some(earlier) => {
                return Err(InconsistentObservation::ConflictingCounts {
                    existing: earlier.to_string(),
                    incoming: statement.to_string(),
                });
            }
            None => {
                seen.insert(statement.cells(), statement);
                keep.push(true);
            }
        }
    }

    let before = statements.len();
    let mut flags = keep.into_iter();
    statements.retain(|_| flags.next().unwrap_or(true));
    Ok(before - statements.len())
}
