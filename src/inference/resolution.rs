use std::collections::BTreeMap;

use crate::cell::Cell;
use crate::error::InconsistentObservation;
use crate::facts::FactStore;
use crate::statement::Statement;

/// Cells a scan proved safe or hazardous, each with the statement that proved it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Newly proven safe cells.
    pub safe: BTreeMap<Cell, Statement>,
    /// Newly proven hazards.
    pub hazards: BTreeMap<Cell, Statement>,
}

impl Resolution {
    /// Returns true if the scan proved nothing new.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.safe.is_empty() && self.hazards.is_empty()
    }
}

/// Direct resolution over every live statement.
///
/// A statement with count 0 proves all its cells safe; one whose count equals
/// its size proves all its cells hazardous. Cells the fact store already knows
/// are skipped. The first statement to prove a cell is kept as its premise.
pub fn scan(
    statements: &[Statement],
    facts: &FactStore,
) -> Result<Resolution, InconsistentObservation> {
    let mut resolution = Resolution::default();

    for statement in statements {
        for cell in statement.known_safe() {
            if !facts.is_safe(cell) {
                resolution.safe.entry(cell).or_insert_with(|| statement.clone());
            }
        }
        for cell in statement.known_hazards() {
            if !facts.is_hazard(cell) {
                resolution.hazards.entry(cell).or_insert_with(|| statement.clone());
            }
        }
    }

    if let Some(cell) = resolution.safe.keys().find(|c| resolution.hazards.contains_key(*c)) {
        return Err(InconsistentObservation::SafeAndHazard { cell: *cell });
    }

    Ok(resolution)
}
