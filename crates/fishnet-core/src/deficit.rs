//! Gap-filling against a previously reviewed selection.
//!
//! After a selection has been exported and its imagery reviewed, each accepted
//! record carries a `check_results` status. Only records with the configured
//! valid status count towards the quota; the remaining demand is drawn from
//! candidates that were not part of the reviewed selection.

use std::collections::HashSet;

use fishnet_core_common::Record;
use log::{debug, info};

use crate::quota::Quota;

/// Remaining demand and the candidates it may be drawn from.
#[derive(Debug, Clone, Default)]
pub struct Deficit {
    /// Per-cell count still missing, covering every cell of the original quota.
    pub residual: Quota,
    /// Candidates whose TID does not appear in the accepted selection.
    pub pool: Vec<Record>,
    /// Accepted records carrying the valid status.
    pub validated: usize,
    /// Candidates removed because the accepted selection already contains them.
    pub excluded: usize,
}

/// Compute what a reviewed selection is still missing.
///
/// For every cell in `quota`, the residual is the quota minus the number of
/// accepted records in that cell whose status equals `valid_status`, floored at
/// zero. Any accepted record, valid or not, removes its TID from the pool so the
/// same barrier is never proposed twice.
#[must_use]
pub fn resolve(
    accepted: &[Record],
    full_pool: Vec<Record>,
    quota: &Quota,
    valid_status: &str,
) -> Deficit {
    let valid: Vec<&Record> = accepted
        .iter()
        .filter(|record| record.status.as_deref() == Some(valid_status))
        .collect();

    let mut residual = Quota::new();
    for (cell, target) in quota.cells() {
        let have = valid
            .iter()
            .filter(|record| record.in_cell(&cell.dataset, &cell.category))
            .count();
        let missing = target.saturating_sub(have);
        debug!("Cell {cell}: quota {target}, validated {have}, missing {missing}");
        residual.set(cell.dataset, cell.category, missing);
    }

    let seen: HashSet<&str> = accepted.iter().map(|record| record.tid.as_str()).collect();
    let before = full_pool.len();
    let pool: Vec<Record> = full_pool
        .into_iter()
        .filter(|record| !seen.contains(record.tid.as_str()))
        .collect();
    let excluded = before - pool.len();

    info!(
        "{} of {} accepted records are valid; {} still missing; {} candidates already reviewed",
        valid.len(),
        accepted.len(),
        residual.total(),
        excluded
    );

    Deficit {
        residual,
        pool,
        validated: valid.len(),
        excluded,
    }
}
