//! Quota-based stratified random sampling.
//!
//! Each (dataset, category) cell with a positive quota is sampled independently,
//! without replacement, from the candidates that match it exactly. Every cell
//! gets its own ChaCha8 generator seeded with the run seed, so a cell's draw only
//! depends on its own candidates and the seed, not on which other cells exist.

use std::collections::HashMap;

use fishnet_core_common::Record;
use log::{debug, warn};
use rand::SeedableRng;
use rand::seq::index;
use rand_chacha::ChaCha8Rng;

use crate::quota::Quota;
use crate::types::{CellOutcome, Shortfall};

/// Records drawn by [`sample`], with per-cell bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct SampleOutcome {
    /// Selected records, grouped by cell in quota order, then in draw order.
    pub records: Vec<Record>,
    /// One entry per cell with a positive quota.
    pub cells: Vec<CellOutcome>,
    /// Cells that had fewer candidates than requested.
    pub shortfalls: Vec<Shortfall>,
}

/// Draw up to `quota[cell]` records per cell from `pool`.
///
/// Records whose category or dataset does not appear in the quota are never
/// selected. A cell with fewer candidates than requested takes all of them and
/// is reported as a [`Shortfall`].
///
/// # Examples
///
/// ```
/// use fishnet_core::quota::Quota;
/// use fishnet_core::sampler::sample;
/// use fishnet_core_common::Record;
///
/// let pool: Vec<Record> = (0..5)
///     .map(|i| Record {
///         tid: i.to_string(),
///         category: "Dams".to_string(),
///         lat: 30.0,
///         lon: 110.0,
///         country: "China".to_string(),
///         dataset: "GROD".to_string(),
///         status: None,
///     })
///     .collect();
///
/// let outcome = sample(&pool, &Quota::new().with_cell("GROD", "Dams", 3), 1);
/// assert_eq!(outcome.records.len(), 3);
/// assert!(outcome.shortfalls.is_empty());
/// ```
#[must_use]
pub fn sample(pool: &[Record], quota: &Quota, seed: u64) -> SampleOutcome {
    let mut by_cell: HashMap<(&str, &str), Vec<&Record>> = HashMap::new();
    for record in pool {
        by_cell
            .entry((record.dataset.as_str(), record.category.as_str()))
            .or_default()
            .push(record);
    }

    let mut draws: Vec<Vec<&Record>> = Vec::new();
    let mut outcome = SampleOutcome::default();

    for (cell, target) in quota.positive_cells() {
        let candidates = by_cell
            .get(&(cell.dataset.as_str(), cell.category.as_str()))
            .map_or(&[][..], Vec::as_slice);
        let available = candidates.len();

        if available < target {
            let shortfall = Shortfall {
                cell: cell.clone(),
                requested: target,
                available,
            };
            warn!("{shortfall}");
            outcome.shortfalls.push(shortfall);
        }

        let take = target.min(available);
        let drawn = draw(candidates, take, seed);
        debug!("Cell {cell}: requested {target}, available {available}, selected {take}");

        outcome.cells.push(CellOutcome {
            cell,
            requested: target,
            available,
            selected: drawn.len(),
        });
        draws.push(drawn);
    }

    outcome.records = draws.into_iter().flatten().cloned().collect();
    outcome
}

/// Pick `amount` distinct candidates uniformly at random.
fn draw<'a>(candidates: &[&'a Record], amount: usize, seed: u64) -> Vec<&'a Record> {
    if amount == 0 {
        return Vec::new();
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    index::sample(&mut rng, candidates.len(), amount)
        .into_iter()
        .map(|i| candidates[i])
        .collect()
}
