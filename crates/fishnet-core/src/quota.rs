//! Nested per-dataset, per-category quotas.

use fishnet_core_common::CellKey;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Required record counts keyed by dataset name, then category.
///
/// Declaration order is preserved and drives the order in which cells are
/// sampled, which in turn fixes the row order of the exported files. Cells that
/// are not listed require zero records.
///
/// # Examples
///
/// ```
/// use fishnet_core::quota::Quota;
///
/// let quota = Quota::new()
///     .with_cell("GROD", "Dams", 200)
///     .with_cell("GROD", "Weirs", 100)
///     .with_cell("MRBD", "Locks", 300);
///
/// assert_eq!(quota.get("GROD", "Weirs"), 100);
/// assert_eq!(quota.get("AMBER", "Dams"), 0);
/// assert_eq!(quota.total(), 600);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quota(IndexMap<String, IndexMap<String, usize>>);

impl Quota {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`Quota::set`].
    #[must_use]
    pub fn with_cell(
        mut self,
        dataset: impl Into<String>,
        category: impl Into<String>,
        count: usize,
    ) -> Self {
        self.set(dataset, category, count);
        self
    }

    /// Set the required count for a cell, replacing any previous value.
    pub fn set(&mut self, dataset: impl Into<String>, category: impl Into<String>, count: usize) {
        self.0
            .entry(dataset.into())
            .or_default()
            .insert(category.into(), count);
    }

    /// Required count for a cell; zero when the cell is not listed.
    #[must_use]
    pub fn get(&self, dataset: &str, category: &str) -> usize {
        self.0
            .get(dataset)
            .and_then(|categories| categories.get(category))
            .copied()
            .unwrap_or(0)
    }

    /// Iterate over every listed cell, including those with a zero count.
    pub fn cells(&self) -> impl Iterator<Item = (CellKey, usize)> + '_ {
        self.0.iter().flat_map(|(dataset, categories)| {
            categories
                .iter()
                .map(move |(category, count)| (CellKey::new(dataset, category), *count))
        })
    }

    /// Cells with a positive count, in declaration order.
    pub fn positive_cells(&self) -> impl Iterator<Item = (CellKey, usize)> + '_ {
        self.cells().filter(|(_, count)| *count > 0)
    }

    /// Sum of all cell counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.cells().map(|(_, count)| count).sum()
    }

    /// Returns `true` when no cell requires any record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
