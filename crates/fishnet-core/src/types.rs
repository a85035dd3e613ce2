//! Report types produced by the sampling pipeline.

use std::fmt;
use std::path::PathBuf;

use fishnet_core_common::CellKey;

use crate::config::SamplingMode;
use crate::quota::Quota;

/// A cell whose quota could not be met from the available candidates.
///
/// Shortfalls are warnings: the cell is filled with whatever is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortfall {
    pub cell: CellKey,
    pub requested: usize,
    pub available: usize,
}

impl Shortfall {
    /// Number of records the cell is missing.
    #[must_use]
    pub fn missing(&self) -> usize {
        self.requested.saturating_sub(self.available)
    }
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "There are not enough {} in {}: requested {}, available {}",
            self.cell.category, self.cell.dataset, self.requested, self.available
        )
    }
}

/// Result of sampling a single cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellOutcome {
    pub cell: CellKey,
    pub requested: usize,
    pub available: usize,
    pub selected: usize,
}

impl CellOutcome {
    /// Returns `true` if the cell got everything it asked for.
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.selected >= self.requested
    }
}

/// Paths of the three files written by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Tabular export (`ID, TID, Type, Lat, Lon, Country, Dataset`).
    pub table: PathBuf,
    /// Geographic point features.
    pub points: PathBuf,
    /// Projected footprint polygons.
    pub footprints: PathBuf,
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub mode: SamplingMode,
    pub seed: u64,
    /// Rows read from the candidate table.
    pub candidates_loaded: usize,
    /// Candidates left after the latitude filter.
    pub candidates_in_scope: usize,
    /// Candidates dropped because the accepted selection already contains them.
    pub candidates_already_seen: usize,
    /// Quota actually sampled; the residual quota in gap-fill mode.
    pub effective_quota: Quota,
    pub outcomes: Vec<CellOutcome>,
    pub shortfalls: Vec<Shortfall>,
    /// Rows written to every output.
    pub rows_written: usize,
    pub paths: OutputPaths,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortfall_display_and_missing() {
        let shortfall = Shortfall {
            cell: CellKey::new("MRBD", "Locks"),
            requested: 300,
            available: 120,
        };
        assert_eq!(shortfall.missing(), 180);
        assert_eq!(
            shortfall.to_string(),
            "There are not enough Locks in MRBD: requested 300, available 120"
        );
    }

    #[test]
    fn outcome_satisfaction() {
        let outcome = CellOutcome {
            cell: CellKey::new("GROD", "Dams"),
            requested: 3,
            available: 2,
            selected: 2,
        };
        assert!(!outcome.is_satisfied());
        assert!(
            CellOutcome {
                selected: 3,
                available: 5,
                ..outcome
            }
            .is_satisfied()
        );
    }
}
