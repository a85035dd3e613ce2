//! Display utilities for formatting CLI output.
//!
//! This module provides table row structures and formatting functions
//! for presenting sampling results in a human-readable format.

use tabled::{Table, Tabled};

use fishnet_core::types::{CellOutcome, RunReport};
use fishnet_core_common::CellKey;

/// Table row representation for the per-cell outcome of a run.
#[derive(Tabled)]
pub struct CellOutcomeRow {
    #[tabled(rename = "Dataset")]
    pub dataset: String,
    #[tabled(rename = "Type")]
    pub category: String,
    #[tabled(rename = "Requested")]
    pub requested: usize,
    #[tabled(rename = "Available")]
    pub available: usize,
    #[tabled(rename = "Selected")]
    pub selected: usize,
    /// `ok` when the quota was met, `short by N` otherwise.
    #[tabled(rename = "Status")]
    pub status: String,
}

impl From<&CellOutcome> for CellOutcomeRow {
    fn from(outcome: &CellOutcome) -> Self {
        let status = if outcome.is_satisfied() {
            "ok".to_string()
        } else {
            format!("short by {}", outcome.requested - outcome.selected)
        };
        Self {
            dataset: outcome.cell.dataset.clone(),
            category: outcome.cell.category.clone(),
            requested: outcome.requested,
            available: outcome.available,
            selected: outcome.selected,
            status,
        }
    }
}

/// Table row representation for the number of candidates in a cell.
#[derive(Tabled)]
pub struct CellCountRow {
    #[tabled(rename = "Dataset")]
    pub dataset: String,
    #[tabled(rename = "Type")]
    pub category: String,
    #[tabled(rename = "Count")]
    pub count: usize,
}

/// Display a run report: the per-cell table followed by the written files.
pub fn display_run_report(report: &RunReport) {
    println!(
        "\nSampling mode: {} (seed {})",
        report.mode.as_str(),
        report.seed
    );
    println!(
        "Candidates: {} loaded, {} within latitude scope",
        report.candidates_loaded, report.candidates_in_scope
    );
    if report.candidates_already_seen > 0 {
        println!(
            "Already reviewed: {} candidate(s) excluded",
            report.candidates_already_seen
        );
    }

    if report.outcomes.is_empty() {
        println!("\nNothing to sample: every cell of the quota is already satisfied.");
    } else {
        println!("\n=== Cells ===");
        let rows: Vec<CellOutcomeRow> = report.outcomes.iter().map(CellOutcomeRow::from).collect();
        println!("{}", Table::new(rows));
    }

    println!("\n=== Outputs ({} row(s)) ===", report.rows_written);
    println!("Table:      {}", report.paths.table.display());
    println!("Points:     {}", report.paths.points.display());
    println!("Footprints: {}", report.paths.footprints.display());
}

/// Display candidate counts per cell with a total line.
pub fn display_cell_counts(counts: &[(CellKey, usize)]) {
    let total: usize = counts.iter().map(|(_, count)| count).sum();
    println!("\nCandidates per cell ({total} total):\n");

    let rows: Vec<CellCountRow> = counts
        .iter()
        .map(|(cell, count)| CellCountRow {
            dataset: cell.dataset.clone(),
            category: cell.category.clone(),
            count: *count,
        })
        .collect();
    println!("{}", Table::new(rows));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_row_satisfied() {
        let row = CellOutcomeRow::from(&CellOutcome {
            cell: CellKey::new("GROD", "Dams"),
            requested: 3,
            available: 10,
            selected: 3,
        });
        assert_eq!(row.dataset, "GROD");
        assert_eq!(row.category, "Dams");
        assert_eq!(row.status, "ok");
    }

    #[test]
    fn test_outcome_row_short() {
        let row = CellOutcomeRow::from(&CellOutcome {
            cell: CellKey::new("MRBD", "Locks"),
            requested: 300,
            available: 120,
            selected: 120,
        });
        assert_eq!(row.status, "short by 180");
    }

    #[test]
    fn test_count_table_headers() {
        let table = Table::new(vec![CellCountRow {
            dataset: "AMBER".to_string(),
            category: "Weirs".to_string(),
            count: 12,
        }])
        .to_string();
        assert!(table.contains("Dataset"));
        assert!(table.contains("Count"));
        assert!(table.contains("AMBER"));
    }
}
