//! Record model for barrier candidates and the artifacts derived from them.

use std::fmt;

use geo_types::Polygon;
use serde::{Deserialize, Serialize};

/// One candidate barrier observation as loaded from a tabular source.
///
/// Column names follow the source spreadsheets (`TID`, `Type`, `Lat`, `Lon`,
/// `Country`, `Dataset`, and `check_results` for reviewed selections).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier of the barrier, kept verbatim.
    #[serde(rename = "TID")]
    pub tid: String,
    /// Barrier category, e.g. `Dams` or `Partial Dams`.
    #[serde(rename = "Type")]
    pub category: String,
    /// Latitude in decimal degrees (EPSG:4326).
    #[serde(rename = "Lat")]
    pub lat: f64,
    /// Longitude in decimal degrees (EPSG:4326).
    #[serde(rename = "Lon")]
    pub lon: f64,
    /// Country the barrier is located in.
    #[serde(rename = "Country")]
    pub country: String,
    /// Name of the source dataset (`GROD`, `MRBD`, `AMBER`, ...).
    #[serde(rename = "Dataset")]
    pub dataset: String,
    /// Image review outcome, only present on previously exported selections.
    #[serde(rename = "check_results", default, skip_serializing)]
    pub status: Option<String>,
}

impl Record {
    /// The (dataset, category) cell this record belongs to.
    #[must_use]
    pub fn cell(&self) -> CellKey {
        CellKey::new(self.dataset.clone(), self.category.clone())
    }

    /// Returns `true` if the record belongs to the given dataset and category.
    ///
    /// Matching is exact and case-sensitive.
    #[must_use]
    pub fn in_cell(&self, dataset: &str, category: &str) -> bool {
        self.dataset == dataset && self.category == category
    }
}

/// A (dataset, category) pair, the unit of quota and sampling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    /// Source dataset name.
    pub dataset: String,
    /// Barrier category.
    pub category: String,
}

impl CellKey {
    #[must_use]
    pub fn new(dataset: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
            category: category.into(),
        }
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.dataset, self.category)
    }
}

/// A selected record together with its output row identifier.
///
/// The `id` is assigned sequentially from 1 at export time and is unrelated to
/// the record's `TID`.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledRecord {
    pub id: u64,
    pub record: Record,
}

/// Square polygon around a projected sample point, keyed by the output row ID.
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    pub id: u64,
    /// Polygon in EPSG:3857 metres.
    pub polygon: Polygon<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(dataset: &str, category: &str) -> Record {
        Record {
            tid: "7".to_string(),
            category: category.to_string(),
            lat: 30.0,
            lon: 110.0,
            country: "China".to_string(),
            dataset: dataset.to_string(),
            status: None,
        }
    }

    #[test]
    fn cell_matching_is_exact() {
        let r = record("GROD", "Dams");
        assert!(r.in_cell("GROD", "Dams"));
        assert!(!r.in_cell("GROD", "dams"));
        assert!(!r.in_cell("grod", "Dams"));
        assert!(!r.in_cell("GROD", "Partial Dams"));
    }

    #[test]
    fn cell_key_display() {
        assert_eq!(record("MRBD", "Locks").cell().to_string(), "MRBD/Locks");
    }

    #[test]
    fn cell_keys_order_by_dataset_then_category() {
        let mut keys = vec![
            CellKey::new("MRBD", "Dams"),
            CellKey::new("GROD", "Weirs"),
            CellKey::new("GROD", "Dams"),
        ];
        keys.sort();
        assert_eq!(keys[0], CellKey::new("GROD", "Dams"));
        assert_eq!(keys[1], CellKey::new("GROD", "Weirs"));
        assert_eq!(keys[2], CellKey::new("MRBD", "Dams"));
    }
}
