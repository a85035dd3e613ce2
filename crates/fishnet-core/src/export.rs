//! Renumbering and serialization of a sample.

use std::path::{Path, PathBuf};

use fishnet_core_common::{FeatureSink, Footprint, Record, SampledRecord, TableSink};
use log::info;

use crate::error::{IoErrorExt, Result};
use crate::types::OutputPaths;

/// Suffix appended to the table stem for the point-geometry file.
pub const POINTS_SUFFIX: &str = "_points";

/// Suffix appended to the table stem for the footprint-geometry file.
pub const FISHNET_SUFFIX: &str = "_fishnet";

/// Number records `1..=N` in the order given.
#[must_use]
pub fn assign_ids(records: Vec<Record>) -> Vec<SampledRecord> {
    records
        .into_iter()
        .zip(1u64..)
        .map(|(record, id)| SampledRecord { id, record })
        .collect()
}

impl OutputPaths {
    /// Derive the geometry paths from the table path.
    ///
    /// `out/location.csv` with extension `geojson` gives
    /// `out/location_points.geojson` and `out/location_fishnet.geojson`.
    #[must_use]
    pub fn derive(table: &Path, extension: &str) -> Self {
        let stem = table
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let sibling = |suffix: &str| -> PathBuf {
            table.with_file_name(format!("{stem}{suffix}.{extension}"))
        };

        Self {
            table: table.to_path_buf(),
            points: sibling(POINTS_SUFFIX),
            footprints: sibling(FISHNET_SUFFIX),
        }
    }
}

/// Write the table, point and footprint files.
///
/// Files are written in that order; a failure stops the export and leaves the
/// files already written in place.
///
/// # Errors
///
/// Returns [`crate::error::WriteError::Failed`] naming the file and format that
/// could not be written.
pub fn export(
    rows: &[SampledRecord],
    footprints: &[Footprint],
    paths: &OutputPaths,
    table: &dyn TableSink,
    features: &dyn FeatureSink,
) -> Result<()> {
    info!(
        "Writing {} row(s) to {} ({})",
        rows.len(),
        paths.table.display(),
        table.format_name()
    );
    table
        .write_table(&paths.table, rows)
        .with_write_context(table.format_name(), &paths.table)?;

    info!(
        "Writing points to {} ({})",
        paths.points.display(),
        features.format_name()
    );
    features
        .write_points(&paths.points, rows)
        .with_write_context(features.format_name(), &paths.points)?;

    info!(
        "Writing {} footprint(s) to {} ({})",
        footprints.len(),
        paths.footprints.display(),
        features.format_name()
    );
    features
        .write_footprints(&paths.footprints, footprints)
        .with_write_context(features.format_name(), &paths.footprints)?;

    Ok(())
}
