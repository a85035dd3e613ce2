//! I/O traits for reading candidate records and writing sampling outputs.
//!
//! This module defines the seams that format implementations must provide so that
//! `fishnet-core` can stay independent of any particular file format.

use anyhow::Result;
use std::path::Path;

use crate::record::{Footprint, Record, SampledRecord};

/// Trait for loading barrier records from a tabular source.
pub trait RecordSource {
    /// Short name of the format, used in error messages (e.g. `"CSV"`).
    fn format_name(&self) -> &'static str;

    /// Reads every row of the source at `path` as a [`Record`].
    ///
    /// Rows are returned in file order with their values untouched.
    fn read_records(&self, path: &Path) -> Result<Vec<Record>>;

    /// Reads a reviewed selection at `path`.
    ///
    /// Unlike [`RecordSource::read_records`], the source must fail when the
    /// validation-status column (`check_results`) is absent.
    fn read_accepted(&self, path: &Path) -> Result<Vec<Record>>;
}

/// Trait for writing the renumbered sample as a flat table.
pub trait TableSink {
    /// Short name of the format, used in error messages.
    fn format_name(&self) -> &'static str;

    /// Writes the `[ID, TID, Type, Lat, Lon, Country, Dataset]` projection of `rows`.
    fn write_table(&self, path: &Path, rows: &[SampledRecord]) -> Result<()>;
}

/// Trait for writing point and polygon geometry files.
pub trait FeatureSink {
    /// Short name of the format, used in error messages.
    fn format_name(&self) -> &'static str;

    /// File extension (without the dot) used for derived geometry paths.
    fn file_extension(&self) -> &'static str;

    /// Writes one geographic point feature per row, carrying the table columns.
    fn write_points(&self, path: &Path, rows: &[SampledRecord]) -> Result<()>;

    /// Writes one projected polygon feature per footprint, carrying only its `ID`.
    fn write_footprints(&self, path: &Path, footprints: &[Footprint]) -> Result<()>;
}
