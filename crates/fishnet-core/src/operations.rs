//! End-to-end sampling operations.
//!
//! [`run`] wires the CSV source, the sampler, the deficit resolver, the
//! projector and the `GeoJSON` writer together; [`run_with`] does the same with
//! caller-provided formats.

use std::collections::BTreeMap;
use std::path::Path;

use fishnet_core_common::{CellKey, FeatureSink, Record, RecordSource, TableSink};
use fishnet_csv::{CsvFormat, CsvFormatOptions};
use fishnet_geojson::GeoJsonFormat;
use log::info;

use crate::config::SamplingConfig;
use crate::deficit;
use crate::error::Result;
use crate::export::{assign_ids, export};
use crate::projection::project_and_buffer;
use crate::sampler::sample;
use crate::source::{filter_to_scope, load_accepted, load_records};
use crate::types::{OutputPaths, RunReport};

/// Run the sampling pipeline with CSV input and output tables and `GeoJSON`
/// geometry files.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, an input cannot be read, or
/// an output cannot be written. Cells with too few candidates are not errors;
/// they are listed in [`RunReport::shortfalls`].
pub fn run(config: &SamplingConfig) -> Result<RunReport> {
    let csv = CsvFormat::new(CsvFormatOptions::new().with_delimiter(config.delimiter_byte()?));
    let geojson = GeoJsonFormat::default();
    run_with(config, &csv, &csv, &geojson)
}

/// Run the sampling pipeline with the given formats.
///
/// # Errors
///
/// See [`run`].
pub fn run_with(
    config: &SamplingConfig,
    source: &dyn RecordSource,
    table: &dyn TableSink,
    features: &dyn FeatureSink,
) -> Result<RunReport> {
    config.validate()?;
    let mode = config.mode();
    let seed = config.effective_seed();
    info!("Starting {} sampling (seed {seed})", mode.as_str());

    let loaded = load_records(&config.input, source)?;
    let candidates_loaded = loaded.len();
    let in_scope = filter_to_scope(loaded);
    let candidates_in_scope = in_scope.len();
    info!("{candidates_in_scope} of {candidates_loaded} candidate(s) within latitude scope");

    let (pool, effective_quota, candidates_already_seen) = match &config.accepted {
        Some(accepted_path) => {
            let accepted = load_accepted(accepted_path, source)?;
            let deficit = deficit::resolve(&accepted, in_scope, &config.quota, &config.valid_status);
            (deficit.pool, deficit.residual, deficit.excluded)
        },
        None => (in_scope, config.quota.clone(), 0),
    };

    let outcome = sample(&pool, &effective_quota, seed);
    let rows = assign_ids(outcome.records);
    let footprints = project_and_buffer(&rows, config.half_size);

    let paths = OutputPaths::derive(&config.output, features.file_extension());
    export(&rows, &footprints, &paths, table, features)?;

    info!(
        "Sampling completed: {} row(s) written, {} cell(s) short",
        rows.len(),
        outcome.shortfalls.len()
    );

    Ok(RunReport {
        mode,
        seed,
        candidates_loaded,
        candidates_in_scope,
        candidates_already_seen,
        effective_quota,
        outcomes: outcome.cells,
        shortfalls: outcome.shortfalls,
        rows_written: rows.len(),
        paths,
    })
}

/// Load a candidate file and apply the latitude filter.
///
/// # Errors
///
/// Returns an error if the file is missing or cannot be parsed.
pub fn load_candidates(path: &Path, delimiter: u8) -> Result<Vec<Record>> {
    let csv = CsvFormat::new(CsvFormatOptions::new().with_delimiter(delimiter));
    Ok(filter_to_scope(load_records(path, &csv)?))
}

/// Number of records per cell, sorted by dataset then category.
#[must_use]
pub fn cell_counts(records: &[Record]) -> Vec<(CellKey, usize)> {
    let mut counts: BTreeMap<CellKey, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.cell()).or_default() += 1;
    }
    counts.into_iter().collect()
}
