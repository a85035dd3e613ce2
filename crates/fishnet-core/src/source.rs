//! Loading candidate and accepted records.

use std::path::Path;

use fishnet_core_common::{Record, RecordSource};
use log::{debug, info};

use crate::error::{IoErrorExt, Result, SourceError};

/// Northernmost latitude, in degrees, of a candidate eligible for sampling.
pub const MAX_LATITUDE: f64 = 52.0;

/// Returns `true` if the record lies at or south of [`MAX_LATITUDE`].
///
/// Records with a `NaN` or infinite coordinate are out of scope.
#[must_use]
pub fn within_scope(record: &Record) -> bool {
    record.lat.is_finite() && record.lon.is_finite() && record.lat <= MAX_LATITUDE
}

/// Drop candidates north of [`MAX_LATITUDE`], keeping file order.
#[must_use]
pub fn filter_to_scope(records: Vec<Record>) -> Vec<Record> {
    let before = records.len();
    let kept: Vec<Record> = records.into_iter().filter(within_scope).collect();
    debug!(
        "Latitude filter kept {} of {} candidates",
        kept.len(),
        before
    );
    kept
}

/// Read every record of the table at `path`.
///
/// # Errors
///
/// Returns [`SourceError::NotFound`] if `path` does not exist and
/// [`SourceError::Unreadable`] if the source cannot parse it.
pub fn load_records(path: &Path, source: &dyn RecordSource) -> Result<Vec<Record>> {
    load(path, source, |path| source.read_records(path))
}

/// Read a reviewed selection, which must carry the validation-status column.
///
/// # Errors
///
/// As [`load_records`]; a missing `check_results` column is
/// [`SourceError::Unreadable`].
pub fn load_accepted(path: &Path, source: &dyn RecordSource) -> Result<Vec<Record>> {
    load(path, source, |path| source.read_accepted(path))
}

fn load(
    path: &Path,
    source: &dyn RecordSource,
    read: impl FnOnce(&Path) -> anyhow::Result<Vec<Record>>,
) -> Result<Vec<Record>> {
    if !path.exists() {
        return Err(SourceError::NotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    let records = read(path).with_read_context(source.format_name(), path)?;
    info!(
        "Loaded {} record(s) from {} ({})",
        records.len(),
        path.display(),
        source.format_name()
    );
    Ok(records)
}
