//! CSV record reader for barrier candidate tables.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};
use fishnet_core_common::Record;
use fishnet_shared::{FormatReadError, FormatResult, SourcePosition};

use crate::file_format::CsvFormatOptions;

/// Columns every candidate table must provide.
pub const REQUIRED_COLUMNS: [&str; 6] = ["TID", "Type", "Lat", "Lon", "Country", "Dataset"];

/// Validation-status column of a reviewed selection.
pub const STATUS_COLUMN: &str = "check_results";

/// Read every row of a CSV stream as a [`Record`].
///
/// The header row is checked for [`REQUIRED_COLUMNS`], plus [`STATUS_COLUMN`]
/// when [`CsvFormatOptions::require_status`] is set, before any row is parsed;
/// other columns are ignored. `context` names the source in error messages.
///
/// # Errors
///
/// Returns [`FormatReadError::MissingColumn`] when a required column is absent,
/// [`FormatReadError::Parse`] when a row cannot be decoded (e.g. a non-numeric
/// latitude) or holds a non-finite coordinate, and [`FormatReadError::Io`] when
/// the underlying reader fails.
pub fn read_records<R: Read>(
    input: R,
    options: &CsvFormatOptions,
    context: &str,
) -> FormatResult<Vec<Record>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|err| convert_csv_error(err, None, context))?
        .clone();

    let status = options.require_status.then_some(STATUS_COLUMN);
    for column in REQUIRED_COLUMNS.into_iter().chain(status) {
        if !headers.iter().any(|h| h == column) {
            return Err(FormatReadError::MissingColumn {
                column: column.to_string(),
                context: Some(context.to_string()),
            });
        }
    }

    let mut records = Vec::new();
    let mut row = StringRecord::new();
    while reader
        .read_record(&mut row)
        .map_err(|err| convert_csv_error(err, Some(&headers), context))?
    {
        let record: Record = row
            .deserialize(Some(&headers))
            .map_err(|err| convert_csv_error(err, Some(&headers), context))?;
        check_coordinates(&record, &row, context)?;
        records.push(record);
    }

    log::debug!("Parsed {} record(s) from {context}", records.len());
    Ok(records)
}

/// Reject `NaN` and infinite coordinates, which parse as valid floats.
fn check_coordinates(record: &Record, row: &StringRecord, context: &str) -> FormatResult<()> {
    let invalid = [("Lat", record.lat), ("Lon", record.lon)]
        .into_iter()
        .find(|(_, value)| !value.is_finite());
    let Some((field, value)) = invalid else {
        return Ok(());
    };

    let position = row.position().map(|pos| SourcePosition {
        line: Some(pos.line()),
        byte_offset: Some(pos.byte()),
        record: Some(pos.record()),
        field: Some(field.to_string()),
    });
    Err(FormatReadError::Parse {
        message: format!("coordinate is not a finite number: {value}"),
        position,
        context: Some(context.to_string()),
    })
}

fn convert_csv_error(
    err: csv::Error,
    headers: Option<&StringRecord>,
    context: &str,
) -> FormatReadError {
    let mut position = err.position().map(|pos| SourcePosition {
        line: Some(pos.line()),
        byte_offset: Some(pos.byte()),
        record: Some(pos.record()),
        field: None,
    });

    let message = match err.kind() {
        csv::ErrorKind::Deserialize { err: de, .. } => {
            if let (Some(pos), Some(index)) = (position.as_mut(), de.field()) {
                pos.field = usize::try_from(index)
                    .ok()
                    .and_then(|i| headers.and_then(|h| h.get(i)))
                    .map(str::to_string);
            }
            de.kind().to_string()
        },
        _ => err.to_string(),
    };

    match err.into_kind() {
        csv::ErrorKind::Io(source) => FormatReadError::Io {
            source,
            context: Some(context.to_string()),
        },
        _ => FormatReadError::Parse {
            message,
            position,
            context: Some(context.to_string()),
        },
    }
}
