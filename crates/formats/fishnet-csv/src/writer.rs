//! CSV writer implementation for converting the sample table to CSV format

use std::io::Write as IoWrite;
use std::sync::Arc;

use arrow_array::{ArrayRef, Float64Array, RecordBatch, StringArray, UInt64Array};
use arrow_csv::WriterBuilder;
use arrow_schema::{ArrowError, DataType, Field, Schema, SchemaRef};
use fishnet_core_common::SampledRecord;

/// Options for CSV writing. The header row is always written.
#[derive(Debug, Clone)]
pub struct CsvWriterOptions {
    /// Column delimiter (default: b',')
    pub delimiter: u8,
}

impl Default for CsvWriterOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvWriterOptions {
    /// Set column delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Arrow schema of the exported sample table: `ID, TID, Type, Lat, Lon, Country, Dataset`.
#[must_use]
pub fn sample_table_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("ID", DataType::UInt64, false),
        Field::new("TID", DataType::Utf8, false),
        Field::new("Type", DataType::Utf8, false),
        Field::new("Lat", DataType::Float64, false),
        Field::new("Lon", DataType::Float64, false),
        Field::new("Country", DataType::Utf8, false),
        Field::new("Dataset", DataType::Utf8, false),
    ]))
}

/// Build a single record batch holding the fixed column projection of `rows`.
///
/// # Errors
///
/// Returns an error if the arrays do not match the schema, which only happens on
/// internal inconsistencies.
pub fn sample_table_batch(rows: &[SampledRecord]) -> Result<RecordBatch, ArrowError> {
    let ids: ArrayRef = Arc::new(UInt64Array::from_iter_values(rows.iter().map(|r| r.id)));
    let tids: ArrayRef = Arc::new(StringArray::from_iter_values(
        rows.iter().map(|r| r.record.tid.as_str()),
    ));
    let types: ArrayRef = Arc::new(StringArray::from_iter_values(
        rows.iter().map(|r| r.record.category.as_str()),
    ));
    let lats: ArrayRef = Arc::new(Float64Array::from_iter_values(
        rows.iter().map(|r| r.record.lat),
    ));
    let lons: ArrayRef = Arc::new(Float64Array::from_iter_values(
        rows.iter().map(|r| r.record.lon),
    ));
    let countries: ArrayRef = Arc::new(StringArray::from_iter_values(
        rows.iter().map(|r| r.record.country.as_str()),
    ));
    let datasets: ArrayRef = Arc::new(StringArray::from_iter_values(
        rows.iter().map(|r| r.record.dataset.as_str()),
    ));

    RecordBatch::try_new(
        sample_table_schema(),
        vec![ids, tids, types, lats, lons, countries, datasets],
    )
}

/// Write record batches to CSV format
///
/// # Errors
///
/// Returns an error if writing to the output fails or if CSV serialization fails
pub fn write_csv<W: IoWrite>(
    writer: &mut W,
    batches: &[RecordBatch],
    options: &CsvWriterOptions,
) -> Result<(), ArrowError> {
    if batches.is_empty() {
        return Ok(());
    }

    let mut csv_writer = WriterBuilder::new()
        .with_delimiter(options.delimiter)
        .with_header(true)
        .build(writer);

    for batch in batches {
        csv_writer.write(batch)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fishnet_core_common::Record;

    fn sampled(id: u64, tid: &str, category: &str, dataset: &str) -> SampledRecord {
        SampledRecord {
            id,
            record: Record {
                tid: tid.to_string(),
                category: category.to_string(),
                lat: 30.5,
                lon: 110.25,
                country: "China".to_string(),
                dataset: dataset.to_string(),
                status: Some("valid".to_string()),
            },
        }
    }

    fn to_string(batches: &[RecordBatch], options: &CsvWriterOptions) -> String {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, batches, options).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn create_test_batch() -> RecordBatch {
        sample_table_batch(&[
            sampled(1, "900", "Dams", "GROD"),
            sampled(2, "17", "Partial Dams", "GROD"),
            sampled(3, "B-4", "Locks", "MRBD"),
        ])
        .unwrap()
    }

    #[test]
    fn test_write_csv_with_header() {
        let batch = create_test_batch();
        let options = CsvWriterOptions::default();

        let csv_str = to_string(&[batch], &options);

        assert!(csv_str.starts_with("ID,TID,Type,Lat,Lon,Country,Dataset\n"));
        assert!(csv_str.contains("1,900,Dams,30.5,110.25,China,GROD"));
        assert!(csv_str.contains("2,17,Partial Dams,30.5,110.25,China,GROD"));
        assert!(csv_str.contains("3,B-4,Locks,30.5,110.25,China,MRBD"));
    }

    #[test]
    fn test_status_is_not_exported() {
        let batch = create_test_batch();
        let csv_str = to_string(&[batch], &CsvWriterOptions::default());

        assert!(!csv_str.contains("valid"));
        assert!(!csv_str.contains("check_results"));
    }

    #[test]
    fn test_write_csv_custom_delimiter() {
        let batch = create_test_batch();
        let options = CsvWriterOptions::default().with_delimiter(b';');

        let csv_str = to_string(&[batch], &options);

        assert!(csv_str.starts_with("ID;TID;Type;Lat;Lon;Country;Dataset\n"));
        assert!(csv_str.contains("1;900;Dams;30.5;110.25;China;GROD"));
    }

    #[test]
    fn test_write_empty_batches() {
        let batches: Vec<RecordBatch> = vec![];
        let options = CsvWriterOptions::default();

        assert!(to_string(&batches, &options).is_empty());
    }

    #[test]
    fn test_empty_sample_still_has_header() {
        let batch = sample_table_batch(&[]).unwrap();
        assert_eq!(batch.num_rows(), 0);

        let csv_str = to_string(&[batch], &CsvWriterOptions::default());
        assert_eq!(csv_str.trim_end(), "ID,TID,Type,Lat,Lon,Country,Dataset");
    }

    #[test]
    fn test_batch_matches_schema() {
        let batch = create_test_batch();
        assert_eq!(batch.schema(), sample_table_schema());
        assert_eq!(batch.num_rows(), 3);
        assert_eq!(batch.num_columns(), 7);
    }
}
