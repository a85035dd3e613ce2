//! CSV file format configuration and the [`RecordSource`]/[`TableSink`] implementation.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use fishnet_core_common::{Record, RecordSource, SampledRecord, TableSink};

use crate::reader::read_records;
use crate::writer::{CsvWriterOptions, sample_table_batch, write_csv};

/// CSV format configuration options
#[derive(Debug, Clone)]
pub struct CsvFormatOptions {
    /// The delimiter character used for reading and writing (default: b',')
    pub delimiter: u8,
    /// Whether rows must carry a `check_results` column (default: false)
    pub require_status: bool,
}

impl Default for CsvFormatOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            require_status: false,
        }
    }
}

impl CsvFormatOptions {
    /// Create new CSV format options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delimiter character
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Require the validation-status column, as reviewed selections must have it
    #[must_use]
    pub fn with_require_status(mut self, require_status: bool) -> Self {
        self.require_status = require_status;
        self
    }
}

/// CSV implementation of the record source and table sink seams.
#[derive(Debug, Clone, Default)]
pub struct CsvFormat {
    options: CsvFormatOptions,
}

impl CsvFormat {
    #[must_use]
    pub fn new(options: CsvFormatOptions) -> Self {
        Self { options }
    }

    fn read_with(&self, path: &Path, options: &CsvFormatOptions) -> Result<Vec<Record>> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let records = read_records(BufReader::new(file), options, &path.display().to_string())?;
        Ok(records)
    }

    fn writer_options(&self) -> CsvWriterOptions {
        CsvWriterOptions::default().with_delimiter(self.options.delimiter)
    }
}

impl RecordSource for CsvFormat {
    fn format_name(&self) -> &'static str {
        "CSV"
    }

    fn read_records(&self, path: &Path) -> Result<Vec<Record>> {
        self.read_with(path, &self.options)
    }

    fn read_accepted(&self, path: &Path) -> Result<Vec<Record>> {
        self.read_with(path, &self.options.clone().with_require_status(true))
    }
}

impl TableSink for CsvFormat {
    fn format_name(&self) -> &'static str {
        "CSV"
    }

    fn write_table(&self, path: &Path, rows: &[SampledRecord]) -> Result<()> {
        let batch = sample_table_batch(rows)?;
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        write_csv(&mut writer, &[batch], &self.writer_options())?;
        writer.flush()?;
        log::debug!("Wrote {} row(s) to {}", rows.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_helpers() {
        let options = CsvFormatOptions::new()
            .with_delimiter(b'\t')
            .with_require_status(true);
        assert_eq!(options.delimiter, b'\t');
        assert!(options.require_status);
        assert!(!CsvFormatOptions::default().require_status);
    }

    #[test]
    fn writer_options_follow_delimiter() {
        let format = CsvFormat::new(CsvFormatOptions::default().with_delimiter(b'|'));
        assert_eq!(format.writer_options().delimiter, b'|');
    }
}
