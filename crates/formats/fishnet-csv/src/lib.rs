//! CSV support for `fishnet`: reading barrier candidate tables and writing the
//! renumbered sample table through Arrow's CSV writer.

pub mod file_format;
pub mod reader;
pub mod writer;

pub use file_format::{CsvFormat, CsvFormatOptions};
pub use reader::{REQUIRED_COLUMNS, STATUS_COLUMN, read_records};
pub use writer::{CsvWriterOptions, sample_table_batch, sample_table_schema, write_csv};
