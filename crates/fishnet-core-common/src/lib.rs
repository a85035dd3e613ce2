//! Common types and traits shared across `fishnet` crates.
//!
//! This crate provides the record model and the I/O seams that are shared between
//! `fishnet-core` and the format implementation crates, preventing circular dependencies.

pub mod io;
pub mod record;

// Re-export commonly used types
pub use io::{FeatureSink, RecordSource, TableSink};
pub use record::{CellKey, Footprint, Record, SampledRecord};
