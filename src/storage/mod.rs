//! Output persistence
//!
//! Records are written to a single CSV file per run.

pub mod sink;

pub use sink::{CsvSink, HEADER};
