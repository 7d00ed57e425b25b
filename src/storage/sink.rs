//! CSV output sink
//!
//! Every field is quoted and rows end in CRLF. The header is written once,
//! when the sink is created.

use csv::{QuoteStyle, Terminator, Writer, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::models::NormalizedRecord;
use crate::utils::error::StorageError;

/// Column names, in record field order
pub const HEADER: [&str; 12] = [
    "Post ID",
    "Post Link",
    "Text",
    "Date & Time",
    "Author ID",
    "Likes",
    "Comments",
    "Reposts",
    "Hashtags",
    "Content Type",
    "Text Length",
    "Time of Day",
];

/// Append-only CSV writer for normalized records
pub struct CsvSink<W: Write> {
    writer: Writer<W>,
    rows: usize,
}

impl CsvSink<File> {
    /// Create (or truncate) the file at `path` and write the header row
    pub fn create(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        Self::from_writer(file)
    }
}

impl<W: Write> CsvSink<W> {
    /// Wrap an arbitrary writer and write the header row
    pub fn from_writer(inner: W) -> Result<Self, StorageError> {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::CRLF)
            .from_writer(inner);

        writer.write_record(HEADER)?;

        Ok(Self { writer, rows: 0 })
    }

    /// Append one record
    pub fn write(&mut self, record: &NormalizedRecord) -> Result<(), StorageError> {
        self.writer.serialize(record)?;
        self.rows += 1;
        Ok(())
    }

    /// Append records in order, returning how many were written
    pub fn write_all<'a, I>(&mut self, records: I) -> Result<usize, StorageError>
    where
        I: IntoIterator<Item = &'a NormalizedRecord>,
    {
        let mut written = 0;
        for record in records {
            self.write(record)?;
            written += 1;
        }
        Ok(written)
    }

    /// Flush buffered rows to the underlying writer
    pub fn flush(&mut self) -> Result<(), StorageError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Data rows written so far (header excluded)
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and return the underlying writer
    pub fn into_inner(self) -> Result<W, StorageError> {
        self.writer
            .into_inner()
            .map_err(|e| StorageError::Io(e.into_error()))
    }
}
