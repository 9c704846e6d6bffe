//! Size-bounded table serialization

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::model::cell::normalize_decimal_mark;
use crate::model::Table;

use super::sink::{FileSinkFactory, Sink, SinkFactory};
use super::{continuation_path, csv_path};

/// Outcome of a successful write
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Every file written, in order
    pub files: Vec<PathBuf>,
    /// Data lines written, header excluded
    pub lines: usize,
    /// Bytes written across all files
    pub bytes: u64,
}

/// The single open sink and the name it was opened under.
///
/// `rotate` is the only place a sink is released and another one opened.
struct Rotation<'f, F: SinkFactory> {
    factory: &'f mut F,
    base: PathBuf,
    path: PathBuf,
    sink: Option<F::Sink>,
    next_suffix: u32,
    summary: WriteSummary,
}

impl<'f, F: SinkFactory> Rotation<'f, F> {
    fn open(factory: &'f mut F, base: PathBuf) -> Result<Self> {
        let sink = factory.open(&base).map_err(|source| Error::Write {
            path: base.clone(),
            source,
        })?;
        Ok(Self {
            factory,
            path: base.clone(),
            summary: WriteSummary {
                files: vec![base.clone()],
                ..Default::default()
            },
            base,
            sink: Some(sink),
            next_suffix: 2,
        })
    }

    fn write_error(&self, source: io::Error) -> Error {
        Error::Write {
            path: self.path.clone(),
            source,
        }
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        let result = match self.sink.as_mut() {
            Some(sink) => sink.write_all(line.as_bytes()),
            None => Err(io::Error::other("output already released")),
        };
        result.map_err(|e| self.write_error(e))?;
        self.summary.bytes += line.len() as u64;
        Ok(())
    }

    fn exceeds(&self, max_bytes: u64) -> bool {
        self.sink
            .as_ref()
            .is_some_and(|sink| sink.bytes_written() > max_bytes)
    }

    /// Release the current sink, then open the next numbered file
    fn rotate(&mut self) -> Result<()> {
        if let Some(sink) = self.sink.take() {
            sink.finish().map_err(|e| self.write_error(e))?;
        }

        let next = continuation_path(&self.base, self.next_suffix);
        self.next_suffix += 1;
        trace!(from = %self.path.display(), to = %next.display(), "rotating output file");

        let sink = self.factory.open(&next).map_err(|source| Error::Write {
            path: next.clone(),
            source,
        })?;
        self.sink = Some(sink);
        self.summary.files.push(next.clone());
        self.path = next;
        Ok(())
    }

    fn finish(mut self) -> Result<WriteSummary> {
        if let Some(sink) = self.sink.take() {
            sink.finish().map_err(|e| self.write_error(e))?;
        }
        Ok(self.summary)
    }
}

/// Serializes a [`Table`] into one or more size-bounded files
pub struct CsvWriter<F> {
    factory: F,
}

impl Default for CsvWriter<FileSinkFactory> {
    fn default() -> Self {
        Self::new(FileSinkFactory)
    }
}

impl<F: SinkFactory> CsvWriter<F> {
    pub fn new(factory: F) -> Self {
        Self { factory }
    }

    pub fn into_factory(self) -> F {
        self.factory
    }

    /// Write `table` to `path` (with `.csv` appended if missing).
    ///
    /// Line `j` holds position `j` of every stored sequence, so ragged
    /// sequences line up by position and short ones contribute empty cells.
    /// When the table has splitting enabled and a data line leaves the
    /// current file larger than the threshold, the following lines go into
    /// the next numbered file. Output written before a failure stays on disk.
    pub fn write(&mut self, table: &Table, path: &Path, write_header: bool) -> Result<WriteSummary> {
        let policy = table.policy();
        let separator = policy.field_separator().as_char();
        let mut out = Rotation::open(&mut self.factory, csv_path(path))?;

        match table.header() {
            Some(header) if write_header && !header.is_empty() => {
                let mut line = header.join(separator.to_string().as_str());
                line.push('\n');
                out.write_line(&line)?;
            }
            _ => {}
        }

        let width = table.row_count();
        for position in 0..table.longest_row_length() {
            // The threshold is checked after each data line, never after the header.
            if position > 0 && table.split_files() && out.exceeds(table.max_file_bytes()) {
                out.rotate()?;
            }

            let mut line = String::new();
            for row in 0..width {
                if row > 0 {
                    line.push(separator);
                }
                line.push_str(&normalize_decimal_mark(table.cell_or_empty(row, position), policy));
            }
            line.push('\n');
            out.write_line(&line)?;
            out.summary.lines += 1;
        }

        let summary = out.finish()?;
        debug!(
            files = summary.files.len(),
            lines = summary.lines,
            bytes = summary.bytes,
            "saved table"
        );
        Ok(summary)
    }
}

/// Write `table` to files on disk
pub fn save_path(table: &Table, path: &Path, write_header: bool) -> Result<WriteSummary> {
    CsvWriter::new(FileSinkFactory).write(table, path, write_header)
}
