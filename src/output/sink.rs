//! Byte sinks the writer serializes into

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Destination for serialized lines that tracks its own size
pub trait Sink: Write {
    /// Total bytes accepted so far
    fn bytes_written(&self) -> u64;

    /// Flush and release the destination
    fn finish(self) -> io::Result<()>
    where
        Self: Sized;
}

/// Opens sinks by path; the writer opens them one at a time
pub trait SinkFactory {
    type Sink: Sink;

    fn open(&mut self, path: &Path) -> io::Result<Self::Sink>;
}

/// Buffered file with a byte counter
pub struct FileSink {
    inner: BufWriter<File>,
    written: u64,
}

impl FileSink {
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            inner: BufWriter::new(file),
            written: 0,
        })
    }
}

impl Write for FileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl Sink for FileSink {
    fn bytes_written(&self) -> u64 {
        self.written
    }

    fn finish(self) -> io::Result<()> {
        let file = self.inner.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()
    }
}

/// Creates (or truncates) files on the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSinkFactory;

impl SinkFactory for FileSinkFactory {
    type Sink = FileSink;

    fn open(&mut self, path: &Path) -> io::Result<FileSink> {
        FileSink::create(path)
    }
}
