//! Output sinks for encoded bytes.
//!
//! A sink opens a scoped writer for one save. Writers are closed when they
//! go out of scope, on success and on error alike; failures while closing
//! are ignored so they never replace the error that caused the unwind.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

/// Destination for the encoded image.
pub trait OutputSink {
    type Writer: Write;

    /// Open the destination for writing, truncating any previous content.
    fn open_for_write(&self) -> io::Result<Self::Writer>;
}

/// Write `bytes` fully to a freshly opened writer from `sink`.
pub fn write_all_to<S: OutputSink + ?Sized>(sink: &S, bytes: &[u8]) -> io::Result<()> {
    let mut writer = sink.open_for_write()?;
    writer.write_all(bytes)?;
    writer.flush()?;
    debug!(len = bytes.len(), "wrote encoded bytes to sink");
    Ok(())
}

/// Sink writing to a file path.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputSink for FileSink {
    type Writer = File;

    fn open_for_write(&self) -> io::Result<File> {
        File::create(&self.path)
    }
}

/// Sink collecting bytes in shared memory.
///
/// Clones share the same storage, so a caller can keep one handle and pass
/// another to the pipeline.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything written so far.
    pub fn contents(&self) -> Vec<u8> {
        lock(&self.bytes).clone()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.bytes).is_empty()
    }
}

/// Writer handed out by [`MemorySink`].
#[derive(Debug)]
pub struct MemoryWriter {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        lock(&self.bytes).extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl OutputSink for MemorySink {
    type Writer = MemoryWriter;

    fn open_for_write(&self) -> io::Result<MemoryWriter> {
        lock(&self.bytes).clear();
        Ok(MemoryWriter {
            bytes: Arc::clone(&self.bytes),
        })
    }
}

/// A poisoned lock only means another writer panicked mid-write; the bytes
/// are still a plain vector.
fn lock(bytes: &Mutex<Vec<u8>>) -> MutexGuard<'_, Vec<u8>> {
    bytes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
