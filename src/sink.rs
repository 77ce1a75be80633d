//! Output sinks for trace lines.
//!
//! A sink renders and writes complete trace lines. The emitter decides
//! *when* a line starts and ends and serializes writers; the sink owns
//! *how* the line looks: timestamp rendering, thread identity, and the
//! actual byte output. Every line has the shape
//! `<timestamp> <thread-id> <message>`.

use core::fmt::{self, Write as _};
use parking_lot::Mutex;
use std::io::Write as _;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Renders and writes trace lines.
///
/// Calls arrive strictly in `begin_line`, zero or more `append`, `end_line`
/// order, and only while the caller holds the output lock, so
/// implementations never see interleaved lines and need no internal
/// synchronization.
pub trait TraceSink: Send {
    /// Starts a line: renders the timestamp/thread-id header followed by
    /// the first message fragment.
    fn begin_line(&mut self, args: fmt::Arguments<'_>);

    /// Appends a fragment to the open line.
    fn append(&mut self, args: fmt::Arguments<'_>);

    /// Terminates the open line and flushes it to the underlying output.
    fn end_line(&mut self);
}

static NEXT_THREAD_TAG: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static THREAD_TAG: u64 = NEXT_THREAD_TAG.fetch_add(1, Ordering::Relaxed);
}

/// Returns a small dense integer identifying the calling thread.
///
/// Tags are assigned on first use in thread order, which keeps trace output
/// readable compared to raw OS thread ids. Tags are never reused within a
/// process.
#[must_use]
pub fn thread_tag() -> u64 {
    THREAD_TAG.with(|tag| *tag)
}

/// Writes the standard `<timestamp> <thread-id> ` header.
///
/// The timestamp is seconds since `epoch` with microsecond precision; the
/// thread id is the calling thread's [`thread_tag`].
fn write_header(line: &mut String, epoch: Instant) {
    let elapsed = epoch.elapsed();
    let _ = write!(line, "{:.6} T{} ", elapsed.as_secs_f64(), thread_tag());
}

/// Sink that writes trace lines to standard error.
///
/// Lines are accumulated in a buffer and written with a single `write_all`
/// per line, then flushed. Write failures are swallowed: a diagnostics path
/// must not take down the process it is observing.
#[derive(Debug)]
pub struct StderrSink {
    epoch: Instant,
    line: String,
}

impl StderrSink {
    /// Creates a stderr sink; timestamps count from this moment.
    #[must_use]
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            line: String::new(),
        }
    }
}

impl Default for StderrSink {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceSink for StderrSink {
    fn begin_line(&mut self, args: fmt::Arguments<'_>) {
        self.line.clear();
        write_header(&mut self.line, self.epoch);
        let _ = self.line.write_fmt(args);
    }

    fn append(&mut self, args: fmt::Arguments<'_>) {
        let _ = self.line.write_fmt(args);
    }

    fn end_line(&mut self) {
        self.line.push('\n');
        let stderr = std::io::stderr();
        let mut handle = stderr.lock();
        let _ = handle.write_all(self.line.as_bytes());
        let _ = handle.flush();
        self.line.clear();
    }
}

/// Sink that captures complete lines in memory.
///
/// Cloning shares the captured lines, so a test can keep one handle while
/// the emitter owns another and assert on output after the fact.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
    current: String,
    epoch: Option<Instant>,
}

impl MemorySink {
    /// Creates an empty capture sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the lines captured so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl TraceSink for MemorySink {
    fn begin_line(&mut self, args: fmt::Arguments<'_>) {
        let epoch = *self.epoch.get_or_insert_with(Instant::now);
        self.current.clear();
        write_header(&mut self.current, epoch);
        let _ = self.current.write_fmt(args);
    }

    fn append(&mut self, args: fmt::Arguments<'_>) {
        let _ = self.current.write_fmt(args);
    }

    fn end_line(&mut self) {
        self.lines.lock().push(std::mem::take(&mut self.current));
    }
}
