//! Trace emission protocols.
//!
//! The emitter owns the output lock that serializes trace lines. Two
//! protocols are built on it:
//!
//! - [`TraceEmitter::emit`]: gate, then produce one complete line under the
//!   lock. The common case.
//! - [`TraceEmitter::begin_message`]: acquire the lock and return a
//!   [`MessageGuard`] so one logical line can be composed from fragments
//!   produced by different call sites, without another thread's output
//!   landing in between.
//!
//! Globally the output cycles `Idle -> Composing -> Idle`; only one thread
//! occupies `Composing` at a time, and `emit` performs the full cycle
//! internally. Lock acquisition is unconditional and uninterruptible: this
//! is a low-level diagnostic path with no timeout or cancellation
//! semantics.
//!
//! With the `debug-tracing` feature disabled, the same API compiles to
//! empty inline no-ops and the sink is never constructed into a lock; call
//! sites are written once and cost nothing in disabled builds.

use crate::class::TraceClassSet;
use crate::registry::ClassRegistry;
use crate::sink::TraceSink;
use core::fmt;
use std::sync::Arc;

#[cfg(feature = "debug-tracing")]
use parking_lot::{Mutex, MutexGuard};
#[cfg(not(feature = "debug-tracing"))]
use core::marker::PhantomData;

/// Emits class-gated trace lines through a serialized sink.
///
/// The registry decides *whether* to emit; the sink decides *how* a line is
/// rendered; the emitter's lock guarantees lines never interleave.
#[cfg(feature = "debug-tracing")]
pub struct TraceEmitter<S: TraceSink> {
    registry: Arc<ClassRegistry>,
    sink: Mutex<S>,
}

#[cfg(feature = "debug-tracing")]
impl<S: TraceSink> TraceEmitter<S> {
    /// Creates an emitter over the given registry and sink.
    #[must_use]
    pub fn new(registry: Arc<ClassRegistry>, sink: S) -> Self {
        Self {
            registry,
            sink: Mutex::new(sink),
        }
    }

    /// Returns the registry this emitter gates against.
    #[must_use]
    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    /// Returns true if any class in `mask` is enabled.
    ///
    /// Never blocks; see [`ClassRegistry::enabled`].
    #[inline]
    #[must_use]
    pub fn enabled(&self, mask: TraceClassSet) -> bool {
        self.registry.enabled(mask)
    }

    /// Emits one complete trace line if any class in `mask` is enabled.
    ///
    /// When the gate says no this returns immediately and the sink is never
    /// invoked. Otherwise the line (header plus rendered message) reaches
    /// the sink atomically with respect to every other emission. May block
    /// while another thread holds the output lock.
    pub fn emit(&self, mask: TraceClassSet, args: fmt::Arguments<'_>) {
        if !self.enabled(mask) {
            return;
        }
        let mut sink = self.sink.lock();
        sink.begin_line(args);
        sink.end_line();
    }

    /// Opens a composition window: acquires the output lock, writes the
    /// header and first fragment, and returns the guard that owns the
    /// window.
    ///
    /// No class check is performed; callers gate first (the [`trace_message!`]
    /// macro does). Every other `emit` and `begin_message` blocks until the
    /// returned guard is dropped.
    ///
    /// Opening a second window on the same thread before dropping the first
    /// guard deadlocks: that is a caller bug, not a recoverable condition.
    ///
    /// [`trace_message!`]: crate::trace_message
    pub fn begin_message(&self, args: fmt::Arguments<'_>) -> MessageGuard<'_, S> {
        let mut sink = self.sink.lock();
        sink.begin_line(args);
        MessageGuard { sink }
    }
}

#[cfg(feature = "debug-tracing")]
impl<S: TraceSink> fmt::Debug for TraceEmitter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceEmitter")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// An open composition window.
///
/// Holds the output lock. Dropping the guard terminates the line, flushes
/// the sink, and releases the lock on every exit path, including unwinding,
/// so an early return or panic between fragments cannot wedge trace output
/// for the rest of the process.
#[cfg(feature = "debug-tracing")]
#[must_use = "the message stays open and the output lock stays held until the guard drops"]
pub struct MessageGuard<'a, S: TraceSink> {
    sink: MutexGuard<'a, S>,
}

#[cfg(feature = "debug-tracing")]
impl<S: TraceSink> MessageGuard<'_, S> {
    /// Appends a fragment to the open line.
    pub fn append(&mut self, args: fmt::Arguments<'_>) {
        self.sink.append(args);
    }

    /// Completes the message: terminates the line and releases the lock.
    ///
    /// Equivalent to dropping the guard; spelled out for call sites where
    /// the end of the message should be visible.
    pub fn finish(self) {}
}

#[cfg(feature = "debug-tracing")]
impl<S: TraceSink> Drop for MessageGuard<'_, S> {
    fn drop(&mut self) {
        self.sink.end_line();
    }
}

/// Emits class-gated trace lines through a serialized sink.
///
/// Disabled build: every entry point is an empty inline no-op and the gate
/// is constant `false`.
#[cfg(not(feature = "debug-tracing"))]
pub struct TraceEmitter<S: TraceSink> {
    registry: Arc<ClassRegistry>,
    _sink: S,
}

#[cfg(not(feature = "debug-tracing"))]
impl<S: TraceSink> TraceEmitter<S> {
    /// Creates an emitter over the given registry and sink.
    #[must_use]
    pub fn new(registry: Arc<ClassRegistry>, sink: S) -> Self {
        Self {
            registry,
            _sink: sink,
        }
    }

    /// Returns the registry this emitter gates against.
    #[must_use]
    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    /// Returns true if any class in `mask` is enabled.
    ///
    /// Constant `false` in this build configuration.
    #[inline]
    #[must_use]
    pub fn enabled(&self, mask: TraceClassSet) -> bool {
        self.registry.enabled(mask)
    }

    /// Emits one complete trace line if any class in `mask` is enabled.
    ///
    /// No-op in this build configuration.
    #[inline]
    pub fn emit(&self, mask: TraceClassSet, args: fmt::Arguments<'_>) {
        let _ = (mask, args);
    }

    /// Opens a composition window.
    ///
    /// No-op in this build configuration: nothing is written, nothing is
    /// locked, and the returned guard does nothing on drop.
    #[inline]
    pub fn begin_message(&self, args: fmt::Arguments<'_>) -> MessageGuard<'_, S> {
        let _ = args;
        MessageGuard {
            _marker: PhantomData,
        }
    }
}

#[cfg(not(feature = "debug-tracing"))]
impl<S: TraceSink> fmt::Debug for TraceEmitter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceEmitter")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// An open composition window.
///
/// Disabled build: carries no lock and does nothing on drop.
#[cfg(not(feature = "debug-tracing"))]
#[must_use = "the message stays open until the guard drops"]
pub struct MessageGuard<'a, S: TraceSink> {
    _marker: PhantomData<&'a TraceEmitter<S>>,
}

#[cfg(not(feature = "debug-tracing"))]
impl<S: TraceSink> MessageGuard<'_, S> {
    /// Appends a fragment to the open line. No-op in this build
    /// configuration.
    #[inline]
    pub fn append(&mut self, args: fmt::Arguments<'_>) {
        let _ = args;
    }

    /// Completes the message. No-op in this build configuration.
    #[inline]
    pub fn finish(self) {}
}

#[cfg(all(test, feature = "debug-tracing"))]
mod tests {
    use super::*;
    use crate::flags::DebugFlags;
    use crate::sink::MemorySink;

    fn emitter_with(flags: DebugFlags) -> (TraceEmitter<MemorySink>, MemorySink) {
        let registry = ClassRegistry::new();
        registry.initialize(&flags).unwrap();
        let sink = MemorySink::new();
        let handle = sink.clone();
        (TraceEmitter::new(Arc::new(registry), sink), handle)
    }

    #[test]
    fn emit_produces_exactly_one_line() {
        let (emitter, sink) = emitter_with(DebugFlags {
            gc: true,
            ..DebugFlags::default()
        });
        emitter.emit(TraceClassSet::GC, format_args!("collected {}", 5));

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("collected 5"));
    }

    #[test]
    fn emit_for_a_disabled_class_never_reaches_the_sink() {
        let (emitter, sink) = emitter_with(DebugFlags {
            scheduler: true,
            gc: true,
            ..DebugFlags::default()
        });
        emitter.emit(TraceClassSet::INTERP, format_args!("x"));
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn composed_message_is_one_line_with_fragments_in_order() {
        let (emitter, sink) = emitter_with(DebugFlags {
            scheduler: true,
            ..DebugFlags::default()
        });
        let mut msg = emitter.begin_message(format_args!("thread 3"));
        msg.append(format_args!(" blocked on"));
        msg.append(format_args!(" MVAR {:#x}", 0x2afC_usize));
        msg.finish();

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("thread 3 blocked on MVAR 0x2afc"));
    }

    #[test]
    fn dropping_the_guard_terminates_the_line() {
        let (emitter, sink) = emitter_with(DebugFlags::default());
        {
            let mut msg = emitter.begin_message(format_args!("partial"));
            msg.append(format_args!(" message"));
            // Early exit from the composition window; no explicit finish.
        }
        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("partial message"));

        // The lock must be free again.
        emitter.begin_message(format_args!("next")).finish();
        assert_eq!(sink.lines().len(), 2);
    }
}
