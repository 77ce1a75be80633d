//! Call-site macros.
//!
//! The macros front the emitter so the gate runs *before* the format
//! arguments exist: a disabled class costs one load-and-mask and nothing
//! else. With the `debug-tracing` feature off, the expansions are dead code
//! and the arguments are never evaluated at all.

/// Emits one trace line for `class` if it is enabled.
///
/// The format arguments are evaluated only when the gate passes.
///
/// ```
/// use std::sync::Arc;
/// use tracegate::{ClassRegistry, DebugFlags, MemorySink, TraceClassSet, TraceEmitter};
///
/// let registry = ClassRegistry::new();
/// registry.initialize(&DebugFlags { gc: true, ..DebugFlags::default() })?;
/// let emitter = TraceEmitter::new(Arc::new(registry), MemorySink::new());
///
/// tracegate::trace!(emitter, TraceClassSet::GC, "collected {} blocks", 5);
/// # Ok::<(), tracegate::InitError>(())
/// ```
#[cfg(feature = "debug-tracing")]
#[macro_export]
macro_rules! trace {
    ($emitter:expr, $class:expr, $($arg:tt)+) => {{
        let emitter = &$emitter;
        let class = $class;
        if emitter.enabled(class) {
            emitter.emit(class, ::core::format_args!($($arg)+));
        }
    }};
}

/// Emits one trace line for `class` if it is enabled.
///
/// Disabled build: expands to dead code; neither the gate nor the format
/// arguments are evaluated.
#[cfg(not(feature = "debug-tracing"))]
#[macro_export]
macro_rules! trace {
    ($emitter:expr, $class:expr, $($arg:tt)+) => {{
        if false {
            let _ = &$emitter;
            let _ = $class;
            let _ = ::core::format_args!($($arg)+);
        }
    }};
}

/// Opens a composition window and returns its [`MessageGuard`].
///
/// Writes the header and the first fragment; further fragments go through
/// [`MessageGuard::append`], and dropping (or `finish`ing) the guard
/// completes the line. No class check is performed; gate with
/// [`TraceEmitter::enabled`] first:
///
/// ```
/// use std::sync::Arc;
/// use tracegate::{ClassRegistry, DebugFlags, MemorySink, TraceClassSet, TraceEmitter};
///
/// let registry = ClassRegistry::new();
/// registry.initialize(&DebugFlags { scheduler: true, ..DebugFlags::default() })?;
/// let emitter = TraceEmitter::new(Arc::new(registry), MemorySink::new());
///
/// if emitter.enabled(TraceClassSet::SCHED) {
///     let mut msg = tracegate::trace_message!(emitter, "run queue:");
///     for task in [3, 1, 4] {
///         msg.append(format_args!(" {task}"));
///     }
///     msg.finish();
/// }
/// # Ok::<(), tracegate::InitError>(())
/// ```
///
/// [`MessageGuard`]: crate::MessageGuard
/// [`MessageGuard::append`]: crate::MessageGuard::append
/// [`TraceEmitter::enabled`]: crate::TraceEmitter::enabled
#[cfg(feature = "debug-tracing")]
#[macro_export]
macro_rules! trace_message {
    ($emitter:expr, $($arg:tt)+) => {
        $emitter.begin_message(::core::format_args!($($arg)+))
    };
}

/// Opens a composition window and returns its [`MessageGuard`].
///
/// Disabled build: the arguments are never evaluated and the returned guard
/// does nothing.
///
/// [`MessageGuard`]: crate::MessageGuard
#[cfg(not(feature = "debug-tracing"))]
#[macro_export]
macro_rules! trace_message {
    ($emitter:expr, $($arg:tt)+) => {{
        if false {
            let _ = ::core::format_args!($($arg)+);
        }
        $emitter.begin_message(::core::format_args!(""))
    }};
}

#[cfg(all(test, feature = "debug-tracing"))]
mod tests {
    use crate::class::TraceClassSet;
    use crate::flags::DebugFlags;
    use crate::registry::ClassRegistry;
    use crate::sink::MemorySink;
    use crate::emitter::TraceEmitter;
    use std::sync::Arc;

    fn emitter_with(flags: DebugFlags) -> (TraceEmitter<MemorySink>, MemorySink) {
        let registry = ClassRegistry::new();
        registry.initialize(&flags).unwrap();
        let sink = MemorySink::new();
        let handle = sink.clone();
        (TraceEmitter::new(Arc::new(registry), sink), handle)
    }

    #[test]
    fn trace_skips_argument_evaluation_when_the_class_is_disabled() {
        let (emitter, sink) = emitter_with(DebugFlags {
            gc: true,
            ..DebugFlags::default()
        });
        let evaluations = std::cell::Cell::new(0u32);
        let costly = || {
            evaluations.set(evaluations.get() + 1);
            42
        };

        trace!(emitter, TraceClassSet::INTERP, "value {}", costly());
        assert_eq!(evaluations.get(), 0);
        assert!(sink.lines().is_empty());

        trace!(emitter, TraceClassSet::GC, "value {}", costly());
        assert_eq!(evaluations.get(), 1);
        assert_eq!(sink.lines().len(), 1);
    }

    #[test]
    fn trace_message_composes_one_line() {
        let (emitter, sink) = emitter_with(DebugFlags {
            scheduler: true,
            ..DebugFlags::default()
        });
        if emitter.enabled(TraceClassSet::SCHED) {
            let mut msg = trace_message!(emitter, "queue:");
            msg.append(format_args!(" {}", 7));
            msg.finish();
        }
        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("queue: 7"));
    }
}
