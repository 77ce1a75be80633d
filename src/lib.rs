//! Class-gated debug and performance tracing for concurrent runtimes.
//!
//! # Overview
//!
//! Runtime subsystems emit human-readable trace lines tagged with a
//! timestamp and the emitting thread's identity. Every message belongs to a
//! named *trace class* (scheduler, GC, STM, ...); the set of enabled classes
//! is chosen once, at process configuration time, and a disabled class costs
//! one atomic load and a mask: no formatting, no locking, no I/O.
//!
//! # Core guarantees
//!
//! - **Set once, read anywhere**: the enabled-class mask is published once
//!   with release/acquire ordering and never changes afterwards; the gate is
//!   lock-free and callable from any thread.
//! - **Lines never interleave**: every emission holds the output lock for
//!   exactly one complete line, whether it was produced by a single call or
//!   composed from fragments.
//! - **No cost when compiled out**: without the `debug-tracing` feature the
//!   gate is constant `false`, the emitter entry points are empty inline
//!   no-ops, and the macros never evaluate their arguments.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tracegate::{ClassRegistry, DebugFlags, MemorySink, TraceClassSet, TraceEmitter};
//!
//! # fn main() -> Result<(), tracegate::InitError> {
//! // During process configuration, publish the classes chosen by the
//! // externally parsed debug flags.
//! let registry = Arc::new(ClassRegistry::new());
//! registry.initialize(&DebugFlags {
//!     scheduler: true,
//!     gc: true,
//!     ..DebugFlags::default()
//! })?;
//!
//! let emitter = TraceEmitter::new(Arc::clone(&registry), MemorySink::new());
//!
//! // Hot paths pay one load-and-mask when the class is disabled.
//! tracegate::trace!(emitter, TraceClassSet::GC, "collected {} blocks", 5);
//! tracegate::trace!(emitter, TraceClassSet::INTERP, "never rendered");
//! # Ok(())
//! # }
//! ```
//!
//! # Module structure
//!
//! - [`class`]: trace class bitmask and the stable bit layout
//! - [`flags`]: parsed debug-flag configuration
//! - [`registry`]: the initialize-once enabled-class registry and gate
//! - [`emitter`]: emission protocols and output serialization
//! - [`sink`]: line rendering and output seam
//! - [`error`](mod@error): error types

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_const_for_fn)]

#[cfg(all(feature = "par", feature = "sim"))]
compile_error!(
    "features `par` and `sim` are mutually exclusive: the two parallel \
     schedulers share trace-class bit positions 14-28."
);

pub mod class;
pub mod emitter;
pub mod error;
pub mod flags;
pub mod registry;
pub mod sink;

mod macros;

// Re-exports for convenient access to core types
pub use class::TraceClassSet;
pub use emitter::{MessageGuard, TraceEmitter};
pub use error::InitError;
pub use flags::DebugFlags;
#[cfg(feature = "par")]
pub use flags::ParDebugFlags;
#[cfg(feature = "sim")]
pub use flags::SimDebugFlags;
pub use registry::ClassRegistry;
pub use sink::{MemorySink, StderrSink, TraceSink, thread_tag};
