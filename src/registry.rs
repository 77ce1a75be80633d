//! Enabled-class registry.
//!
//! Holds the process-wide set of enabled trace classes. The mask is written
//! once during configuration and read concurrently, lock-free, for the rest
//! of the process lifetime: single-writer-then-freeze.
//!
//! The registry is shared by reference (typically `Arc`) with every emitter
//! that needs it; `new` is `const`, so embedders that prefer a process-wide
//! `static` can declare one instead.

use crate::class::TraceClassSet;
use crate::error::InitError;
use crate::flags::DebugFlags;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// The set of currently enabled trace classes.
///
/// Starts empty. [`initialize`](Self::initialize) publishes the configured
/// mask exactly once; afterwards [`enabled`](Self::enabled) is a single
/// load-and-mask, safe from any thread without locking.
#[derive(Debug)]
pub struct ClassRegistry {
    classes: AtomicU32,
    initialized: AtomicBool,
}

impl ClassRegistry {
    /// Creates a registry with every class disabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            classes: AtomicU32::new(0),
            initialized: AtomicBool::new(false),
        }
    }

    /// Computes and publishes the enabled-class mask from parsed debug flags.
    ///
    /// Must complete before any other thread starts tracing. The store uses
    /// release ordering and every read uses acquire, so a thread that
    /// observes the mask also observes everything configuration did before
    /// publishing it.
    ///
    /// # Errors
    ///
    /// Returns [`InitError::AlreadyInitialized`] on any call after the
    /// first; the first mask stays in effect.
    pub fn initialize(&self, flags: &DebugFlags) -> Result<(), InitError> {
        self.initialize_classes(flags.to_classes())
    }

    /// Publishes an already-computed class mask.
    ///
    /// For callers that hold a raw mask rather than flag booleans.
    ///
    /// # Errors
    ///
    /// Returns [`InitError::AlreadyInitialized`] on any call after the
    /// first.
    pub fn initialize_classes(&self, classes: TraceClassSet) -> Result<(), InitError> {
        if self
            .initialized
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(InitError::AlreadyInitialized);
        }
        self.classes.store(classes.bits(), Ordering::Release);
        Ok(())
    }

    /// Returns the published class mask.
    ///
    /// Empty until [`initialize`](Self::initialize) completes.
    #[inline]
    #[must_use]
    pub fn classes(&self) -> TraceClassSet {
        TraceClassSet::from_bits(self.classes.load(Ordering::Acquire))
    }

    /// Returns true if [`initialize`](Self::initialize) has completed.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Returns true if any class in `mask` is enabled.
    ///
    /// The gate every emission performs first: one atomic load and a mask,
    /// never blocking, callable from any thread.
    #[cfg(feature = "debug-tracing")]
    #[inline]
    #[must_use]
    pub fn enabled(&self, mask: TraceClassSet) -> bool {
        self.classes().intersects(mask)
    }

    /// Returns true if any class in `mask` is enabled.
    ///
    /// Constant `false` in this build configuration; the compiler removes
    /// the check and everything behind it.
    #[cfg(not(feature = "debug-tracing"))]
    #[inline]
    #[must_use]
    pub fn enabled(&self, mask: TraceClassSet) -> bool {
        let _ = mask;
        false
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}
