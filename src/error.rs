//! Error types.

/// Errors from trace configuration.
///
/// Emission itself has no error taxonomy: a disabled class is a silent
/// no-op, sink write problems stay inside the sink, and protocol misuse
/// (an unfinished composition window) blocks rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum InitError {
    /// The enabled-class mask was already published.
    ///
    /// The registry is initialize-once by contract; the first mask remains
    /// in effect.
    #[error("trace classes already initialized")]
    AlreadyInitialized,
}
