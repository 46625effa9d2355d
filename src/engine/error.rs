//! Error types for the diff engine.

/// Errors that can occur while computing a diff.
///
/// The first two variants signal internal-invariant violations: for finite,
/// well-formed inputs the search is guaranteed to terminate within its bound
/// and produce a well-formed path, so neither should be observable through
/// correct use of the public API. They are surfaced as errors rather than
/// panics so callers decide how fatal they are.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// The edit-graph search exhausted its `N + M + 1` iteration bound
    /// without reaching the target corner.
    #[error("could not find a diff path within {bound} iterations")]
    NoPathFound { bound: usize },

    /// Path reconstruction hit a snake node where a diff node was expected.
    #[error("malformed diff path: found a snake while looking for a diff node")]
    MalformedPath,

    /// A generator was configured with an unusable value, rejected at build
    /// time rather than at diff time.
    #[error("invalid diff configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
