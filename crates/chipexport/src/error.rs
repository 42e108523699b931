//! Error types returned by the export dispatcher.
use thiserror::Error;

/// Result type for export operations.
pub type Result<T, E = ExportError> = std::result::Result<T, E>;

/// Errors that abort a single export call.
///
/// Encoders themselves are infallible: a trace with no writes for the chosen
/// format still produces a minimal, silent file. Only the dispatcher rejects
/// input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// The decoded trace contained no register writes.
    #[error("register trace is empty")]
    EmptyTrace,

    /// The requested format tag is not known to the registry.
    #[error("unsupported export format: {0:?}")]
    UnsupportedFormat(String),

    /// An option override cannot be used (for example a zero frame rate).
    #[error("invalid option '{name}': {message}")]
    InvalidOption {
        /// Option name.
        name: &'static str,
        /// Why the value was rejected.
        message: String,
    },
}
