//! Module index failures.

use thiserror::Error;

/// Errors raised while fetching from the module index.
///
/// Any of these aborts a pagination run; entries gathered from earlier pages
/// are dropped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Request parameters are out of range
    #[error("{message}")]
    InvalidRequest {
        /// What was wrong
        message: String,
    },

    /// Index answered with a non-success status
    #[error("index request failed: HTTP {status} from {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Request could not be completed (connection, timeout, body read)
    #[error("index request to {url} failed: {message}")]
    Transport {
        /// Requested URL
        url: String,
        /// Underlying error, flattened
        message: String,
    },

    /// A response line is not a valid index record
    #[error("invalid index record on line {line}: {message}")]
    Decode {
        /// 1-based line number within the response body
        line: usize,
        /// Underlying parse error
        message: String,
    },

    /// The run was cancelled
    #[error("index request cancelled")]
    Cancelled,
}

impl FetchError {
    /// Whether the HTTP binding should retry after this error.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Transport {
                ..
            } => true,
            Self::Status {
                status,
                ..
            } => *status >= 500,
            _ => false,
        }
    }
}
