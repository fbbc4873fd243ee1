//! Error types for easyslip-node.

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while verifying and routing slips.
#[derive(Debug, Error)]
pub enum Error {
    /// An image operation was requested but the item carries no binary
    /// attachment under the named property.
    #[error("No binary data found in property \"{property}\"")]
    MissingBinaryData {
        /// Name of the binary property that was looked up.
        property: String,
    },

    /// A required string parameter was not supplied for the operation.
    #[error("Missing required parameter \"{name}\"")]
    MissingParameter {
        /// Parameter name as the host knows it.
        name: &'static str,
    },

    /// The resource does not support the requested operation.
    #[error("The operation \"{operation}\" is not supported for resource \"{resource}\"")]
    UnsupportedOperation {
        /// Resource name.
        resource: String,
        /// Operation name.
        operation: String,
    },

    /// The API answered with a non-success status that is not a duplicate slip.
    #[error("Request failed with status code {status}: {message}")]
    Transport {
        /// HTTP status code.
        status: u16,
        /// Message reported by the API, or the status reason.
        message: String,
    },

    /// Network-level failure talking to the API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The credential collaborator could not supply a token.
    #[error("Credentials error: {0}")]
    Credentials(String),

    /// The outbound request could not be assembled.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A per-item failure that aborted the whole run.
    #[error("Item {item_index} failed: {source}")]
    ItemFailed {
        /// Position of the failing item in the input.
        item_index: usize,
        /// The underlying failure.
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap this error as the abort reason for the item at `item_index`.
    #[must_use]
    pub fn at_item(self, item_index: usize) -> Self {
        match self {
            already @ Self::ItemFailed { .. } => already,
            other => Self::ItemFailed {
                item_index,
                source: Box::new(other),
            },
        }
    }

    /// Index of the failing item, if this error aborted a run.
    #[must_use]
    pub fn item_index(&self) -> Option<usize> {
        match self {
            Self::ItemFailed { item_index, .. } => Some(*item_index),
            _ => None,
        }
    }
}
