//! Error types for wire record encoding and decoding.

use thiserror::Error;

/// Result alias for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors produced while encoding or decoding wire records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Batch identifier is not a lowercase hex token of the expected length
    #[error("invalid batch identifier {0:?}")]
    InvalidBatchId(String),

    /// A space-delimited field is empty or contains forbidden characters
    #[error("invalid {field} token {value:?}")]
    InvalidToken {
        /// Which field was rejected (source, recipient, batch type)
        field: &'static str,
        /// The rejected value
        value: String,
    },

    /// Trailing payload would break line framing
    #[error("payload contains a line terminator or NUL byte")]
    IllegalPayload,

    /// Command word is not one this protocol emits
    #[error("unknown command word {0:?}")]
    UnknownVerb(String),

    /// Line does not follow the record grammar
    #[error("malformed record: {0}")]
    MalformedLine(&'static str),
}
