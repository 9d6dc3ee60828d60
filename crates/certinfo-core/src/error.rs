//! Error types for certificate chain disclosure.

use certinfo_proto::ProtocolError;
use thiserror::Error;

/// Entropy source failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("entropy source unavailable: {0}")]
pub struct EntropyError(pub String);

/// Certificate could not be rendered as text.
#[derive(Debug, Error)]
pub enum SerializeError {
    /// OpenSSL rejected the DER encoding or failed to print it
    #[error("openssl: {0}")]
    OpenSsl(#[from] openssl::error::ErrorStack),

    /// Armored output was not valid UTF-8
    #[error("armored output is not UTF-8")]
    NotUtf8(#[from] std::string::FromUtf8Error),
}

/// Reasons a disclosure invocation was abandoned.
///
/// Every variant is terminal for one invocation and is reported before any
/// line reaches the peer.
#[derive(Debug, Error)]
pub enum DisclosureError {
    /// No client session to send to
    #[error("no active client session to send to")]
    NoActiveTarget,

    /// Upstream transport is not using TLS
    #[error("connection is not using SSL/TLS")]
    EncryptionNotActive,

    /// TLS layer could not provide the peer chain
    #[error("peer certificate chain is unavailable")]
    CertificateSourceUnavailable,

    /// A certificate could not be converted to text
    #[error("certificate #{ordinal} could not be serialized: {source}")]
    SerializationFailed {
        /// 1-based position in the chain
        ordinal: usize,
        /// Underlying failure
        #[source]
        source: SerializeError,
    },

    /// Batch identifier could not be drawn
    #[error("batch identifier generation failed: {0}")]
    IdentifierGenerationFailed(String),

    /// Client lacks batch support and flat output is disabled
    #[error("client has not negotiated certificate batches")]
    FramingNotNegotiated,

    /// A record could not be rendered as a protocol-legal line
    #[error("invalid record: {0}")]
    InvalidRecord(#[from] ProtocolError),
}

impl From<EntropyError> for DisclosureError {
    fn from(err: EntropyError) -> Self {
        Self::IdentifierGenerationFailed(err.0)
    }
}
