//! Batch identifiers and type tags.

use std::fmt;

use crate::errors::{ProtocolError, Result};

/// Type tag of the outer batch wrapping a whole chain.
pub const CHAIN_BATCH_TYPE: &str = "znc.in/certinfo";

/// Type tag of the inner batch wrapping one certificate.
pub const CERTIFICATE_BATCH_TYPE: &str = "znc.in/certinfo-certificate";

/// Reference token naming one batch.
///
/// Rendered as a fixed-length lowercase hex string. Tokens are derived from
/// random bytes by the caller; this type only guarantees the textual shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BatchId(String);

impl BatchId {
    /// Number of random bytes behind one identifier.
    pub const RAW_LEN: usize = 16;

    /// Length of the rendered identifier.
    pub const HEX_LEN: usize = Self::RAW_LEN * 2;

    /// Render raw random bytes as an identifier.
    pub fn from_bytes(bytes: [u8; Self::RAW_LEN]) -> Self {
        Self(hex::encode(bytes))
    }

    /// Parse an identifier read off the wire.
    pub fn parse(token: &str) -> Result<Self> {
        let well_formed = token.len() == Self::HEX_LEN
            && token.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));

        if well_formed {
            Ok(Self(token.to_owned()))
        } else {
            Err(ProtocolError::InvalidBatchId(token.to_owned()))
        }
    }

    /// Textual form as it appears on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_is_lowercase_hex() {
        let id = BatchId::from_bytes([0xAB; BatchId::RAW_LEN]);
        assert_eq!(id.as_str(), "ab".repeat(BatchId::RAW_LEN));
        assert_eq!(id.as_str().len(), BatchId::HEX_LEN);
    }

    #[test]
    fn parse_accepts_rendered_form() {
        let id = BatchId::from_bytes([7; BatchId::RAW_LEN]);
        assert_eq!(BatchId::parse(id.as_str()), Ok(id));
    }

    #[test]
    fn parse_rejects_uppercase_and_wrong_length() {
        assert!(BatchId::parse(&"AB".repeat(BatchId::RAW_LEN)).is_err());
        assert!(BatchId::parse("1f5fdd").is_err());
        assert!(BatchId::parse("").is_err());
    }
}
