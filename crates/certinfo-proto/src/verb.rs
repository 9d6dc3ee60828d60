//! Command words carried by wire records.

use std::fmt;

use crate::errors::{ProtocolError, Result};

/// Command word of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// Batch open (`+id type`) or close (`-id`)
    Batch,
    /// One line of certificate text addressed to a recipient
    CertInfo,
}

impl Verb {
    /// Wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Batch => "BATCH",
            Self::CertInfo => "CERTINFO",
        }
    }

    /// Parse a command word. Matching is exact.
    pub fn parse(word: &str) -> Result<Self> {
        match word {
            "BATCH" => Ok(Self::Batch),
            "CERTINFO" => Ok(Self::CertInfo),
            other => Err(ProtocolError::UnknownVerb(other.to_owned())),
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
