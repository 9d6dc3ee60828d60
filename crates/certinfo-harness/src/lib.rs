//! Deterministic test harness for certificate chain disclosure.
//!
//! Seeded environments, recording peers, static TLS links, certificate chain
//! fixtures and an oracle that checks a rich transcript's nesting rules.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod env;
pub mod fixtures;
pub mod link;
pub mod oracle;
pub mod peer;

pub use env::{FailingEnv, RepeatingEnv, SeededEnv};
pub use link::StaticLink;
pub use oracle::{CertificateBatch, FramedChain, OracleViolation, verify_framing};
pub use peer::RecordingPeer;
