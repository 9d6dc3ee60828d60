//! Certificate chain disclosure core logic
//!
//! Turns the peer certificate chain of a TLS connection into the line
//! transcript a client receives: nested batches of armored certificate lines
//! when the client negotiated the capability, or a bordered human-readable
//! dump otherwise.
//!
//! # Architecture
//!
//! Nothing in this crate performs I/O. Randomness comes from an injected
//! [`Environment`], the session and TLS layers are reached through the
//! [`Peer`] and [`TlsLink`] traits, and encoding produces a complete
//! [`Transcript`] before a single line is handed to the peer. A failed
//! invocation therefore never leaves a half-open batch on the wire.
//!
//! # Components
//!
//! - [`identifier`]: Batch identifier allocation (unique per invocation)
//! - [`serializer`]: Certificate to armored lines or escaped text dump
//! - [`negotiation`]: Capability advertise/accept and encoding mode decision
//! - [`encoder`]: Batch framing and flat fallback
//! - [`session`]: Peer and TLS link abstractions
//! - [`mod@env`]: Environment abstraction (RNG)
//! - [`config`]: Encoder configuration
//! - [`error`]: Disclosure error types

pub mod config;
pub mod encoder;
pub mod env;
pub mod error;
pub mod identifier;
pub mod negotiation;
pub mod serializer;
pub mod session;

pub use config::{DisclosureConfig, TaggingScheme};
pub use encoder::{BatchFrameEncoder, Channel, Transcript};
pub use env::{Environment, SystemEnv};
pub use error::{DisclosureError, EntropyError, SerializeError};
pub use identifier::BatchIdAllocator;
pub use negotiation::{EncodingMode, FeatureNegotiator, NegotiationState};
pub use serializer::{Certificate, CertificateChain};
pub use session::{Peer, TlsLink};
