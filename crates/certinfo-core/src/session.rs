//! Session and TLS layer abstractions.
//!
//! The encoder never talks to sockets. The session layer exposes the client
//! through [`Peer`] and the upstream TLS connection through [`TlsLink`];
//! production wires these to the real connection objects, tests use
//! recording doubles.

use crate::{negotiation::NegotiationState, serializer::CertificateChain};

/// A connected client that receives the transcript.
pub trait Peer {
    /// Name the client is addressed by (its nickname).
    fn display_name(&self) -> &str;

    /// Capability state negotiated with this client.
    fn negotiation(&self) -> NegotiationState;

    /// Queue a protocol line for the client.
    ///
    /// Must not block; the session layer owns ordering and flushing.
    fn put_raw(&mut self, line: String);

    /// Queue a human-readable line on the client's feedback channel (a
    /// private query from the module, not the machine-readable stream).
    fn put_feedback(&mut self, line: String);
}

/// The TLS connection whose peer chain is disclosed.
pub trait TlsLink {
    /// Whether the connection is using TLS.
    fn is_encrypted(&self) -> bool;

    /// Peer certificate chain, leaf first.
    ///
    /// Returns `None` if the TLS layer cannot supply it, e.g. before the
    /// handshake completes.
    fn peer_chain(&self) -> Option<CertificateChain>;
}
