//! Fixed TLS link double.

use certinfo_core::{CertificateChain, TlsLink};

/// TLS link with a fixed state.
#[derive(Debug, Clone, Default)]
pub struct StaticLink {
    /// Whether the connection reports TLS
    pub encrypted: bool,
    /// Chain the TLS layer hands out
    pub chain: Option<CertificateChain>,
}

impl StaticLink {
    /// Encrypted link presenting `chain`.
    pub fn tls(chain: CertificateChain) -> Self {
        Self { encrypted: true, chain: Some(chain) }
    }

    /// Plaintext connection.
    pub fn plaintext() -> Self {
        Self { encrypted: false, chain: None }
    }

    /// Encrypted link whose chain is not available yet.
    pub fn handshake_pending() -> Self {
        Self { encrypted: true, chain: None }
    }
}

impl TlsLink for StaticLink {
    fn is_encrypted(&self) -> bool {
        self.encrypted
    }

    fn peer_chain(&self) -> Option<CertificateChain> {
        self.chain.clone()
    }
}
