//! Peer chain capture, from a live TLS handshake or a PEM file.

use std::{
    fs::File,
    io::BufReader,
    net::TcpStream,
    path::Path,
    sync::Arc,
};

use certinfo_core::{Certificate, CertificateChain, TlsLink};
use rustls::{
    ClientConfig, ClientConnection, RootCertStore,
    pki_types::{CertificateDer, ServerName},
};

use crate::error::CliError;

/// TLS state captured once, then handed to the encoder.
#[derive(Debug, Clone, Default)]
pub struct CapturedLink {
    encrypted: bool,
    chain: Option<CertificateChain>,
}

impl CapturedLink {
    /// Link presenting a chain that was already obtained.
    pub fn with_chain(chain: CertificateChain) -> Self {
        Self { encrypted: true, chain: Some(chain) }
    }
}

impl TlsLink for CapturedLink {
    fn is_encrypted(&self) -> bool {
        self.encrypted
    }

    fn peer_chain(&self) -> Option<CertificateChain> {
        self.chain.clone()
    }
}

/// Read every certificate from a PEM file.
pub fn read_pem_certificates(path: &Path) -> Result<Vec<CertificateDer<'static>>, CliError> {
    let mut reader = BufReader::new(File::open(path)?);
    let certs = rustls_pemfile::certs(&mut reader).collect::<Result<Vec<_>, _>>()?;
    if certs.is_empty() {
        return Err(CliError::NoCertificates(path.to_path_buf()));
    }
    Ok(certs)
}

/// Load a leaf-first chain from a PEM file.
pub fn load_chain(path: &Path) -> Result<CapturedLink, CliError> {
    let certs = read_pem_certificates(path)?;
    tracing::debug!(path = %path.display(), certificates = certs.len(), "loaded chain file");
    Ok(CapturedLink::with_chain(to_chain(&certs)))
}

/// Trust anchors: bundled web roots plus any from `ca_file`.
pub fn root_store(ca_file: Option<&Path>) -> Result<RootCertStore, CliError> {
    let mut roots = RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    if let Some(path) = ca_file {
        for cert in read_pem_certificates(path)? {
            roots.add(cert)?;
        }
    }
    Ok(roots)
}

/// Complete a TLS handshake with `host:port` and capture the peer chain.
///
/// The handshake verifies the chain against `roots`; an untrusted server
/// fails here rather than being displayed.
pub fn probe(host: &str, port: u16, roots: RootCertStore) -> Result<CapturedLink, CliError> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let config = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()?
        .with_root_certificates(roots)
        .with_no_client_auth();

    let server_name = ServerName::try_from(host.to_owned())
        .map_err(|_| CliError::InvalidHost(host.to_owned()))?;
    let mut conn = ClientConnection::new(Arc::new(config), server_name)?;

    tracing::info!(host, port, "connecting");
    let mut socket = TcpStream::connect((host, port))?;
    while conn.is_handshaking() {
        conn.complete_io(&mut socket)?;
    }

    let chain = conn.peer_certificates().map(to_chain);
    tracing::info!(
        version = ?conn.protocol_version(),
        certificates = chain.as_ref().map_or(0, Vec::len),
        "handshake complete"
    );

    conn.send_close_notify();
    if let Err(err) = conn.complete_io(&mut socket) {
        tracing::debug!(%err, "close_notify not delivered");
    }

    Ok(CapturedLink { encrypted: true, chain })
}

fn to_chain(certs: &[CertificateDer<'_>]) -> CertificateChain {
    certs.iter().map(|cert| Certificate::from_der(cert.as_ref())).collect()
}
