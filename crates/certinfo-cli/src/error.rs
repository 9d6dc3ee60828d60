//! CLI error types.

use std::{io, path::PathBuf};

use certinfo_core::DisclosureError;
use thiserror::Error;

/// Errors surfaced by the `certinfo` binary.
#[derive(Error, Debug)]
pub enum CliError {
    /// Reading a file or talking to the server failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// TLS setup or handshake failed
    #[error("TLS error: {0}")]
    Tls(#[from] rustls::Error),

    /// Host is not a valid DNS name or IP address
    #[error("invalid server name: {0}")]
    InvalidHost(String),

    /// Neither a host nor a chain file was given
    #[error("nothing to inspect: pass a host or --chain-file")]
    NoSource,

    /// PEM file held no certificates
    #[error("no certificates found in {}", .0.display())]
    NoCertificates(PathBuf),

    /// Encoding or delivering the chain failed
    #[error(transparent)]
    Disclosure(#[from] DisclosureError),
}
