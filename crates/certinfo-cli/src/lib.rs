//! Certificate chain probe
//!
//! Obtains a peer certificate chain, either from a TLS handshake or a PEM
//! file, and writes the transcript a bouncer client would receive for it.
//!
//! # Components
//!
//! - [`args`]: Command-line flags and their encoder configuration
//! - [`link`]: Chain capture over rustls or from PEM
//! - [`peer`]: Writer-backed client
//! - [`error`]: CLI error types

pub mod args;
pub mod error;
pub mod link;
pub mod peer;

use std::io::Write;

use certinfo_app::{CertInfoModule, Delivery, Trigger};
use certinfo_core::SystemEnv;

pub use args::{Args, ClientProfile};
pub use error::CliError;
pub use link::CapturedLink;
pub use peer::WriterPeer;

/// Capture the chain selected by `args` and write the transcript to `out`.
///
/// Failures are also written to `out` as module feedback, the way a user
/// issuing `send` would see them.
pub fn run<W: Write>(args: &Args, out: W) -> Result<Delivery, CliError> {
    let link = match (&args.chain_file, &args.host) {
        (Some(path), _) => link::load_chain(path)?,
        (None, Some(host)) => {
            let roots = link::root_store(args.ca_file.as_deref())?;
            link::probe(host, args.port, roots)?
        },
        (None, None) => return Err(CliError::NoSource),
    };

    let module = CertInfoModule::new(args.config(), SystemEnv);
    let mut peer = WriterPeer::new(args.nick.clone(), args.client.negotiation(), out);

    let result = module.dispatch(
        Trigger::ManualSend { include_full_chain: args.details },
        Some(&mut peer),
        Some(&link),
    );
    peer.finish()?;

    Ok(result?)
}
