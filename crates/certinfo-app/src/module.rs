//! Module entry points.
//!
//! The session layer owns clients and sockets and calls into the module on
//! capability negotiation, on user commands and on lifecycle events. Every
//! send path funnels into [`CertInfoModule::dispatch`].

use std::collections::BTreeSet;

use certinfo_core::{
    BatchFrameEncoder, DisclosureConfig, DisclosureError, EncodingMode, Environment, Peer, TlsLink,
};

use crate::{
    commands::{self, Command},
    trigger::Trigger,
};

/// One-line module description shown in module listings.
pub const MODULE_DESCRIPTION: &str = "A module for sending certificate information to client";

/// Summary of a successful send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    /// Encoding used
    pub mode: EncodingMode,
    /// Lines queued for the client
    pub lines: usize,
}

/// Certificate disclosure module.
#[derive(Debug, Clone)]
pub struct CertInfoModule<E> {
    encoder: BatchFrameEncoder,
    env: E,
}

impl<E: Environment> CertInfoModule<E> {
    /// Create the module.
    pub fn new(config: DisclosureConfig, env: E) -> Self {
        Self { encoder: BatchFrameEncoder::new(config), env }
    }

    /// Underlying encoder.
    pub fn encoder(&self) -> &BatchFrameEncoder {
        &self.encoder
    }

    /// Add the module's capability to a capability listing.
    pub fn on_cap_ls(&self, caps: &mut BTreeSet<String>) {
        caps.insert(self.encoder.negotiator().advertise().to_owned());
    }

    /// Whether a client's capability request is ours to grant.
    pub fn is_cap_supported(&self, cap: &str) -> bool {
        self.encoder.negotiator().accept(cap)
    }

    /// Handle a line the user sent to the module.
    ///
    /// Returns the send result for `send`, `None` for every other command.
    pub fn on_command<P, L>(
        &self,
        input: &str,
        mut peer: Option<&mut P>,
        link: Option<&L>,
    ) -> Option<Result<Delivery, DisclosureError>>
    where
        P: Peer + ?Sized,
        L: TlsLink + ?Sized,
    {
        match commands::parse(input) {
            Command::Send { include_full_chain } => {
                Some(self.dispatch(Trigger::ManualSend { include_full_chain }, peer, link))
            },
            Command::Help => {
                if let Some(peer) = peer.as_deref_mut() {
                    for line in commands::help_lines() {
                        peer.put_feedback(line);
                    }
                }
                None
            },
            Command::Unknown { input } => {
                if let Some(peer) = peer.as_deref_mut() {
                    peer.put_feedback(commands::unknown_reply(&input));
                }
                None
            },
            Command::InvalidArgs { error, .. } => {
                if let Some(peer) = peer.as_deref_mut() {
                    peer.put_feedback(error);
                }
                None
            },
        }
    }

    /// Upstream TLS handshake completed. Failures and clients without batch
    /// support are skipped silently.
    pub fn on_encrypted_connect<P, L>(&self, peer: Option<&mut P>, link: Option<&L>) -> Option<Delivery>
    where
        P: Peer + ?Sized,
        L: TlsLink + ?Sized,
    {
        self.dispatch(Trigger::OnEncryptedConnect, peer, link).ok()
    }

    /// Client session authenticated. Failures and clients without batch
    /// support are skipped silently.
    pub fn on_session_authenticated<P, L>(
        &self,
        peer: Option<&mut P>,
        link: Option<&L>,
    ) -> Option<Delivery>
    where
        P: Peer + ?Sized,
        L: TlsLink + ?Sized,
    {
        self.dispatch(Trigger::OnSessionAuthenticated, peer, link).ok()
    }

    /// Encode the chain and deliver it to `peer`.
    ///
    /// Nothing reaches the peer unless the whole transcript encoded. On
    /// failure a manual trigger gets one `Error:` feedback line; automatic
    /// triggers only log.
    ///
    /// Automatic triggers only deliver rich transcripts. A client without
    /// batch support gets nothing unless it asks with `send`, and the call
    /// returns `FramingNotNegotiated`.
    pub fn dispatch<P, L>(
        &self,
        trigger: Trigger,
        peer: Option<&mut P>,
        link: Option<&L>,
    ) -> Result<Delivery, DisclosureError>
    where
        P: Peer + ?Sized,
        L: TlsLink + ?Sized,
    {
        let span = tracing::debug_span!("certinfo", ?trigger);
        let _guard = span.enter();

        let prepared =
            self.encoder.prepare(&self.env, peer.as_deref(), link, trigger.include_full_chain());

        match (prepared, peer) {
            (Ok(transcript), Some(_))
                if !trigger.is_manual() && transcript.mode() != EncodingMode::RichFramed =>
            {
                tracing::debug!("client has no batch support, automatic send skipped");
                Err(DisclosureError::FramingNotNegotiated)
            },
            (Ok(transcript), Some(peer)) => {
                let mode = transcript.mode();
                let lines = transcript.deliver(peer);
                tracing::debug!(?mode, lines, "certificate chain delivered");
                Ok(Delivery { mode, lines })
            },
            (Ok(_), None) => Err(DisclosureError::NoActiveTarget),
            (Err(err), peer) => {
                if trigger.is_manual() {
                    tracing::warn!(%err, "certificate send failed");
                    if let Some(peer) = peer {
                        peer.put_feedback(format!("Error: {err}"));
                    }
                } else {
                    tracing::debug!(%err, "automatic certificate send skipped");
                }
                Err(err)
            },
        }
    }
}
