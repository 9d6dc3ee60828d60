//! Batch framing of certificate chains.
//!
//! # Rich framing
//!
//! ```text
//! open  G0 (chain type)
//! ├── open  G1 (certificate type, @batch=G0)
//! │   ├── CERTINFO line 1 (@batch=G1)
//! │   ├── ...
//! │   └── CERTINFO line k (@batch=G1)
//! ├── close G1 (@batch=G0)
//! ├── open  G2 ...
//! └── close G2
//! close G0
//! ```
//!
//! Inner batches never interleave: a certificate's batch is closed before the
//! next one opens. Every identifier in one transcript is distinct.
//!
//! # Flat fallback
//!
//! Clients without batch support get the bordered text dump of the leaf (or
//! of the whole chain on request) on their feedback channel.
//!
//! Both paths build the full transcript before returning it, so an error
//! halfway through the chain discards everything already encoded.

use certinfo_proto::{Record, WireLine};

use crate::{
    config::DisclosureConfig,
    env::Environment,
    error::DisclosureError,
    identifier::BatchIdAllocator,
    negotiation::{EncodingMode, FeatureNegotiator},
    serializer::{self, Certificate},
    session::{Peer, TlsLink},
};

/// Fallback line sent when the TLS layer reports an empty chain.
pub const NO_CHAIN_LINE: &str = "No certificate chain available";

/// Destination of a transcript on the client side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Machine-readable protocol stream
    Raw,
    /// Human-readable module query
    Feedback,
}

/// Fully encoded output of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    mode: EncodingMode,
    lines: Vec<String>,
}

impl Transcript {
    /// Mode the transcript was encoded in.
    pub fn mode(&self) -> EncodingMode {
        self.mode
    }

    /// Channel the lines belong on.
    pub fn channel(&self) -> Channel {
        match self.mode {
            EncodingMode::RichFramed => Channel::Raw,
            EncodingMode::FlatFallback => Channel::Feedback,
        }
    }

    /// Encoded lines in emission order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True if there is nothing to send.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Push every line to the peer on the transcript's channel.
    ///
    /// Returns the number of lines delivered.
    pub fn deliver<P: Peer + ?Sized>(self, peer: &mut P) -> usize {
        let channel = self.channel();
        let count = self.lines.len();
        for line in self.lines {
            match channel {
                Channel::Raw => peer.put_raw(line),
                Channel::Feedback => peer.put_feedback(line),
            }
        }
        count
    }
}

/// Encodes certificate chains for one configuration.
///
/// Stateless across calls: each call allocates its own identifiers, so one
/// encoder can serve any number of clients concurrently.
#[derive(Debug, Clone)]
pub struct BatchFrameEncoder {
    config: DisclosureConfig,
    negotiator: FeatureNegotiator,
}

impl BatchFrameEncoder {
    /// Create an encoder. The negotiator takes its token from the config.
    pub fn new(config: DisclosureConfig) -> Self {
        let negotiator = FeatureNegotiator::new(config.capability.clone());
        Self { config, negotiator }
    }

    /// Active configuration.
    pub fn config(&self) -> &DisclosureConfig {
        &self.config
    }

    /// Capability negotiator.
    pub fn negotiator(&self) -> &FeatureNegotiator {
        &self.negotiator
    }

    /// Check preconditions, decide the mode, and encode the peer chain.
    ///
    /// `include_full_chain` only affects the flat fallback; batches always
    /// carry the whole chain.
    ///
    /// # Errors
    ///
    /// - `NoActiveTarget` if there is no client
    /// - `EncryptionNotActive` if there is no upstream link or it is not TLS
    /// - `CertificateSourceUnavailable` if the TLS layer has no chain
    /// - any error from [`BatchFrameEncoder::encode`]
    pub fn prepare<E, P, L>(
        &self,
        env: E,
        peer: Option<&P>,
        link: Option<&L>,
        include_full_chain: bool,
    ) -> Result<Transcript, DisclosureError>
    where
        E: Environment,
        P: Peer + ?Sized,
        L: TlsLink + ?Sized,
    {
        let peer = peer.ok_or(DisclosureError::NoActiveTarget)?;
        let link = link.ok_or(DisclosureError::EncryptionNotActive)?;
        if !link.is_encrypted() {
            return Err(DisclosureError::EncryptionNotActive);
        }
        let chain = link.peer_chain().ok_or(DisclosureError::CertificateSourceUnavailable)?;

        let mode = self.negotiator.decide(peer.negotiation());
        self.encode(env, &chain, mode, peer.display_name(), include_full_chain)
    }

    /// Encode `chain` in `mode` for `recipient`.
    ///
    /// # Errors
    ///
    /// - `FramingNotNegotiated` for flat mode when fallback is disabled
    /// - `SerializationFailed` if any certificate cannot be rendered
    /// - `IdentifierGenerationFailed` if entropy fails
    /// - `InvalidRecord` if the recipient or config tokens are not
    ///   protocol-legal
    pub fn encode<E: Environment>(
        &self,
        env: E,
        chain: &[Certificate],
        mode: EncodingMode,
        recipient: &str,
        include_full_chain: bool,
    ) -> Result<Transcript, DisclosureError> {
        tracing::debug!(?mode, certificates = chain.len(), recipient, "encoding certificate chain");

        match mode {
            EncodingMode::RichFramed => self.encode_framed(env, chain, recipient),
            EncodingMode::FlatFallback if self.config.allow_fallback => {
                Self::encode_flat(chain, include_full_chain)
            },
            EncodingMode::FlatFallback => Err(DisclosureError::FramingNotNegotiated),
        }
    }

    fn encode_framed<E: Environment>(
        &self,
        env: E,
        chain: &[Certificate],
        recipient: &str,
    ) -> Result<Transcript, DisclosureError> {
        let mut ids = BatchIdAllocator::new(env);
        let mut records = Vec::new();

        let chain_id = ids.allocate()?;
        records.push(Record::BatchOpen {
            id: chain_id.clone(),
            kind: self.config.chain_batch_type.clone(),
            parent: None,
        });

        for (index, cert) in chain.iter().enumerate() {
            let block = serializer::transport_block(cert)
                .map_err(|source| DisclosureError::SerializationFailed { ordinal: index + 1, source })?;
            let cert_id = ids.allocate()?;

            tracing::debug!(batch = %cert_id, ordinal = index + 1, lines = block.len(), "framing certificate");

            records.push(Record::BatchOpen {
                id: cert_id.clone(),
                kind: self.config.inner_batch_type().to_owned(),
                parent: Some(chain_id.clone()),
            });
            records.extend(block.into_iter().map(|payload| Record::CertLine {
                batch: cert_id.clone(),
                recipient: recipient.to_owned(),
                payload,
            }));
            records.push(Record::BatchClose { id: cert_id, parent: Some(chain_id.clone()) });
        }

        records.push(Record::BatchClose { id: chain_id, parent: None });

        let lines = records
            .into_iter()
            .map(|record| WireLine::new(self.config.source.clone(), record).encode())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Transcript { mode: EncodingMode::RichFramed, lines })
    }

    fn encode_flat(
        chain: &[Certificate],
        include_full_chain: bool,
    ) -> Result<Transcript, DisclosureError> {
        if chain.is_empty() {
            return Ok(Transcript {
                mode: EncodingMode::FlatFallback,
                lines: vec![NO_CHAIN_LINE.to_owned()],
            });
        }

        let scope = if include_full_chain { chain.len() } else { 1 };
        let mut lines = Vec::new();

        for (index, cert) in chain.iter().take(scope).enumerate() {
            let block = serializer::human_block(cert, index + 1, index == 0)
                .map_err(|source| DisclosureError::SerializationFailed { ordinal: index + 1, source })?;
            lines.extend(block);
        }

        Ok(Transcript { mode: EncodingMode::FlatFallback, lines })
    }
}

impl Default for BatchFrameEncoder {
    fn default() -> Self {
        Self::new(DisclosureConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use certinfo_proto::BatchId;

    use super::*;
    use crate::{config::TaggingScheme, error::EntropyError, serializer::transport_block};

    /// Counts upward so identifiers are predictable.
    struct CountingEnv {
        next: Cell<u8>,
    }

    impl CountingEnv {
        fn new() -> Self {
            Self { next: Cell::new(1) }
        }
    }

    impl Environment for CountingEnv {
        fn random_bytes(&self, buffer: &mut [u8]) -> Result<(), EntropyError> {
            buffer.fill(self.next.get());
            self.next.set(self.next.get() + 1);
            Ok(())
        }
    }

    fn id(byte: u8) -> BatchId {
        BatchId::from_bytes([byte; BatchId::RAW_LEN])
    }

    fn leaf() -> Certificate {
        let cert = rcgen::generate_simple_self_signed(vec!["leaf.example".to_string()]).unwrap();
        Certificate::from_der(cert.cert.der().to_vec())
    }

    #[test]
    fn single_certificate_transcript() {
        let cert = leaf();
        let pem = transport_block(&cert).unwrap();
        let transcript = BatchFrameEncoder::default()
            .encode(CountingEnv::new(), &[cert], EncodingMode::RichFramed, "alice", false)
            .unwrap();

        let mut expected = vec![
            format!(":znc.in BATCH +{} znc.in/certinfo", id(1)),
            format!("@batch={} :znc.in BATCH +{} znc.in/certinfo-certificate", id(1), id(2)),
        ];
        expected.extend(pem.iter().map(|line| format!("@batch={} :znc.in CERTINFO alice :{line}", id(2))));
        expected.push(format!("@batch={} :znc.in BATCH -{}", id(1), id(2)));
        expected.push(format!(":znc.in BATCH -{}", id(1)));

        assert_eq!(transcript.lines(), expected.as_slice());
        assert_eq!(transcript.channel(), Channel::Raw);
    }

    #[test]
    fn shared_tagging_uses_chain_type_for_inner_batches() {
        let config = DisclosureConfig { tagging: TaggingScheme::Shared, ..Default::default() };
        let transcript = BatchFrameEncoder::new(config)
            .encode(CountingEnv::new(), &[leaf()], EncodingMode::RichFramed, "alice", false)
            .unwrap();

        assert_eq!(
            transcript.lines()[1],
            format!("@batch={} :znc.in BATCH +{} znc.in/certinfo", id(1), id(2))
        );
    }

    #[test]
    fn custom_source_marker() {
        let config = DisclosureConfig { source: "bouncer.example".into(), ..Default::default() };
        let transcript = BatchFrameEncoder::new(config)
            .encode(CountingEnv::new(), &[], EncodingMode::RichFramed, "alice", false)
            .unwrap();

        assert_eq!(transcript.lines(), [
            format!(":bouncer.example BATCH +{} znc.in/certinfo", id(1)),
            format!(":bouncer.example BATCH -{}", id(1)),
        ]);
    }

    #[test]
    fn empty_chain_flat_says_so() {
        let transcript = BatchFrameEncoder::default()
            .encode(CountingEnv::new(), &[], EncodingMode::FlatFallback, "alice", true)
            .unwrap();

        assert_eq!(transcript.lines(), [NO_CHAIN_LINE.to_owned()]);
        assert_eq!(transcript.channel(), Channel::Feedback);
    }

    #[test]
    fn fallback_disabled_refuses_flat_mode() {
        let config = DisclosureConfig { allow_fallback: false, ..Default::default() };
        let result = BatchFrameEncoder::new(config).encode(
            CountingEnv::new(),
            &[leaf()],
            EncodingMode::FlatFallback,
            "alice",
            true,
        );

        assert!(matches!(result, Err(DisclosureError::FramingNotNegotiated)));
    }

    #[test]
    fn bad_certificate_mid_chain_discards_everything() {
        let chain = [leaf(), Certificate::from_der(vec![0xde, 0xad]), leaf()];
        let result = BatchFrameEncoder::default().encode(
            CountingEnv::new(),
            &chain,
            EncodingMode::RichFramed,
            "alice",
            false,
        );

        assert!(matches!(result, Err(DisclosureError::SerializationFailed { ordinal: 2, .. })));
    }

    #[test]
    fn recipient_with_space_is_rejected() {
        let result = BatchFrameEncoder::default().encode(
            CountingEnv::new(),
            &[leaf()],
            EncodingMode::RichFramed,
            "two words",
            false,
        );

        assert!(matches!(result, Err(DisclosureError::InvalidRecord(_))));
    }
}
