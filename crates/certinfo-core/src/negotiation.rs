//! Capability negotiation.
//!
//! The session layer advertises one capability token during its handshake
//! and asks the negotiator whether a client's request matches it. At send
//! time the negotiator turns the client's state into an [`EncodingMode`].

/// Capability token clients request to receive certificate batches.
pub const DEFAULT_CAPABILITY: &str = "znc.in/certinfo";

/// Capability state of one client, as tracked by the session layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NegotiationState {
    /// Capability was offered to the client
    pub feature_advertised: bool,
    /// Client requested and was granted the capability
    pub feature_accepted: bool,
    /// Client's transport supports nested batches
    pub grouping_supported: bool,
}

impl NegotiationState {
    /// Client that negotiated everything.
    pub const RICH: Self =
        Self { feature_advertised: true, feature_accepted: true, grouping_supported: true };
}

/// Output format for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingMode {
    /// Nested batches of armored certificate lines
    RichFramed,
    /// Bordered human-readable dump
    FlatFallback,
}

/// Owns the capability token and the mode decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureNegotiator {
    capability: String,
}

impl FeatureNegotiator {
    /// Create a negotiator for `capability`.
    pub fn new(capability: impl Into<String>) -> Self {
        Self { capability: capability.into() }
    }

    /// Token to list during capability advertisement.
    pub fn advertise(&self) -> &str {
        &self.capability
    }

    /// Whether a client's capability request should be granted.
    ///
    /// Only an exact, case-sensitive match is accepted.
    pub fn accept(&self, offer: &str) -> bool {
        offer == self.capability
    }

    /// Choose the encoding mode for a client.
    pub fn decide(&self, state: NegotiationState) -> EncodingMode {
        match (state.feature_accepted, state.grouping_supported) {
            (true, true) => EncodingMode::RichFramed,
            (true, false) => {
                tracing::debug!("capability accepted without batch support");
                EncodingMode::FlatFallback
            },
            (false, _) => EncodingMode::FlatFallback,
        }
    }
}

impl Default for FeatureNegotiator {
    fn default() -> Self {
        Self::new(DEFAULT_CAPABILITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_requires_exact_match() {
        let negotiator = FeatureNegotiator::default();

        assert!(negotiator.accept("znc.in/certinfo"));
        assert!(!negotiator.accept("ZNC.IN/CERTINFO"));
        assert!(!negotiator.accept("znc.in/certinfo/2"));
        assert!(!negotiator.accept("znc.in/certinfo "));
        assert!(!negotiator.accept("batch"));
        assert!(!negotiator.accept(""));
    }

    #[test]
    fn advertise_returns_injected_token() {
        assert_eq!(FeatureNegotiator::new("example.org/chain").advertise(), "example.org/chain");
    }

    #[test]
    fn decision_table() {
        let negotiator = FeatureNegotiator::default();
        let cases = [
            (true, true, EncodingMode::RichFramed),
            (true, false, EncodingMode::FlatFallback),
            (false, true, EncodingMode::FlatFallback),
            (false, false, EncodingMode::FlatFallback),
        ];

        for (accepted, grouping, expected) in cases {
            let state = NegotiationState {
                feature_advertised: true,
                feature_accepted: accepted,
                grouping_supported: grouping,
            };
            assert_eq!(negotiator.decide(state), expected, "accepted={accepted} grouping={grouping}");
        }
    }
}
