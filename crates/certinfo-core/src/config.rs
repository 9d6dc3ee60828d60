//! Encoder configuration.

use certinfo_proto::{CERTIFICATE_BATCH_TYPE, CHAIN_BATCH_TYPE};

use crate::negotiation::DEFAULT_CAPABILITY;

/// How inner batches are typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaggingScheme {
    /// Inner batches use the per-certificate type tag
    #[default]
    Distinct,
    /// Inner batches reuse the chain type tag
    Shared,
}

/// Disclosure configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisclosureConfig {
    /// Origin marker on every record
    pub source: String,
    /// Capability token clients must request
    pub capability: String,
    /// Type tag of the outer batch
    pub chain_batch_type: String,
    /// Type tag of the inner batches under [`TaggingScheme::Distinct`]
    pub certificate_batch_type: String,
    /// Inner batch typing
    pub tagging: TaggingScheme,
    /// Send a readable dump to clients without batch support instead of
    /// failing
    pub allow_fallback: bool,
}

impl DisclosureConfig {
    /// Type tag applied to each certificate's batch.
    pub fn inner_batch_type(&self) -> &str {
        match self.tagging {
            TaggingScheme::Distinct => &self.certificate_batch_type,
            TaggingScheme::Shared => &self.chain_batch_type,
        }
    }
}

impl Default for DisclosureConfig {
    fn default() -> Self {
        Self {
            source: "znc.in".to_owned(),
            capability: DEFAULT_CAPABILITY.to_owned(),
            chain_batch_type: CHAIN_BATCH_TYPE.to_owned(),
            certificate_batch_type: CERTIFICATE_BATCH_TYPE.to_owned(),
            tagging: TaggingScheme::Distinct,
            allow_fallback: true,
        }
    }
}
