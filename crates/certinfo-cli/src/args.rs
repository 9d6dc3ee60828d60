//! Command-line arguments.

use std::path::PathBuf;

use certinfo_core::{DisclosureConfig, NegotiationState, TaggingScheme};
use clap::{Parser, ValueEnum};

/// Capabilities the simulated client negotiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ClientProfile {
    /// Accepted the capability and supports batches
    #[default]
    Rich,
    /// Accepted the capability but cannot group lines
    NoBatch,
    /// Negotiated nothing
    Plain,
}

impl ClientProfile {
    /// Negotiation state for this profile.
    pub fn negotiation(self) -> NegotiationState {
        match self {
            Self::Rich => NegotiationState::RICH,
            Self::NoBatch => NegotiationState {
                feature_advertised: true,
                feature_accepted: true,
                grouping_supported: false,
            },
            Self::Plain => NegotiationState { feature_advertised: true, ..NegotiationState::default() },
        }
    }
}

/// Show the certificate chain of a TLS server the way a bouncer client
/// would receive it.
#[derive(Debug, Parser)]
#[command(name = "certinfo", version)]
pub struct Args {
    /// Server to connect to
    pub host: Option<String>,

    /// Server port
    #[arg(short, long, default_value_t = 6697)]
    pub port: u16,

    /// Read the chain from a PEM file instead of connecting
    #[arg(long, conflicts_with = "host")]
    pub chain_file: Option<PathBuf>,

    /// Extra trust anchors (PEM) on top of the bundled web roots
    #[arg(long)]
    pub ca_file: Option<PathBuf>,

    /// Nickname the lines are addressed to
    #[arg(short, long, default_value = "certinfo")]
    pub nick: String,

    /// Capabilities the receiving client negotiated
    #[arg(long, value_enum, default_value_t = ClientProfile::Rich)]
    pub client: ClientProfile,

    /// Dump every certificate in flat output, not just the leaf
    #[arg(short, long)]
    pub details: bool,

    /// Tag certificate batches with the chain batch type
    #[arg(long)]
    pub shared_tags: bool,

    /// Source prefix on protocol lines
    #[arg(long, default_value = "znc.in")]
    pub source: String,

    /// Fail instead of sending the flat dump
    #[arg(long)]
    pub no_fallback: bool,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Encoder configuration selected by the flags.
    pub fn config(&self) -> DisclosureConfig {
        DisclosureConfig {
            source: self.source.clone(),
            tagging: if self.shared_tags { TaggingScheme::Shared } else { TaggingScheme::Distinct },
            allow_fallback: !self.no_fallback,
            ..DisclosureConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["certinfo", "irc.libera.chat"]).unwrap();

        assert_eq!(args.host.as_deref(), Some("irc.libera.chat"));
        assert_eq!(args.port, 6697);
        assert_eq!(args.client, ClientProfile::Rich);
        assert_eq!(args.config(), DisclosureConfig::default());
    }

    #[test]
    fn flags_map_to_config() {
        let args = Args::try_parse_from([
            "certinfo",
            "--chain-file",
            "chain.pem",
            "--shared-tags",
            "--no-fallback",
            "--source",
            "bouncer.test",
            "--client",
            "no-batch",
        ])
        .unwrap();
        let config = args.config();

        assert_eq!(config.tagging, TaggingScheme::Shared);
        assert!(!config.allow_fallback);
        assert_eq!(config.source, "bouncer.test");
        assert!(!args.client.negotiation().grouping_supported);
    }

    #[test]
    fn host_and_chain_file_conflict() {
        assert!(Args::try_parse_from(["certinfo", "irc.example", "--chain-file", "x.pem"]).is_err());
    }

    #[test]
    fn plain_profile_did_not_accept() {
        let state = ClientProfile::Plain.negotiation();
        assert!(state.feature_advertised);
        assert!(!state.feature_accepted);
    }
}
