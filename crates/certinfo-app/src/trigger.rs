//! Invocation entry points.

/// What caused a disclosure attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// User issued the send command.
    ManualSend {
        /// Dump every certificate instead of only the leaf (flat output only)
        include_full_chain: bool,
    },

    /// Upstream TLS connection finished its handshake.
    OnEncryptedConnect,

    /// Client session authenticated.
    OnSessionAuthenticated,
}

impl Trigger {
    /// Manual triggers report failures to the user; automatic ones stay
    /// silent.
    pub fn is_manual(self) -> bool {
        matches!(self, Self::ManualSend { .. })
    }

    /// Scope requested for flat output.
    pub fn include_full_chain(self) -> bool {
        match self {
            Self::ManualSend { include_full_chain } => include_full_chain,
            Self::OnEncryptedConnect | Self::OnSessionAuthenticated => false,
        }
    }
}
