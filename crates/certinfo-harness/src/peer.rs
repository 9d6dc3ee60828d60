//! Recording client double.

use certinfo_core::{NegotiationState, Peer};

/// Client that records everything queued for it.
#[derive(Debug, Clone, Default)]
pub struct RecordingPeer {
    /// Nickname
    pub nick: String,
    /// Negotiated capability state
    pub state: NegotiationState,
    /// Lines queued on the protocol stream
    pub raw: Vec<String>,
    /// Lines queued on the feedback channel
    pub feedback: Vec<String>,
}

impl RecordingPeer {
    /// Client with an explicit capability state.
    pub fn with_state(nick: &str, state: NegotiationState) -> Self {
        Self { nick: nick.to_owned(), state, ..Self::default() }
    }

    /// Client that negotiated the capability and batches.
    pub fn rich(nick: &str) -> Self {
        Self::with_state(nick, NegotiationState::RICH)
    }

    /// Client that negotiated nothing.
    pub fn plain(nick: &str) -> Self {
        Self::with_state(nick, NegotiationState::default())
    }

    /// True if nothing was queued on either channel.
    pub fn is_silent(&self) -> bool {
        self.raw.is_empty() && self.feedback.is_empty()
    }
}

impl Peer for RecordingPeer {
    fn display_name(&self) -> &str {
        &self.nick
    }

    fn negotiation(&self) -> NegotiationState {
        self.state
    }

    fn put_raw(&mut self, line: String) {
        self.raw.push(line);
    }

    fn put_feedback(&mut self, line: String) {
        self.feedback.push(line);
    }
}
