//! Terminal stand-in for a connected client.

use std::io::{self, Write};

use certinfo_core::{NegotiationState, Peer};

/// Prefix of the module's private-query messages.
pub const MODULE_MASK: &str = "*certinfo!znc@znc.in";

/// Writes protocol lines verbatim and feedback as module query messages.
///
/// [`Peer`] methods cannot fail, so the first write error is kept and
/// reported by [`WriterPeer::finish`].
#[derive(Debug)]
pub struct WriterPeer<W> {
    nick: String,
    state: NegotiationState,
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> WriterPeer<W> {
    /// Create a peer writing to `out`.
    pub fn new(nick: impl Into<String>, state: NegotiationState, out: W) -> Self {
        Self { nick: nick.into(), state, out, error: None }
    }

    /// Flush and return the writer, or the first write error.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_line(&mut self, line: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = writeln!(self.out, "{line}") {
            self.error = Some(err);
        }
    }
}

impl<W: Write> Peer for WriterPeer<W> {
    fn display_name(&self) -> &str {
        &self.nick
    }

    fn negotiation(&self) -> NegotiationState {
        self.state
    }

    fn put_raw(&mut self, line: String) {
        self.write_line(&line);
    }

    fn put_feedback(&mut self, line: String) {
        let message = format!(":{MODULE_MASK} PRIVMSG {} :{line}", self.nick);
        self.write_line(&message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_lines_are_verbatim() {
        let mut peer = WriterPeer::new("alice", NegotiationState::RICH, Vec::new());
        peer.put_raw(":znc.in BATCH +abc znc.in/certinfo".into());

        let out = peer.finish().unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), ":znc.in BATCH +abc znc.in/certinfo\n");
    }

    #[test]
    fn feedback_is_a_module_query() {
        let mut peer = WriterPeer::new("alice", NegotiationState::default(), Vec::new());
        peer.put_feedback("| hello".into());

        let out = peer.finish().unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            ":*certinfo!znc@znc.in PRIVMSG alice :| hello\n"
        );
    }

    #[derive(Debug)]
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn first_write_error_is_reported() {
        let mut peer = WriterPeer::new("alice", NegotiationState::RICH, BrokenPipe);
        peer.put_raw("one".into());
        peer.put_raw("two".into());

        let err = peer.finish().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
