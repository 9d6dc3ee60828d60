//! Record grammar and line encoding.
//!
//! ```text
//! line    = [ "@batch=" id SP ] ":" source SP body
//! body    = "BATCH" SP "+" id SP type
//!         / "BATCH" SP "-" id
//!         / "CERTINFO" SP recipient SP ":" payload
//! ```
//!
//! The `@batch=` tag names the batch the record belongs to. For batch
//! open/close records that is the parent batch; for certificate lines it is
//! the certificate's own batch.

use crate::{
    batch::BatchId,
    errors::{ProtocolError, Result},
    verb::Verb,
};

/// Tag key that carries the enclosing batch reference.
const BATCH_TAG: &str = "batch";

/// One framing instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// Open a batch.
    BatchOpen {
        /// Identifier of the batch being opened
        id: BatchId,
        /// Batch type tag
        kind: String,
        /// Enclosing batch, if nested
        parent: Option<BatchId>,
    },

    /// One line of a certificate's armored text.
    CertLine {
        /// Certificate batch this line belongs to
        batch: BatchId,
        /// Display name of the recipient
        recipient: String,
        /// Line content
        payload: String,
    },

    /// Close a batch.
    BatchClose {
        /// Identifier of the batch being closed
        id: BatchId,
        /// Enclosing batch, if nested
        parent: Option<BatchId>,
    },
}

impl Record {
    /// Batch referenced by the record's `@batch=` tag.
    pub fn tag(&self) -> Option<&BatchId> {
        match self {
            Self::BatchOpen { parent, .. } | Self::BatchClose { parent, .. } => parent.as_ref(),
            Self::CertLine { batch, .. } => Some(batch),
        }
    }

    /// Command word used on the wire.
    pub fn verb(&self) -> Verb {
        match self {
            Self::BatchOpen { .. } | Self::BatchClose { .. } => Verb::Batch,
            Self::CertLine { .. } => Verb::CertInfo,
        }
    }
}

/// A record attributed to a source, i.e. one complete line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireLine {
    /// Origin marker (server name)
    pub source: String,
    /// Framing instruction
    pub record: Record,
}

impl WireLine {
    /// Attribute a record to a source.
    pub fn new(source: impl Into<String>, record: Record) -> Self {
        Self { source: source.into(), record }
    }

    /// Render as a single line, without terminator.
    ///
    /// # Errors
    ///
    /// Rejects tokens with spaces and payloads containing CR, LF or NUL.
    pub fn encode(&self) -> Result<String> {
        check_token("source", &self.source)?;

        let mut line = String::new();
        if let Some(tag) = self.record.tag() {
            line.push('@');
            line.push_str(BATCH_TAG);
            line.push('=');
            line.push_str(tag.as_str());
            line.push(' ');
        }
        line.push(':');
        line.push_str(&self.source);
        line.push(' ');
        line.push_str(self.record.verb().as_str());
        line.push(' ');

        match &self.record {
            Record::BatchOpen { id, kind, .. } => {
                check_token("batch type", kind)?;
                line.push('+');
                line.push_str(id.as_str());
                line.push(' ');
                line.push_str(kind);
            },
            Record::BatchClose { id, .. } => {
                line.push('-');
                line.push_str(id.as_str());
            },
            Record::CertLine { recipient, payload, .. } => {
                check_token("recipient", recipient)?;
                if payload.contains(['\r', '\n', '\0']) {
                    return Err(ProtocolError::IllegalPayload);
                }
                line.push_str(recipient);
                line.push_str(" :");
                line.push_str(payload);
            },
        }

        Ok(line)
    }

    /// Parse one line produced by [`WireLine::encode`].
    pub fn decode(line: &str) -> Result<Self> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);

        let (tag, rest) = match line.strip_prefix('@') {
            Some(tagged) => {
                let (tags, rest) = tagged
                    .split_once(' ')
                    .ok_or(ProtocolError::MalformedLine("tags without message"))?;
                (batch_tag(tags)?, rest)
            },
            None => (None, line),
        };

        let rest = rest.strip_prefix(':').ok_or(ProtocolError::MalformedLine("missing source"))?;
        let (source, rest) =
            rest.split_once(' ').ok_or(ProtocolError::MalformedLine("missing command"))?;
        check_token("source", source)?;
        let (word, args) =
            rest.split_once(' ').ok_or(ProtocolError::MalformedLine("missing arguments"))?;

        let record = match Verb::parse(word)? {
            Verb::Batch => decode_batch(args, tag)?,
            Verb::CertInfo => {
                let (recipient, payload) = args
                    .split_once(" :")
                    .ok_or(ProtocolError::MalformedLine("missing trailing payload"))?;
                check_token("recipient", recipient)?;
                let batch =
                    tag.ok_or(ProtocolError::MalformedLine("certificate line outside a batch"))?;
                Record::CertLine {
                    batch,
                    recipient: recipient.to_owned(),
                    payload: payload.to_owned(),
                }
            },
        };

        Ok(Self { source: source.to_owned(), record })
    }
}

fn decode_batch(args: &str, parent: Option<BatchId>) -> Result<Record> {
    let (reference, kind) = match args.split_once(' ') {
        Some((reference, kind)) => (reference, Some(kind)),
        None => (args, None),
    };

    if let Some(id) = reference.strip_prefix('+') {
        let kind = kind.ok_or(ProtocolError::MalformedLine("batch open without type"))?;
        check_token("batch type", kind)?;
        Ok(Record::BatchOpen { id: BatchId::parse(id)?, kind: kind.to_owned(), parent })
    } else if let Some(id) = reference.strip_prefix('-') {
        if kind.is_some() {
            return Err(ProtocolError::MalformedLine("batch close with extra arguments"));
        }
        Ok(Record::BatchClose { id: BatchId::parse(id)?, parent })
    } else {
        Err(ProtocolError::MalformedLine("batch reference without +/- prefix"))
    }
}

fn batch_tag(tags: &str) -> Result<Option<BatchId>> {
    for tag in tags.split(';') {
        if let Some((key, value)) = tag.split_once('=')
            && key == BATCH_TAG
        {
            return BatchId::parse(value).map(Some);
        }
    }
    Ok(None)
}

fn check_token(field: &'static str, value: &str) -> Result<()> {
    let valid = !value.is_empty()
        && !value.starts_with(':')
        && !value.contains([' ', '\r', '\n', '\0']);

    if valid {
        Ok(())
    } else {
        Err(ProtocolError::InvalidToken { field, value: value.to_owned() })
    }
}
