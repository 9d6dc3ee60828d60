//! Framing oracle.
//!
//! Decodes a rich transcript and checks the nesting rules a client relies
//! on:
//!
//! - the first record opens the chain batch, the last closes it
//! - every certificate batch opens inside the chain batch, closes before the
//!   next one opens, and contains only its own certificate lines
//! - no identifier is used for two batches

use std::collections::HashSet;

use certinfo_proto::{BatchId, Record, WireLine};
use thiserror::Error;

/// A nesting rule the transcript broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {reason}")]
pub struct OracleViolation {
    /// 0-based index of the offending line
    pub line: usize,
    /// What went wrong
    pub reason: String,
}

/// One certificate batch as the client sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateBatch {
    /// Batch identifier
    pub id: BatchId,
    /// Batch type tag
    pub kind: String,
    /// Recipient named on each line
    pub recipients: Vec<String>,
    /// Certificate text lines, in order
    pub lines: Vec<String>,
}

/// A verified rich transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramedChain {
    /// Source marker shared by every record
    pub source: String,
    /// Outer batch identifier
    pub id: BatchId,
    /// Outer batch type tag
    pub kind: String,
    /// Certificate batches in order
    pub certificates: Vec<CertificateBatch>,
}

impl FramedChain {
    /// Every identifier in the transcript, outer first.
    pub fn identifiers(&self) -> Vec<&BatchId> {
        std::iter::once(&self.id).chain(self.certificates.iter().map(|c| &c.id)).collect()
    }
}

fn violation(line: usize, reason: impl Into<String>) -> OracleViolation {
    OracleViolation { line, reason: reason.into() }
}

/// Decode and check a rich transcript.
pub fn verify_framing<S: AsRef<str>>(lines: &[S]) -> Result<FramedChain, OracleViolation> {
    let mut decoded = Vec::with_capacity(lines.len());
    for (index, line) in lines.iter().enumerate() {
        let wire = WireLine::decode(line.as_ref()).map_err(|e| violation(index, e.to_string()))?;
        decoded.push(wire);
    }

    let Some((first, rest)) = decoded.split_first() else {
        return Err(violation(0, "empty transcript"));
    };
    let Some((last, body)) = rest.split_last() else {
        return Err(violation(1, "chain batch never closed"));
    };

    let Record::BatchOpen { id: outer, kind, parent: None } = &first.record else {
        return Err(violation(0, "first record must open the chain batch"));
    };
    if last.record != (Record::BatchClose { id: outer.clone(), parent: None }) {
        return Err(violation(lines.len() - 1, "last record must close the chain batch"));
    }

    let mut seen = HashSet::from([outer.clone()]);
    let mut certificates = Vec::new();
    let mut open: Option<CertificateBatch> = None;

    for (offset, wire) in body.iter().enumerate() {
        let index = offset + 1;
        if wire.source != first.source || last.source != first.source {
            return Err(violation(index, "source marker changed mid-transcript"));
        }

        match &wire.record {
            Record::BatchOpen { id, kind, parent: Some(parent) }
                if parent == outer && open.is_none() =>
            {
                if !seen.insert(id.clone()) {
                    return Err(violation(index, format!("identifier {id} reused")));
                }
                open = Some(CertificateBatch {
                    id: id.clone(),
                    kind: kind.clone(),
                    recipients: Vec::new(),
                    lines: Vec::new(),
                });
            },
            Record::CertLine { batch, recipient, payload } => {
                let Some(current) = open.as_mut().filter(|current| current.id == *batch) else {
                    return Err(violation(index, format!("line for batch {batch} outside it")));
                };
                current.recipients.push(recipient.clone());
                current.lines.push(payload.clone());
            },
            Record::BatchClose { id, parent: Some(parent) }
                if parent == outer && open.as_ref().is_some_and(|current| current.id == *id) =>
            {
                certificates.extend(open.take());
            },
            record => {
                return Err(violation(index, format!("unexpected record {record:?}")));
            },
        }
    }

    if open.is_some() {
        return Err(violation(lines.len() - 1, "certificate batch left open"));
    }

    Ok(FramedChain {
        source: first.source.clone(),
        id: outer.clone(),
        kind: kind.clone(),
        certificates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(byte: u8) -> BatchId {
        BatchId::from_bytes([byte; BatchId::RAW_LEN])
    }

    fn encode(record: Record) -> String {
        WireLine::new("znc.in", record).encode().unwrap()
    }

    fn open(id: BatchId, parent: Option<BatchId>) -> String {
        encode(Record::BatchOpen { id, kind: "t".into(), parent })
    }

    fn close(id: BatchId, parent: Option<BatchId>) -> String {
        encode(Record::BatchClose { id, parent })
    }

    fn cert_line(batch: BatchId) -> String {
        encode(Record::CertLine { batch, recipient: "alice".into(), payload: "x".into() })
    }

    #[test]
    fn accepts_well_nested_transcript() {
        let lines = vec![
            open(id(1), None),
            open(id(2), Some(id(1))),
            cert_line(id(2)),
            close(id(2), Some(id(1))),
            close(id(1), None),
        ];
        let chain = verify_framing(&lines).unwrap();
        assert_eq!(chain.certificates.len(), 1);
        assert_eq!(chain.certificates[0].lines, vec!["x"]);
    }

    #[test]
    fn rejects_interleaved_batches() {
        let lines = vec![
            open(id(1), None),
            open(id(2), Some(id(1))),
            open(id(3), Some(id(1))),
            close(id(3), Some(id(1))),
            close(id(2), Some(id(1))),
            close(id(1), None),
        ];
        assert_eq!(verify_framing(&lines).unwrap_err().line, 2);
    }

    #[test]
    fn rejects_reused_identifier() {
        let lines = vec![
            open(id(1), None),
            open(id(1), Some(id(1))),
            close(id(1), Some(id(1))),
            close(id(1), None),
        ];
        assert!(verify_framing(&lines).unwrap_err().reason.contains("reused"));
    }

    #[test]
    fn rejects_close_by_type_name() {
        let lines = vec![
            open(id(1), None),
            open(id(2), Some(id(1))),
            format!("@batch={} :znc.in BATCH -znc.in/certinfo-certificate", id(1)),
            close(id(1), None),
        ];
        assert!(verify_framing(&lines).is_err());
    }
}
