//! Certificate serialization.
//!
//! Two renderings of the same certificate:
//!
//! - [`transport_block`]: canonical PEM split into lines, for batch delivery.
//!   Reassembling the lines with [`reassemble`] reproduces the PEM exactly.
//! - [`human_block`]: OpenSSL's text dump inside a bordered frame, with
//!   control characters escaped so the dump cannot smuggle line breaks or
//!   terminal escapes into a line-based transport.

use openssl::x509::X509;

use crate::error::SerializeError;

/// One DER-encoded certificate, as supplied by the TLS layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Certificate(Vec<u8>);

/// Certificates ordered from the peer (leaf) to the root.
pub type CertificateChain = Vec<Certificate>;

impl Certificate {
    /// Wrap DER bytes. No parsing happens until serialization.
    pub fn from_der(der: impl Into<Vec<u8>>) -> Self {
        Self(der.into())
    }

    /// Raw DER bytes.
    pub fn as_der(&self) -> &[u8] {
        &self.0
    }

    fn parse(&self) -> Result<X509, SerializeError> {
        Ok(X509::from_der(&self.0)?)
    }
}

impl From<Vec<u8>> for Certificate {
    fn from(der: Vec<u8>) -> Self {
        Self(der)
    }
}

impl AsRef<[u8]> for Certificate {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Canonical PEM encoding of a certificate.
pub fn to_pem(cert: &Certificate) -> Result<String, SerializeError> {
    Ok(String::from_utf8(cert.parse()?.to_pem()?)?)
}

/// PEM encoding as individual lines.
pub fn transport_block(cert: &Certificate) -> Result<Vec<String>, SerializeError> {
    Ok(split_lines(&to_pem(cert)?))
}

/// Bordered, escaped text dump of a certificate.
///
/// `ordinal` is the 1-based chain position shown in the border.
pub fn human_block(
    cert: &Certificate,
    ordinal: usize,
    is_leaf: bool,
) -> Result<Vec<String>, SerializeError> {
    let text = cert.parse()?.to_text()?;
    let text = String::from_utf8_lossy(&text);
    let body = split_lines(&text);

    let mut block = Vec::with_capacity(body.len() + 2);
    if is_leaf {
        block.push(format!("| ---- Certificate #{ordinal} (Peer Certificate) Start ---- |"));
    } else {
        block.push(format!("| ---- Certificate #{ordinal} Start ---- |"));
    }
    block.extend(body.iter().map(|line| format!("| {}", escape_line(line))));
    block.push(format!("| ---- Certificate #{ordinal} End ---- |"));

    Ok(block)
}

/// Split on `\n`, dropping the single empty element a trailing newline
/// produces. Interior blank lines are kept.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text.split('\n').map(str::to_owned).collect();
    if lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

/// Inverse of [`split_lines`] for newline-terminated text.
pub fn reassemble<S: AsRef<str>>(lines: &[S]) -> String {
    let mut text = String::new();
    for line in lines {
        text.push_str(line.as_ref());
        text.push('\n');
    }
    text
}

/// Escape control characters as `\xHH` and the backslash as `\\`.
///
/// Covers C0, DEL and the C1 range (`U+0080..=U+009F`), so 8-bit CSI cannot
/// reach a terminal either. Other characters pass through unchanged.
pub fn escape_line(line: &str) -> String {
    let mut escaped = String::with_capacity(line.len());
    for c in line.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            c if c.is_control() => escaped.push_str(&format!("\\x{:02X}", u32::from(c))),
            c => escaped.push(c),
        }
    }
    escaped
}
