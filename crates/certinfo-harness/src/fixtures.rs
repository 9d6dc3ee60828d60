//! Certificate fixtures generated with `rcgen`.
//!
//! Keys and serials are random, so every call yields fresh certificates.
//! Tests compare structure, never bytes across calls.

use certinfo_core::{Certificate, CertificateChain};
use rcgen::{BasicConstraints, CertificateParams, DnType, IsCa, KeyPair};

/// Issuer material for signing the next link of a chain.
struct Issuer {
    cert: rcgen::Certificate,
    key: KeyPair,
}

fn issue(
    common_name: &str,
    subject_alt_names: Vec<String>,
    is_ca: bool,
    issuer: Option<&Issuer>,
) -> Result<Issuer, rcgen::Error> {
    let key = KeyPair::generate()?;
    let mut params = CertificateParams::new(subject_alt_names)?;
    params.distinguished_name.push(DnType::CommonName, common_name.to_string());
    if is_ca {
        params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    }

    let cert = match issuer {
        Some(issuer) => params.signed_by(&key, &issuer.cert, &issuer.key)?,
        None => params.self_signed(&key)?,
    };
    Ok(Issuer { cert, key })
}

fn to_certificate(issued: &Issuer) -> Certificate {
    Certificate::from_der(issued.cert.der().to_vec())
}

/// Self-signed end-entity certificate for `host`.
pub fn self_signed_leaf(host: &str) -> Result<Certificate, rcgen::Error> {
    issue(host, vec![host.to_string()], false, None).map(|issued| to_certificate(&issued))
}

/// Leaf whose subject contains non-ASCII characters.
pub fn non_ascii_leaf() -> Result<Certificate, rcgen::Error> {
    issue("Zürich Prüfstelle ✓ 東京", vec!["zurich.example".to_string()], false, None)
        .map(|issued| to_certificate(&issued))
}

/// Leaf, intermediate and root, in chain order.
pub fn three_level_chain() -> Result<CertificateChain, rcgen::Error> {
    chain_of_depth(3)
}

/// Chain of `depth` certificates: a leaf followed by `depth - 1` CAs, each
/// signed by the next. Depth zero yields an empty chain.
pub fn chain_of_depth(depth: usize) -> Result<CertificateChain, rcgen::Error> {
    match depth {
        0 => return Ok(Vec::new()),
        1 => return self_signed_leaf("leaf.example").map(|leaf| vec![leaf]),
        _ => {},
    }

    let mut issued = Vec::with_capacity(depth);
    let mut issuer = issue("Fixture Root CA", Vec::new(), true, None)?;
    for level in 1..depth - 1 {
        let intermediate =
            issue(&format!("Fixture Intermediate CA {level}"), Vec::new(), true, Some(&issuer))?;
        issued.push(issuer);
        issuer = intermediate;
    }

    let leaf = issue("leaf.example", vec!["leaf.example".to_string()], false, Some(&issuer))?;
    issued.push(issuer);
    issued.push(leaf);

    Ok(issued.iter().rev().map(to_certificate).collect())
}
