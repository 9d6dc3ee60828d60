//! Armored transport lines reassemble to the canonical PEM.
//!
//! Corpus: a self-signed leaf, every certificate of a three-level chain, and
//! a leaf with a non-ASCII subject.

use base64::{Engine, engine::general_purpose::STANDARD};
use certinfo_core::{
    Certificate,
    serializer::{reassemble, to_pem, transport_block},
};
use certinfo_harness::fixtures;

fn corpus() -> Vec<Certificate> {
    let mut certs = vec![
        fixtures::self_signed_leaf("leaf.example").unwrap(),
        fixtures::non_ascii_leaf().unwrap(),
    ];
    certs.extend(fixtures::three_level_chain().unwrap());
    certs
}

#[test]
fn lines_reassemble_to_canonical_pem() {
    for (index, cert) in corpus().iter().enumerate() {
        let lines = transport_block(cert).unwrap();
        assert_eq!(reassemble(&lines), to_pem(cert).unwrap(), "certificate {index}");
    }
}

#[test]
fn armored_body_decodes_to_original_der() {
    for (index, cert) in corpus().iter().enumerate() {
        let lines = transport_block(cert).unwrap();
        let (header, rest) = lines.split_first().unwrap();
        let (footer, body) = rest.split_last().unwrap();

        assert_eq!(header, "-----BEGIN CERTIFICATE-----");
        assert_eq!(footer, "-----END CERTIFICATE-----");

        let der = STANDARD.decode(body.concat()).unwrap();
        assert_eq!(der, cert.as_der(), "certificate {index}");
    }
}

#[test]
fn transport_lines_are_protocol_legal() {
    for cert in corpus() {
        for line in transport_block(&cert).unwrap() {
            assert!(line.is_ascii());
            assert!(!line.contains(['\r', '\n', '\0']));
        }
    }
}
