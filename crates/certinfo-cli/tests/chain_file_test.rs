//! End-to-end runs over PEM chain files.

use std::io::Write;

use certinfo_cli::{Args, CliError, run};
use certinfo_core::{DisclosureError, EncodingMode, serializer::to_pem};
use certinfo_harness::{fixtures, verify_framing};
use clap::Parser;
use tempfile::NamedTempFile;

fn chain_file(depth: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for cert in fixtures::chain_of_depth(depth).unwrap() {
        file.write_all(to_pem(&cert).unwrap().as_bytes()).unwrap();
    }
    file.flush().unwrap();
    file
}

fn args(file: &NamedTempFile, extra: &[&str]) -> Args {
    let path = file.path().to_str().unwrap();
    let mut argv = vec!["certinfo", "--chain-file", path, "--nick", "alice"];
    argv.extend_from_slice(extra);
    Args::try_parse_from(argv).unwrap()
}

fn output_lines(out: &[u8]) -> Vec<String> {
    String::from_utf8(out.to_vec()).unwrap().lines().map(str::to_owned).collect()
}

#[test]
fn rich_client_receives_nested_batches() {
    let file = chain_file(3);
    let mut out = Vec::new();

    let delivery = run(&args(&file, &[]), &mut out).unwrap();

    let lines = output_lines(&out);
    assert_eq!(delivery.mode, EncodingMode::RichFramed);
    assert_eq!(delivery.lines, lines.len());

    let framed = verify_framing(&lines).unwrap();
    assert_eq!(framed.certificates.len(), 3);
    assert!(framed.certificates.iter().all(|c| c.recipients.iter().all(|n| n == "alice")));
}

#[test]
fn plain_client_receives_module_query() {
    let file = chain_file(2);
    let mut out = Vec::new();

    let delivery = run(&args(&file, &["--client", "plain", "--details"]), &mut out).unwrap();

    let lines = output_lines(&out);
    assert_eq!(delivery.mode, EncodingMode::FlatFallback);
    assert!(lines.iter().all(|l| l.starts_with(":*certinfo!znc@znc.in PRIVMSG alice :| ")));
    assert_eq!(lines.iter().filter(|l| l.ends_with(" End ---- |")).count(), 2);
}

#[test]
fn custom_source_prefix() {
    let file = chain_file(1);
    let mut out = Vec::new();

    run(&args(&file, &["--source", "bouncer.test"]), &mut out).unwrap();

    assert_eq!(verify_framing(&output_lines(&out)).unwrap().source, "bouncer.test");
}

#[test]
fn fallback_disabled_fails_with_feedback() {
    let file = chain_file(1);
    let mut out = Vec::new();

    let err = run(&args(&file, &["--client", "no-batch", "--no-fallback"]), &mut out).unwrap_err();

    assert!(matches!(err, CliError::Disclosure(DisclosureError::FramingNotNegotiated)));
    let lines = output_lines(&out);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains(" :Error: "));
}

#[test]
fn empty_pem_file_is_rejected() {
    let file = NamedTempFile::new().unwrap();
    let mut out = Vec::new();

    let err = run(&args(&file, &[]), &mut out).unwrap_err();

    assert!(matches!(err, CliError::NoCertificates(_)));
    assert!(out.is_empty());
}

#[test]
fn missing_source_is_rejected() {
    let args = Args::try_parse_from(["certinfo"]).unwrap();

    assert!(matches!(run(&args, Vec::new()), Err(CliError::NoSource)));
}
