//! `certinfo` binary.

use std::{io, process::ExitCode};

use certinfo_cli::{Args, run};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    match run(&args, io::stdout().lock()) {
        Ok(delivery) => {
            tracing::debug!(mode = ?delivery.mode, lines = delivery.lines, "done");
            ExitCode::SUCCESS
        },
        Err(err) => {
            tracing::error!(%err, "certinfo failed");
            ExitCode::FAILURE
        },
    }
}
