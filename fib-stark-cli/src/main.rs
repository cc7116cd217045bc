// SPDX-License-Identifier: AGPL-3.0-or-later
// This file is part of fib-stark project.
// Copyright (C) 2025  Andrei Kochergin <zeek@tuta.com>
//
// Additional terms under GNU AGPL v3 section 7:
//   You must preserve this notice and the fib-stark
//   attribution in copies of this file or substantial
//   portions of it. See the NOTICE file for details.

//! Command-line interface for fib-stark.
//!
//! Provides subcommands to prove `fibonacci(n)` into a
//! JSON proof file, verify such a file, and run a short
//! end-to-end demonstration.

#![forbid(unsafe_code)]

mod demo;
mod prove;
mod report;
mod verify;

use clap::{Parser, Subcommand};
use fib_stark::proof::DEFAULT_SECURITY_BITS;
use std::io;
use std::path::PathBuf;
use std::sync::Once;
use thiserror::Error;

static INIT_LOGGING: Once = Once::new();

#[derive(Parser, Debug, Clone)]
#[command(
    name = "fib-stark",
    about = r"# fib-stark CLI

Hash-commitment proofs for fibonacci(n) = result.
Demonstration protocol; proofs are not sound.",
    version
)]
struct Cli {
    /// Global JSON output
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    /// Global log level (trace|debug|info|warn|error)
    #[arg(
        long,
        global = true,
        default_value = "info",
        value_parser = ["trace","debug","info","warn","error"],
    )]
    log_level: String,
    /// Security level in bits: the prover's parameter
    /// and the verifier's minimum.
    /// Can also be set via FIB_STARK_SECURITY_BITS env var.
    #[arg(long, global = true, env = "FIB_STARK_SECURITY_BITS", default_value_t = DEFAULT_SECURITY_BITS)]
    security_bits: u32,
    /// Max proof file size in bytes
    #[arg(long, global = true, default_value_t = 1_048_576)]
    max_bytes: usize,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Compute fibonacci(n) and write a proof file
    Prove(ProveArgs),
    /// Verify a proof file and print a report
    Verify(VerifyArgs),
    /// Prove, verify, tamper and re-verify a few inputs
    Demo,
}

#[derive(clap::Args, Debug, Clone)]
struct ProveArgs {
    /// Fibonacci index to prove
    #[arg(allow_hyphen_values = true)]
    n: i64,
    /// Output path; defaults to proof_fib_<n>.json
    #[arg(long)]
    out: Option<PathBuf>,
    /// Quiet mode (suppress non-essential output)
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

#[derive(clap::Args, Debug, Clone)]
struct VerifyArgs {
    /// Proof file path
    proof: PathBuf,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("prove error: {0}")]
    Prover(#[from] fib_stark::Error),
    #[error("io error: {source}: {path}")]
    IoPath {
        #[source]
        source: io::Error,
        path: PathBuf,
    },
    #[error("invalid JSON in proof file {path}: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
        path: PathBuf,
    },
    #[error("proof rejected: {0}")]
    Rejected(String),
}

impl CliError {
    fn code(&self) -> i32 {
        match self {
            CliError::Rejected(_) => 1,
            CliError::InvalidInput(_) => 2,
            CliError::Prover(fib_stark::Error::InvalidInput(_)) => 2,
            CliError::Json { .. } => 2,
            CliError::IoPath { .. } => 5,
            CliError::Prover(_) => 6,
        }
    }

    // The report for a rejected proof is already on stdout.
    fn reported(&self) -> bool {
        matches!(self, CliError::Rejected(_))
    }
}

fn normalize_security_bits(bits: u32) -> Result<u32, CliError> {
    if bits == 0 {
        return Err(CliError::InvalidInput(
            "invalid --security-bits=0; expected a positive number of bits".to_string(),
        ));
    }

    Ok(bits)
}

fn try_main(cli: Cli) -> Result<(), CliError> {
    let security_bits = normalize_security_bits(cli.security_bits)?;

    match cli.command {
        Command::Prove(args) => prove::cmd_prove(args, cli.json, security_bits),
        Command::Verify(args) => verify::cmd_verify(args, cli.json, cli.max_bytes, security_bits),
        Command::Demo => demo::cmd_demo(cli.json, security_bits),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(Some(&cli.log_level));

    let code = match try_main(cli.clone()) {
        Ok(()) => 0,
        Err(e) => {
            let code = e.code();
            if e.reported() {
                tracing::debug!(error = %e, "exiting");
            } else if cli.json {
                println!(
                    "{}",
                    serde_json::json!({ "ok": false, "error": e.to_string(), "code": code })
                );
            } else {
                eprintln!("error: {e}");
            }

            code
        }
    };

    std::process::exit(code);
}

/// Install the global subscriber once; `level` wins
/// over `RUST_LOG`. Logs go to stderr so stdout stays
/// parseable in `--json` mode.
fn init_logging(level: Option<&str>) {
    INIT_LOGGING.call_once(|| {
        if tracing::dispatcher::has_been_set() {
            return;
        }

        let env = match level {
            Some(l) if !l.is_empty() => l.to_string(),
            _ => std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        };

        let filter = tracing_subscriber::EnvFilter::try_new(env.clone()).unwrap_or_else(|e| {
            eprintln!("WARN: invalid RUST_LOG/log_level '{env}': {e}; falling back to 'info'");
            tracing_subscriber::EnvFilter::new("info")
        });

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .compact()
            .try_init();
    });
}
