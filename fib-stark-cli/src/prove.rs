// SPDX-License-Identifier: AGPL-3.0-or-later
// This file is part of fib-stark project.
// Copyright (C) 2025  Andrei Kochergin <zeek@tuta.com>
//
// Additional terms under GNU AGPL v3 section 7:
//   You must preserve this notice and the fib-stark
//   attribution in copies of this file or substantial
//   portions of it. See the NOTICE file for details.

use crate::{CliError, ProveArgs};

use fib_stark::proof::Proof;
use fib_stark::utils::uint_value;
use fib_stark::{ProverOptions, compute_trace, generate_proof};
use std::fs;
use std::path::{Path, PathBuf};

pub fn cmd_prove(args: ProveArgs, json: bool, security_bits: u32) -> Result<(), CliError> {
    let t_start = std::time::Instant::now();
    let opts = ProverOptions { security_bits };

    let (result, trace) = compute_trace(args.n)?;
    let proof = generate_proof(result, &trace, opts.security_bits)?;

    let out_path = args
        .out
        .unwrap_or_else(|| PathBuf::from(default_proof_name(args.n)));

    save_proof(&proof, &out_path)?;

    let elapsed_ms = t_start.elapsed().as_millis();

    if !args.quiet {
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "ok": true,
                    "n": args.n,
                    "result": uint_value(&proof.result),
                    "trace_steps": trace.len(),
                    "trace_commitment": proof.trace_commitment,
                    "challenge": proof.challenge,
                    "fri_layers": proof.fri_layers.len(),
                    "security_bits": proof.security_bits,
                    "proof_path": out_path.to_string_lossy(),
                    "time_ms": elapsed_ms,
                })
            );
        } else {
            println!("fibonacci({}) = {}", args.n, proof.result);
            println!("Trace steps: {}", trace.len());
            println!("Proof details:");
            println!("  - Version: {}", proof.version);
            println!("  - Computation: {}", proof.computation);
            println!("  - Result: {}", proof.result);
            println!("  - Security Level: {} bits", proof.security_bits);
            println!(
                "  - Trace Commitment: {}...",
                &proof.trace_commitment[..16]
            );
            println!("  - Challenge: {}", proof.challenge);
            println!("  - FRI Layers: {}", proof.fri_layers.len());
            println!("Proof saved to {}", out_path.display());
            println!("Time: {elapsed_ms} ms");
        }
    }

    Ok(())
}

fn default_proof_name(n: i64) -> String {
    format!("proof_fib_{n}.json")
}

pub(crate) fn save_proof(proof: &Proof, path: &Path) -> Result<(), CliError> {
    let text = proof
        .to_json_pretty()
        .map_err(|e| CliError::Prover(e.into()))?;

    fs::write(path, text).map_err(|e| CliError::IoPath {
        source: e,
        path: path.to_path_buf(),
    })
}
