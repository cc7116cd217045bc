// SPDX-License-Identifier: AGPL-3.0-or-later
// This file is part of fib-stark project.
// Copyright (C) 2025  Andrei Kochergin <zeek@tuta.com>
//
// Additional terms under GNU AGPL v3 section 7:
//   You must preserve this notice and the fib-stark
//   attribution in copies of this file or substantial
//   portions of it. See the NOTICE file for details.

use crate::{CliError, VerifyArgs, report};

use fib_stark::Verifier;
use serde_json::Value;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub fn cmd_verify(
    args: VerifyArgs,
    json: bool,
    max_bytes: usize,
    security_bits: u32,
) -> Result<(), CliError> {
    let t_start = std::time::Instant::now();
    let proof = read_proof(&args.proof, max_bytes)?;

    let verifier = Verifier::new(security_bits);
    let result = verifier.verify_value(&proof);

    let elapsed_ms = t_start.elapsed().as_millis();

    if json {
        println!(
            "{}",
            serde_json::json!({
                "ok": result.valid,
                "message": result.message,
                "checks_passed": result.checks_passed,
                "checks_failed": result.checks_failed,
                "min_security_bits": verifier.min_security_bits(),
                "time_ms": elapsed_ms,
            })
        );
    } else {
        println!("Loaded proof from {}", args.proof.display());
        println!(
            "  - Computation: {}",
            describe(proof.get("computation"))
        );
        println!("  - Result: {}", describe(proof.get("result")));

        report::print_report(&result);
    }

    if result.valid {
        Ok(())
    } else {
        Err(CliError::Rejected(result.message))
    }
}

/// Read and parse a proof file, bounded by `max_bytes`.
///
/// At most `max_bytes + 1` bytes are read, so a file
/// growing while it is read cannot exceed the limit.
pub(crate) fn read_proof(path: &Path, max_bytes: usize) -> Result<Value, CliError> {
    let io_err = |e: std::io::Error| CliError::IoPath {
        source: e,
        path: path.to_path_buf(),
    };

    let file = File::open(path).map_err(io_err)?;
    let limit = u64::try_from(max_bytes).unwrap_or(u64::MAX).saturating_add(1);

    let mut bytes = Vec::new();
    file.take(limit).read_to_end(&mut bytes).map_err(io_err)?;

    if bytes.len() > max_bytes {
        return Err(CliError::InvalidInput(format!(
            "proof file too large: more than {max_bytes} bytes"
        )));
    }

    serde_json::from_slice(&bytes).map_err(|e| CliError::Json {
        source: e,
        path: path.to_path_buf(),
    })
}

fn describe(v: Option<&Value>) -> String {
    match v {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "unknown".to_string(),
    }
}
