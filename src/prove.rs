// SPDX-License-Identifier: AGPL-3.0-or-later
// This file is part of fib-stark project.
// Copyright (C) 2025  Andrei Kochergin <zeek@tuta.com>
//
// Additional terms under GNU AGPL v3 section 7:
//   You must preserve this notice and the fib-stark
//   attribution in copies of this file or substantial
//   portions of it. See the NOTICE file for details.

//! Proof assembly.
//!
//! commitment -> challenge -> evaluations -> layers,
//! bundled with metadata into an immutable [`Proof`].

use crate::challenge::derive_challenge;
use crate::commit::commit_trace;
use crate::constraints::ConstraintEvaluations;
use crate::error::{Error, Result};
use crate::fri::fold_commit;
use crate::proof::{COMPUTATION, PROOF_VERSION, Proof, ProverOptions};
use crate::trace::{ProofTrace, compute_trace};

use num_bigint::BigUint;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, instrument};

/// Build a proof for `result` from its trace.
#[instrument(level = "info", skip(result, trace), fields(steps = trace.len()))]
pub fn generate_proof(result: BigUint, trace: &ProofTrace, security_bits: u32) -> Result<Proof> {
    if security_bits == 0 {
        return Err(Error::InvalidInput("security_bits must be positive".into()));
    }

    let trace_commitment = commit_trace(trace)?;
    let challenge = derive_challenge(&trace_commitment, security_bits);

    let evaluations = ConstraintEvaluations::evaluate(trace, security_bits);
    let fri_layers = fold_commit(evaluations.as_slice(), &challenge);

    debug!(
        evaluations = evaluations.len(),
        %challenge,
        "proof components ready"
    );

    Ok(Proof {
        version: PROOF_VERSION.to_string(),
        computation: COMPUTATION.to_string(),
        result,
        trace_commitment,
        constraint_evaluations: evaluations.sample(),
        challenge,
        fri_layers,
        timestamp: now_secs(),
        security_bits,
    })
}

/// Compute `fib(n)` and prove it in one go.
pub fn prove_fibonacci(n: i64, opts: &ProverOptions) -> Result<(Proof, ProofTrace)> {
    let (result, trace) = compute_trace(n)?;
    let proof = generate_proof(result, &trace, opts.security_bits)?;

    Ok((proof, trace))
}

fn now_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
