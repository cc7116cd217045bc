// SPDX-License-Identifier: AGPL-3.0-or-later
// This file is part of fib-stark project.
// Copyright (C) 2025  Andrei Kochergin <zeek@tuta.com>
//
// Additional terms under GNU AGPL v3 section 7:
//   You must preserve this notice and the fib-stark
//   attribution in copies of this file or substantial
//   portions of it. See the NOTICE file for details.

//! Hash-commitment proofs for `fibonacci(n) = result`.
//!
//! The prover records a memoized evaluation trace, commits
//! to it, derives a Fiat–Shamir style challenge and emits a
//! fixed set of layer digests. The verifier checks shape and
//! recomputes the challenge. The scheme is a demonstration
//! protocol and is not sound; see the [`mod@verify`] module.

#![forbid(unsafe_code)]

pub mod challenge;
pub mod commit;
pub mod constraints;
pub mod error;
pub mod fri;
pub mod proof;
pub mod prove;
pub mod trace;
pub mod utils;
pub mod verify;

pub use error::{Error, Result};
pub use proof::{Proof, ProverOptions};
pub use prove::{generate_proof, prove_fibonacci};
pub use trace::{ProofTrace, StepOp, StepRecord, compute_trace};
pub use verify::{VerificationLog, VerificationResult, Verifier, verify};
