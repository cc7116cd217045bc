// SPDX-License-Identifier: AGPL-3.0-or-later
// This file is part of fib-stark project.
// Copyright (C) 2025  Andrei Kochergin <zeek@tuta.com>
//
// Additional terms under GNU AGPL v3 section 7:
//   You must preserve this notice and the fib-stark
//   attribution in copies of this file or substantial
//   portions of it. See the NOTICE file for details.

//! Proof verification.
//!
//! A gating structural parse is followed by five checks
//! that always all run:
//!
//! 1. structure (gating): required fields present, list
//!    fields are arrays;
//! 2. trace commitment is 64 lowercase hex chars;
//! 3. sampled evaluations are integers in `[0, 2^bits)`;
//! 4. every FRI layer is 64 lowercase hex chars;
//! 5. challenge equals the one recomputed from the
//!    commitment and the proof's security level;
//! 6. proof security level meets the verifier minimum.
//!
//! Only check 5 re-derives anything. The commitment, the
//! evaluations and the layers are checked for shape only,
//! and `result` is not checked at all, so a proof with an
//! altered `result` still verifies. This protocol is not
//! sound and must not be treated as one.

use crate::challenge::challenge_from_parts;
use crate::constraints::fits_bits;
use crate::proof::{DEFAULT_SECURITY_BITS, Proof, REQUIRED_FIELDS};
use crate::utils::{DIGEST_HEX_LEN, is_lower_hex, number_uint};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info, instrument};

pub const MSG_VALID: &str = "Proof is VALID";
pub const MSG_INVALID: &str = "Proof is INVALID";
pub const MSG_STRUCTURE_FAILED: &str = "Proof structure validation failed";

const STRUCTURE_OK: &str = "Proof structure is valid";
const STRUCTURE_BAD: &str = "Invalid proof structure";
const COMMITMENT_OK: &str = "Trace commitment verified";
const COMMITMENT_BAD: &str = "Trace commitment verification failed";
const CONSTRAINTS_OK: &str = "Constraint evaluations verified";
const CONSTRAINTS_BAD: &str = "Constraint evaluation verification failed";
const FRI_OK: &str = "FRI proof layers verified";
const FRI_BAD: &str = "FRI proof layer verification failed";
const CHALLENGE_OK: &str = "Challenge generation verified";
const CHALLENGE_BAD: &str = "Challenge verification failed";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub valid: bool,
    pub message: String,
    pub checks_passed: Vec<String>,
    pub checks_failed: Vec<String>,
}

impl VerificationResult {
    pub fn valid(message: impl Into<String>, checks_passed: Vec<String>) -> Self {
        Self {
            valid: true,
            message: message.into(),
            checks_passed,
            checks_failed: Vec::new(),
        }
    }

    pub fn invalid(message: impl Into<String>, checks_failed: Vec<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
            checks_passed: Vec::new(),
            checks_failed,
        }
    }
}

/// Caller-owned record of completed verifications.
///
/// Only results whose checks ran to the end are
/// appended; structural rejections and faults are not.
#[derive(Clone, Debug, Default)]
pub struct VerificationLog {
    entries: Vec<VerificationResult>,
}

impl VerificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[VerificationResult] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VerificationResult> {
        self.entries.iter()
    }

    fn push(&mut self, r: VerificationResult) {
        self.entries.push(r);
    }
}

/// Reason the structural parse rejected a proof.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedProof {
    #[error("proof is not a JSON object")]
    NotAnObject,
    #[error("missing field '{0}'")]
    MissingField(&'static str),
    #[error("field '{0}' is not an array")]
    NotAnArray(&'static str),
}

/// A field had a scalar type no check can work with.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
enum CheckFault {
    #[error("field '{0}' is not a string")]
    NotAString(&'static str),
    #[error("field '{0}' is not a number")]
    NotANumber(&'static str),
    #[error("proof encoding failed: {0}")]
    Encode(String),
}

/// Borrowed view of a structurally valid proof.
struct ProofFields<'a> {
    trace_commitment: &'a Value,
    constraint_evaluations: &'a [Value],
    challenge: &'a Value,
    fri_layers: &'a [Value],
    security_bits: &'a Value,
}

impl<'a> ProofFields<'a> {
    fn parse(v: &'a Value) -> Result<Self, MalformedProof> {
        let obj = v.as_object().ok_or(MalformedProof::NotAnObject)?;

        for name in REQUIRED_FIELDS {
            if !obj.contains_key(name) {
                return Err(MalformedProof::MissingField(name));
            }
        }

        Ok(Self {
            trace_commitment: field(obj, "trace_commitment")?,
            constraint_evaluations: array(obj, "constraint_evaluations")?,
            challenge: field(obj, "challenge")?,
            fri_layers: array(obj, "fri_layers")?,
            security_bits: field(obj, "security_bits")?,
        })
    }
}

fn field<'a>(obj: &'a Map<String, Value>, name: &'static str) -> Result<&'a Value, MalformedProof> {
    obj.get(name).ok_or(MalformedProof::MissingField(name))
}

fn array<'a>(
    obj: &'a Map<String, Value>,
    name: &'static str,
) -> Result<&'a [Value], MalformedProof> {
    field(obj, name)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or(MalformedProof::NotAnArray(name))
}

// Strings render bare, everything else as JSON.
fn render(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

enum Outcome {
    Completed(VerificationResult),
    Rejected(VerificationResult),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verifier {
    min_security_bits: u32,
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new(DEFAULT_SECURITY_BITS)
    }
}

impl Verifier {
    pub fn new(min_security_bits: u32) -> Self {
        Self { min_security_bits }
    }

    pub fn min_security_bits(&self) -> u32 {
        self.min_security_bits
    }

    /// Verify a typed proof.
    pub fn verify(&self, proof: &Proof) -> VerificationResult {
        match serde_json::to_value(proof) {
            Ok(v) => self.verify_value(&v),
            Err(e) => fault_result(CheckFault::Encode(e.to_string()), Vec::new(), Vec::new()),
        }
    }

    /// Verify an untyped proof, e.g. one read from disk.
    pub fn verify_value(&self, proof: &Value) -> VerificationResult {
        match self.run(proof) {
            Outcome::Completed(r) | Outcome::Rejected(r) => r,
        }
    }

    /// Like [`Self::verify_value`], appending completed
    /// results to `log`.
    pub fn verify_logged(&self, proof: &Value, log: &mut VerificationLog) -> VerificationResult {
        match self.run(proof) {
            Outcome::Completed(r) => {
                log.push(r.clone());
                r
            }
            Outcome::Rejected(r) => r,
        }
    }

    #[instrument(level = "info", skip(self, proof), fields(min_bits = self.min_security_bits))]
    fn run(&self, proof: &Value) -> Outcome {
        let fields = match ProofFields::parse(proof) {
            Ok(f) => f,
            Err(e) => {
                info!(error = %e, "proof structure rejected");

                return Outcome::Rejected(VerificationResult {
                    valid: false,
                    message: MSG_STRUCTURE_FAILED.to_string(),
                    checks_passed: Vec::new(),
                    checks_failed: vec![STRUCTURE_BAD.to_string()],
                });
            }
        };

        let mut passed = vec![STRUCTURE_OK.to_string()];
        let mut failed = Vec::new();

        if let Err(fault) = self.run_checks(&fields, &mut passed, &mut failed) {
            info!(%fault, "verification aborted");
            return Outcome::Rejected(fault_result(fault, passed, failed));
        }

        let valid = failed.is_empty();
        info!(
            valid,
            passed = passed.len(),
            failed = failed.len(),
            "verification finished"
        );

        Outcome::Completed(VerificationResult {
            valid,
            message: (if valid { MSG_VALID } else { MSG_INVALID }).to_string(),
            checks_passed: passed,
            checks_failed: failed,
        })
    }

    fn run_checks(
        &self,
        f: &ProofFields<'_>,
        passed: &mut Vec<String>,
        failed: &mut Vec<String>,
    ) -> Result<(), CheckFault> {
        let mut record = |ok: bool, pass: String, fail: String| {
            let name = if ok { &pass } else { &fail };
            debug!(ok, check = %name, "check");
            if ok {
                passed.push(pass);
            } else {
                failed.push(fail);
            }
        };

        let ok = self.check_commitment(f)?;
        record(ok, COMMITMENT_OK.into(), COMMITMENT_BAD.into());

        let ok = self.check_constraints(f);
        record(ok, CONSTRAINTS_OK.into(), CONSTRAINTS_BAD.into());

        let ok = self.check_fri_layers(f);
        record(ok, FRI_OK.into(), FRI_BAD.into());

        let ok = self.check_challenge(f)?;
        record(ok, CHALLENGE_OK.into(), CHALLENGE_BAD.into());

        let ok = self.check_security(f)?;
        let bits = render(f.security_bits);
        record(
            ok,
            format!("Security level adequate ({bits} bits)"),
            format!("Insufficient security level ({bits} bits)"),
        );

        Ok(())
    }

    // Shape only: there is no trace to recompute from.
    fn check_commitment(&self, f: &ProofFields<'_>) -> Result<bool, CheckFault> {
        let c = f
            .trace_commitment
            .as_str()
            .ok_or(CheckFault::NotAString("trace_commitment"))?;

        Ok(is_lower_hex(c, DIGEST_HEX_LEN))
    }

    fn check_constraints(&self, f: &ProofFields<'_>) -> bool {
        if f.constraint_evaluations.is_empty() {
            return false;
        }

        // full width; non-integers never match
        f.constraint_evaluations.iter().all(|v| match v {
            Value::Number(n) => {
                number_uint(n).is_some_and(|x| fits_bits(&x, self.min_security_bits))
            }
            _ => false,
        })
    }

    fn check_fri_layers(&self, f: &ProofFields<'_>) -> bool {
        if f.fri_layers.is_empty() {
            return false;
        }

        f.fri_layers
            .iter()
            .all(|l| l.as_str().is_some_and(|s| is_lower_hex(s, DIGEST_HEX_LEN)))
    }

    fn check_challenge(&self, f: &ProofFields<'_>) -> Result<bool, CheckFault> {
        let commitment = f
            .trace_commitment
            .as_str()
            .ok_or(CheckFault::NotAString("trace_commitment"))?;

        let expected = challenge_from_parts(commitment, &render(f.security_bits));

        Ok(f.challenge.as_str() == Some(expected.as_str()))
    }

    fn check_security(&self, f: &ProofFields<'_>) -> Result<bool, CheckFault> {
        let Value::Number(n) = f.security_bits else {
            return Err(CheckFault::NotANumber("security_bits"));
        };

        let min = self.min_security_bits;
        let ok = if let Some(b) = n.as_u64() {
            b >= u64::from(min)
        } else if n.is_i64() {
            // negative
            false
        } else {
            n.as_f64().is_some_and(|b| b >= f64::from(min))
        };

        Ok(ok)
    }
}

fn fault_result(
    fault: CheckFault,
    checks_passed: Vec<String>,
    failed: Vec<String>,
) -> VerificationResult {
    let mut checks_failed = Vec::with_capacity(failed.len() + 1);
    checks_failed.push(format!("Exception: {fault}"));
    checks_failed.extend(failed);

    VerificationResult {
        valid: false,
        message: format!("Verification error: {fault}"),
        checks_passed,
        checks_failed,
    }
}

/// Verify `proof` against a minimum security level.
pub fn verify(proof: &Proof, min_security_bits: u32) -> VerificationResult {
    Verifier::new(min_security_bits).verify(proof)
}
