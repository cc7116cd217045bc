// SPDX-License-Identifier: AGPL-3.0-or-later
// This file is part of fib-stark project.
// Copyright (C) 2025  Andrei Kochergin <zeek@tuta.com>
//
// Additional terms under GNU AGPL v3 section 7:
//   You must preserve this notice and the fib-stark
//   attribution in copies of this file or substantial
//   portions of it. See the NOTICE file for details.

//! Constraint "evaluations": each step output reduced
//! into `[0, 2^security_bits)`.

use crate::trace::ProofTrace;

use num_bigint::BigUint;
use num_traits::One;

/// Number of evaluations carried in a proof.
pub const EVAL_SAMPLE_LEN: usize = 10;

/// Full evaluation list, one entry per trace step.
///
/// Only the prover holds it. Folding consumes the whole
/// list; the proof carries [`Self::sample`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConstraintEvaluations {
    values: Vec<BigUint>,
}

impl ConstraintEvaluations {
    pub fn evaluate(trace: &ProofTrace, security_bits: u32) -> Self {
        let values = trace
            .steps
            .iter()
            .map(|s| reduce(&s.output, security_bits))
            .collect();

        Self { values }
    }

    pub fn as_slice(&self) -> &[BigUint] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Prefix of at most [`EVAL_SAMPLE_LEN`] entries.
    pub fn sample(&self) -> Vec<BigUint> {
        self.values.iter().take(EVAL_SAMPLE_LEN).cloned().collect()
    }
}

/// `v mod 2^bits`.
pub fn reduce(v: &BigUint, bits: u32) -> BigUint {
    if fits_bits(v, bits) {
        return v.clone();
    }

    v % (BigUint::one() << bits)
}

/// True when `v < 2^bits`.
#[inline]
pub fn fits_bits(v: &BigUint, bits: u32) -> bool {
    v.bits() <= u64::from(bits)
}
