// SPDX-License-Identifier: AGPL-3.0-or-later
// This file is part of fib-stark project.
// Copyright (C) 2025  Andrei Kochergin <zeek@tuta.com>
//
// Additional terms under GNU AGPL v3 section 7:
//   You must preserve this notice and the fib-stark
//   attribution in copies of this file or substantial
//   portions of it. See the NOTICE file for details.

//! Proof record and prover options.
//!
//! [`Proof`] is the only artifact that crosses the
//! prover/verifier boundary. Its serde field names and
//! order are the wire format.

use crate::utils::{json_uint, json_uint_seq};

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

pub const PROOF_VERSION: &str = "1.0";
pub const COMPUTATION: &str = "fibonacci";
pub const DEFAULT_SECURITY_BITS: u32 = 128;

/// Fields the verifier requires before running any check.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "version",
    "computation",
    "result",
    "trace_commitment",
    "constraint_evaluations",
    "challenge",
    "fri_layers",
    "security_bits",
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Proof {
    pub version: String,
    pub computation: String,
    #[serde(with = "json_uint")]
    pub result: BigUint,
    pub trace_commitment: String,
    /// First entries of the full evaluation list.
    #[serde(with = "json_uint_seq")]
    pub constraint_evaluations: Vec<BigUint>,
    pub challenge: String,
    pub fri_layers: Vec<String>,
    /// Seconds since the Unix epoch; informational.
    pub timestamp: f64,
    pub security_bits: u32,
}

impl Proof {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProverOptions {
    /// Security parameter in bits; bounds the
    /// constraint residues and salts the challenge.
    pub security_bits: u32,
}

impl Default for ProverOptions {
    fn default() -> Self {
        Self {
            security_bits: DEFAULT_SECURITY_BITS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Proof {
        Proof {
            version: PROOF_VERSION.into(),
            computation: COMPUTATION.into(),
            result: BigUint::from(55u8),
            trace_commitment: "ab".repeat(32),
            constraint_evaluations: [1u8, 0, 1].into_iter().map(BigUint::from).collect(),
            challenge: "0123456789abcdef".into(),
            fri_layers: vec!["cd".repeat(32); 3],
            timestamp: 1_234_567_890.5,
            security_bits: 128,
        }
    }

    #[test]
    fn wire_field_order() {
        let s = serde_json::to_string(&sample()).unwrap();
        let keys = [
            "\"version\"",
            "\"computation\"",
            "\"result\"",
            "\"trace_commitment\"",
            "\"constraint_evaluations\"",
            "\"challenge\"",
            "\"fri_layers\"",
            "\"timestamp\"",
            "\"security_bits\"",
        ];

        let pos: Vec<usize> = keys.iter().map(|k| s.find(k).unwrap()).collect();
        assert!(pos.windows(2).all(|w| w[0] < w[1]), "json={s}");
    }

    #[test]
    fn pretty_json_roundtrip() {
        let p = sample();
        let s = p.to_json_pretty().unwrap();

        assert!(s.contains("\n  \"result\": 55"));
        assert_eq!(Proof::from_json(&s).unwrap(), p);
    }

    #[test]
    fn wide_values_are_bare_integers() {
        let mut p = sample();
        p.result = "19740274219868223167".parse().unwrap();
        p.constraint_evaluations = vec![BigUint::from(u64::MAX) + 1u8];

        let s = serde_json::to_string(&p).unwrap();
        assert!(s.contains("\"result\":19740274219868223167"), "json={s}");
        assert!(
            s.contains("\"constraint_evaluations\":[18446744073709551616]"),
            "json={s}"
        );

        let back = Proof::from_json(&s).unwrap();
        assert_eq!(back.result, p.result);
        assert_eq!(back.constraint_evaluations, p.constraint_evaluations);
    }

    #[test]
    fn negative_result_is_rejected_on_read() {
        let s = serde_json::to_string(&sample()).unwrap();
        let s = s.replace("\"result\":55", "\"result\":-55");

        assert!(Proof::from_json(&s).is_err());
    }
}
