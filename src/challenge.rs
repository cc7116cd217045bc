// SPDX-License-Identifier: AGPL-3.0-or-later
// This file is part of fib-stark project.
// Copyright (C) 2025  Andrei Kochergin <zeek@tuta.com>
//
// Additional terms under GNU AGPL v3 section 7:
//   You must preserve this notice and the fib-stark
//   attribution in copies of this file or substantial
//   portions of it. See the NOTICE file for details.

//! Fiat–Shamir style challenge derivation.
//!
//! The challenge is a pure function of the public
//! transcript (commitment and security level), so a
//! verifier recomputes it without interaction.

use crate::utils;

/// Length of a challenge in hex chars.
pub const CHALLENGE_HEX_LEN: usize = 16;

/// `sha256(commitment || decimal(security_bits))`, truncated.
pub fn derive_challenge(commitment: &str, security_bits: u32) -> String {
    challenge_from_parts(commitment, &security_bits.to_string())
}

/// Same derivation with the security level already
/// rendered; used by the verifier on untyped proofs.
pub(crate) fn challenge_from_parts(commitment: &str, security_bits: &str) -> String {
    let input = format!("{commitment}{security_bits}");
    let mut digest = utils::sha256_hex(input.as_bytes());
    digest.truncate(CHALLENGE_HEX_LEN);

    digest
}

pub fn verify_challenge(commitment: &str, security_bits: u32, provided: &str) -> bool {
    derive_challenge(commitment, security_bits) == provided
}
