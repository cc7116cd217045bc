// SPDX-License-Identifier: AGPL-3.0-or-later
// This file is part of fib-stark project.
// Copyright (C) 2025  Andrei Kochergin <zeek@tuta.com>
//
// Additional terms under GNU AGPL v3 section 7:
//   You must preserve this notice and the fib-stark
//   attribution in copies of this file or substantial
//   portions of it. See the NOTICE file for details.

//! Layered "FRI" digests over the evaluation list.
//!
//! This is a structural stand-in for a folding protocol:
//! no interpolation or degree reduction happens. Each
//! layer hashes a short window of the current list
//! together with the challenge, then the list is halved
//! by keeping every even position.

use crate::utils;

use num_bigint::BigUint;
use tracing::debug;

/// Number of layers in every proof.
pub const FRI_LAYERS: usize = 3;

/// Entries hashed per layer.
pub const FRI_LAYER_WIDTH: usize = 5;

/// Produce exactly [`FRI_LAYERS`] layer digests.
///
/// Never fails; an empty or single-element list is
/// carried through every layer unchanged.
pub fn fold_commit(evaluations: &[BigUint], challenge: &str) -> Vec<String> {
    let mut layers = Vec::with_capacity(FRI_LAYERS);
    let mut current = evaluations.to_vec();

    for layer in 0..FRI_LAYERS {
        let window = &current[..current.len().min(FRI_LAYER_WIDTH)];
        let digest = layer_digest(window, challenge);

        debug!(layer, len = current.len(), %digest, "fri layer");
        layers.push(digest);

        current = fold(current);
    }

    layers
}

/// Keep positions 0, 2, 4, ...; lists of
/// length <= 1 are returned unchanged.
pub fn fold<T>(values: Vec<T>) -> Vec<T> {
    if values.len() <= 1 {
        return values;
    }

    values.into_iter().step_by(2).collect()
}

fn layer_digest(window: &[BigUint], challenge: &str) -> String {
    let mut input = encode_window(window);
    input.push_str(challenge);

    utils::sha256_hex(input.as_bytes())
}

// Canonical JSON array of decimal strings, e.g. `["1", "2"]`.
// Decimal digits never need escaping.
fn encode_window(window: &[BigUint]) -> String {
    let items: Vec<String> = window.iter().map(|v| format!("\"{v}\"")).collect();

    format!("[{}]", items.join(", "))
}
