// SPDX-License-Identifier: AGPL-3.0-or-later
// This file is part of fib-stark project.
// Copyright (C) 2025  Andrei Kochergin <zeek@tuta.com>
//
// Additional terms under GNU AGPL v3 section 7:
//   You must preserve this notice and the fib-stark
//   attribution in copies of this file or substantial
//   portions of it. See the NOTICE file for details.

use num_bigint::BigUint;
use serde_json::{Number, Value};
use sha2::{Digest, Sha256};
use std::str::FromStr;

/// Length of a hex-rendered SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// SHA-256 of `bytes` as 64 lowercase hex chars.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);

    hex::encode(hasher.finalize())
}

/// True when `s` is exactly `len` chars of `[0-9a-f]`.
#[inline]
pub fn is_lower_hex(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Exact JSON number for `v`.
pub fn uint_number(v: &BigUint) -> serde_json::Result<Number> {
    Number::from_str(&v.to_string())
}

/// `v` as a bare JSON integer; decimal string
/// if the number cannot be represented.
pub fn uint_value(v: &BigUint) -> Value {
    uint_number(v).map_or_else(|_| Value::String(v.to_string()), Value::Number)
}

/// Non-negative integer held by `n`, at full width.
/// Fractions, exponents and negatives yield `None`.
pub fn number_uint(n: &Number) -> Option<BigUint> {
    BigUint::from_str(&n.to_string()).ok()
}

/// Serde adapter: [`BigUint`] as a bare JSON integer.
pub mod json_uint {
    use super::{number_uint, uint_number};

    use num_bigint::BigUint;
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Number;

    pub fn serialize<S: Serializer>(v: &BigUint, s: S) -> Result<S::Ok, S::Error> {
        uint_number(v).map_err(S::Error::custom)?.serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<BigUint, D::Error> {
        let n = Number::deserialize(d)?;
        number_uint(&n)
            .ok_or_else(|| D::Error::custom(format!("expected a non-negative integer, got {n}")))
    }
}

/// Serde adapter: `Vec<BigUint>` as an array of bare JSON integers.
pub mod json_uint_seq {
    use super::{number_uint, uint_number};

    use num_bigint::BigUint;
    use serde::de::Error as _;
    use serde::ser::{Error as _, SerializeSeq};
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Number;

    pub fn serialize<S: Serializer>(vs: &[BigUint], s: S) -> Result<S::Ok, S::Error> {
        let mut seq = s.serialize_seq(Some(vs.len()))?;
        for v in vs {
            seq.serialize_element(&uint_number(v).map_err(S::Error::custom)?)?;
        }

        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<BigUint>, D::Error> {
        Vec::<Number>::deserialize(d)?
            .iter()
            .map(|n| {
                number_uint(n).ok_or_else(|| {
                    D::Error::custom(format!("expected a non-negative integer, got {n}"))
                })
            })
            .collect()
    }
}
