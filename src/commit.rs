// SPDX-License-Identifier: AGPL-3.0-or-later
// This file is part of fib-stark project.
// Copyright (C) 2025  Andrei Kochergin <zeek@tuta.com>
//
// Additional terms under GNU AGPL v3 section 7:
//   You must preserve this notice and the fib-stark
//   attribution in copies of this file or substantial
//   portions of it. See the NOTICE file for details.

//! Canonical encoding and trace commitment.
//!
//! The canonical form is JSON with object keys sorted,
//! sequence order preserved, `", "` between items and
//! `": "` after keys. Values are routed through
//! [`serde_json::Value`], whose map type keeps keys
//! ordered, so field declaration order never leaks
//! into the encoding.

use crate::error::Result;
use crate::trace::ProofTrace;
use crate::utils;

use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;
use tracing::{debug, instrument};

/// JSON formatter emitting `", "` and `": "` separators.
#[derive(Clone, Copy, Debug, Default)]
pub struct CanonicalFormatter;

impl Formatter for CanonicalFormatter {
    #[inline]
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    #[inline]
    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    #[inline]
    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Canonical byte encoding of any serializable value.
pub fn canonical_bytes<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    let sorted = serde_json::to_value(value)?;

    let mut out = Vec::with_capacity(128);
    let mut ser = serde_json::Serializer::with_formatter(&mut out, CanonicalFormatter);
    sorted.serialize(&mut ser)?;

    Ok(out)
}

/// Commit to the full trace: SHA-256 of its
/// canonical encoding, as 64 lowercase hex chars.
#[instrument(level = "debug", skip(trace), fields(steps = trace.len()))]
pub fn commit_trace(trace: &ProofTrace) -> Result<String> {
    let bytes = canonical_bytes(trace)?;
    let commitment = utils::sha256_hex(&bytes);

    debug!(encoded_len = bytes.len(), %commitment, "trace committed");

    Ok(commitment)
}
