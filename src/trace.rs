// SPDX-License-Identifier: AGPL-3.0-or-later
// This file is part of fib-stark project.
// Copyright (C) 2025  Andrei Kochergin <zeek@tuta.com>
//
// Additional terms under GNU AGPL v3 section 7:
//   You must preserve this notice and the fib-stark
//   attribution in copies of this file or substantial
//   portions of it. See the NOTICE file for details.

//! Execution trace of a memoized fibonacci evaluation.
//!
//! Every logical call `fib(k)` produces one [`StepRecord`],
//! appended when the call completes (post-order). A call that
//! finds `k` in the memo table is a [`StepOp::MemoHit`];
//! otherwise the value is computed, memoized and recorded as
//! [`StepOp::FreshCompute`].
//!
//! Evaluation uses an explicit work stack so deep inputs do
//! not grow the native call stack.

use crate::error::{Error, Result};
use crate::utils::json_uint;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOp {
    #[serde(rename = "memo_lookup")]
    MemoHit,
    #[serde(rename = "fib_compute")]
    FreshCompute,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Position in append order.
    #[serde(rename = "step")]
    pub index: usize,
    pub operation: StepOp,
    pub input: u64,
    #[serde(with = "json_uint")]
    pub output: BigUint,
    /// Distance from the root call in index space:
    /// `fib(k-1)` sits one level below `fib(k)`,
    /// `fib(k-2)` two levels below.
    pub depth: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceInputs {
    pub n: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceOutputs {
    #[serde(with = "json_uint")]
    pub result: BigUint,
}

/// Full prover-side trace. Never transmitted;
/// only its commitment leaves the prover.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofTrace {
    pub steps: Vec<StepRecord>,
    pub inputs: TraceInputs,
    pub outputs: TraceOutputs,
}

impl ProofTrace {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    fn record(&mut self, operation: StepOp, input: u64, output: BigUint, depth: u64) {
        let index = self.steps.len();
        self.steps.push(StepRecord {
            index,
            operation,
            input,
            output,
            depth,
        });
    }
}

// Pending work for the explicit stack.
// `Enter` is a call being made, `Combine`
// finishes `k` once both children are done.
#[derive(Clone, Copy, Debug)]
enum Frame {
    Enter { k: u64, depth: u64 },
    Combine { k: u64, depth: u64 },
}

/// Compute `fib(n)` and its execution trace.
///
/// Fails with [`Error::InvalidInput`] for a negative `n`,
/// before any trace work is done. Values are unbounded.
#[instrument(level = "info")]
pub fn compute_trace(n: i64) -> Result<(BigUint, ProofTrace)> {
    let n = u64::try_from(n)
        .map_err(|_| Error::InvalidInput(format!("n must be non-negative (got {n})")))?;

    let mut trace = ProofTrace {
        inputs: TraceInputs { n },
        ..ProofTrace::default()
    };

    let mut memo: BTreeMap<u64, BigUint> = BTreeMap::new();
    let mut stack = vec![Frame::Enter { k: n, depth: 0 }];

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Enter { k, depth } => {
                if let Some(v) = memo.get(&k) {
                    trace.record(StepOp::MemoHit, k, v.clone(), depth);
                    continue;
                }

                if k <= 1 {
                    let v = BigUint::from(k);
                    memo.insert(k, v.clone());
                    trace.record(StepOp::FreshCompute, k, v, depth);
                    continue;
                }

                // LIFO: fib(k-1) completes before fib(k-2) is entered
                stack.push(Frame::Combine { k, depth });
                stack.push(Frame::Enter {
                    k: k - 2,
                    depth: depth + 2,
                });
                stack.push(Frame::Enter {
                    k: k - 1,
                    depth: depth + 1,
                });
            }
            Frame::Combine { k, depth } => {
                let mut v = memo.get(&(k - 1)).cloned().unwrap_or_default();
                if let Some(b) = memo.get(&(k - 2)) {
                    v += b;
                }

                memo.insert(k, v.clone());
                trace.record(StepOp::FreshCompute, k, v, depth);
            }
        }
    }

    let result = memo.remove(&n).unwrap_or_default();
    trace.outputs = TraceOutputs {
        result: result.clone(),
    };

    debug!(n, result_bits = result.bits(), steps = trace.len(), "trace built");

    Ok((result, trace))
}
