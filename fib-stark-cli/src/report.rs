// SPDX-License-Identifier: AGPL-3.0-or-later
// This file is part of fib-stark project.
// Copyright (C) 2025  Andrei Kochergin <zeek@tuta.com>
//
// Additional terms under GNU AGPL v3 section 7:
//   You must preserve this notice and the fib-stark
//   attribution in copies of this file or substantial
//   portions of it. See the NOTICE file for details.

//! Human-readable verification report.

use fib_stark::VerificationResult;
use std::fmt::Write;

const RULE_WIDTH: usize = 60;

pub fn render_report(r: &VerificationResult) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    // String writes are infallible
    let _ = writeln!(out, "\n{rule}");
    let _ = writeln!(out, "STARK PROOF VERIFICATION REPORT");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "\nStatus: {}", r.message);
    let _ = writeln!(out, "Overall Valid: {}", if r.valid { "YES" } else { "NO" });

    let _ = writeln!(out, "\nChecks Passed ({}):", r.checks_passed.len());
    for c in &r.checks_passed {
        let _ = writeln!(out, "  ✓ {c}");
    }

    if !r.checks_failed.is_empty() {
        let _ = writeln!(out, "\nChecks Failed ({}):", r.checks_failed.len());
        for c in &r.checks_failed {
            let _ = writeln!(out, "  ✗ {c}");
        }
    }

    let _ = writeln!(out, "\n{rule}");

    out
}

pub fn print_report(r: &VerificationResult) {
    print!("{}", render_report(r));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_lists_failures_only_when_present() {
        let ok = VerificationResult::valid("Proof is VALID", vec!["a".into(), "b".into()]);
        let text = render_report(&ok);

        assert!(text.contains("STARK PROOF VERIFICATION REPORT"));
        assert!(text.contains("Overall Valid: YES"));
        assert!(text.contains("Checks Passed (2):"));
        assert!(!text.contains("Checks Failed"));

        let bad = VerificationResult::invalid("Proof is INVALID", vec!["x".into()]);
        let text = render_report(&bad);

        assert!(text.contains("Overall Valid: NO"));
        assert!(text.contains("Checks Failed (1):\n  ✗ x"));
    }
}
