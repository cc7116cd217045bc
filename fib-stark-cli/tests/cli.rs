// SPDX-License-Identifier: AGPL-3.0-or-later
// This file is part of fib-stark project.
// Copyright (C) 2025  Andrei Kochergin <zeek@tuta.com>
//
// Additional terms under GNU AGPL v3 section 7:
//   You must preserve this notice and the fib-stark
//   attribution in copies of this file or substantial
//   portions of it. See the NOTICE file for details.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn bin() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fib-stark"));
    cmd.env_remove("FIB_STARK_SECURITY_BITS");
    cmd.args(["--log-level", "error"]);

    cmd
}

fn prove_to(n: &str, path: &str) {
    let mut cmd = bin();
    cmd.args(["prove", n, "--out", path, "--quiet"]);
    cmd.assert().success();
}

#[test]
fn prove_and_verify_ok() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    let path = tmp.path().to_str().unwrap().to_string();

    prove_to("10", &path);

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"result\": 55"), "proof: {text}");

    let mut cmd = bin();
    cmd.args(["verify", &path, "--json"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"ok\":true"))
        .stdout(predicate::str::contains("Challenge generation verified"));
}

#[test]
fn prove_and_verify_past_u64() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    let path = tmp.path().to_str().unwrap().to_string();

    let mut cmd = bin();
    cmd.args(["prove", "100", "--out", &path, "--json"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"result\":354224848179261915075"));

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"result\": 354224848179261915075"), "proof: {text}");

    let mut cmd = bin();
    cmd.args(["verify", &path, "--json"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"ok\":true"))
        .stdout(predicate::str::contains("\"min_security_bits\":128"));
}

#[test]
fn prove_prints_details() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    let path = tmp.path().to_str().unwrap().to_string();

    let mut cmd = bin();
    cmd.args(["prove", "7", "--out", &path]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("fibonacci(7) = 13"))
        .stdout(predicate::str::contains("FRI Layers: 3"));
}

#[test]
fn verify_report_for_valid_proof() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    let path = tmp.path().to_str().unwrap().to_string();
    prove_to("5", &path);

    let mut cmd = bin();
    cmd.args(["verify", &path]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("STARK PROOF VERIFICATION REPORT"))
        .stdout(predicate::str::contains("Overall Valid: YES"));
}

#[test]
fn tampered_result_still_verifies() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    let path = tmp.path().to_str().unwrap().to_string();
    prove_to("10", &path);

    let text = std::fs::read_to_string(&path).unwrap();
    let mut v: serde_json::Value = serde_json::from_str(&text).unwrap();
    v["result"] = serde_json::json!(56);
    std::fs::write(&path, serde_json::to_string_pretty(&v).unwrap()).unwrap();

    let mut cmd = bin();
    cmd.args(["verify", &path, "--json"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"ok\":true"));
}

#[test]
fn verify_missing_fri_layers_exit_1() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    let path = tmp.path().to_str().unwrap().to_string();
    prove_to("6", &path);

    let text = std::fs::read_to_string(&path).unwrap();
    let mut v: serde_json::Value = serde_json::from_str(&text).unwrap();
    v.as_object_mut().unwrap().remove("fri_layers");
    std::fs::write(&path, v.to_string()).unwrap();

    let mut cmd = bin();
    cmd.args(["verify", &path, "--json"]);
    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("Proof structure validation failed"));
}

#[test]
fn verify_insufficient_security_exit_1() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    let path = tmp.path().to_str().unwrap().to_string();

    let mut cmd = bin();
    cmd.args(["--security-bits", "64", "prove", "9", "--out", &path, "--quiet"]);
    cmd.assert().success();

    let mut cmd = bin();
    cmd.args(["verify", &path]);
    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("Insufficient security level (64 bits)"));
}

#[test]
fn verify_missing_file_json() {
    let mut cmd = bin();
    cmd.args(["verify", "no/such/proof.json", "--json"]);
    cmd.assert()
        .code(5)
        .stdout(predicate::str::contains("\"ok\":false"))
        .stdout(predicate::str::contains("\"code\":5"));
}

#[test]
fn verify_bad_json_fails() {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(&mut tmp, b"{\"version\": ").unwrap();
    let path = tmp.path().to_str().unwrap().to_string();

    let mut cmd = bin();
    cmd.args(["verify", &path, "--json"]);
    cmd.assert()
        .code(2)
        .stdout(predicate::str::contains("invalid JSON"));
}

#[test]
fn verify_too_big_file_limit() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    let path = tmp.path().to_str().unwrap().to_string();
    prove_to("4", &path);

    let mut cmd = bin();
    cmd.args(["--max-bytes", "1", "verify", &path, "--json"]);
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("\"ok\":false"))
        .stdout(predicate::str::contains("file too large"));
}

#[test]
fn prove_negative_n_fails() {
    let mut cmd = bin();
    cmd.args(["prove", "-1", "--json"]);
    cmd.assert()
        .code(2)
        .stdout(predicate::str::contains("non-negative"));
}

#[test]
fn demo_reports_success_and_undetected_tamper() {
    let mut cmd = bin();
    cmd.arg("demo");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("WARNING: Tampering was NOT detected!"))
        .stdout(predicate::str::contains("fibonacci(15) =    610 - Proof: ✓ VALID"))
        .stdout(predicate::str::contains("ALL PROOFS VERIFIED SUCCESSFULLY"));
}

#[test]
fn demo_json() {
    let mut cmd = bin();
    cmd.args(["demo", "--json"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"tampered_result_detected\":false"))
        .stdout(predicate::str::contains("\"verifications\":5"))
        .stdout(predicate::str::contains("\"accepted\":5"));
}
