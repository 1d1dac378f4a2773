//! CLI integration tests
//!
//! Tests the command-line interface end-to-end.

use std::path::PathBuf;
use std::process::{Command, Output};

/// Get path to the collatzbox binary
fn collatzbox_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    path.pop(); // Remove deps/
    path.push("collatzbox");
    path
}

fn run_collatzbox(args: &[&str]) -> Output {
    Command::new(collatzbox_bin())
        .args(args)
        .output()
        .expect("failed to run collatzbox")
}

/// Pull the value of a "key: value" line out of stdout.
fn stdout_field(output: &Output, field: &str) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let prefix = format!("{}: ", field);
    stdout
        .lines()
        .find_map(|line| line.strip_prefix(&prefix))
        .unwrap_or_else(|| panic!("field {:?} missing in output:\n{}", field, stdout))
        .to_string()
}

#[test]
fn test_encrypt_known_vector() {
    let output = run_collatzbox(&["encrypt", "Hello World"]);
    assert!(output.status.success());
    assert_eq!(stdout_field(&output, "ciphertext"), "fde1a9e05ae12fd7dc0018e9");
    assert_eq!(stdout_field(&output, "original_length"), "11");
    assert_eq!(stdout_field(&output, "encrypted_length"), "12");
}

#[test]
fn test_encrypt_decrypt_roundtrip() {
    let output = run_collatzbox(&[
        "encrypt",
        "round trip me",
        "--seed",
        "42",
        "--affine-a",
        "7",
        "--affine-b",
        "13",
        "--trans-key",
        "21",
    ]);
    assert!(output.status.success());
    let ciphertext = stdout_field(&output, "ciphertext");
    let original_length = stdout_field(&output, "original_length");

    let output = run_collatzbox(&[
        "decrypt",
        &ciphertext,
        "--seed",
        "42",
        "--affine-a",
        "7",
        "--affine-b",
        "13",
        "--trans-key",
        "21",
        "--original-length",
        &original_length,
    ]);
    assert!(output.status.success());
    assert_eq!(stdout_field(&output, "plaintext"), "round trip me");
}

#[test]
fn test_roundtrip_via_generated_key() {
    let output = run_collatzbox(&["keygen", "--trans-key-length", "5"]);
    assert!(output.status.success());
    let exported = stdout_field(&output, "exported");
    assert_eq!(stdout_field(&output, "trans_key").len(), 5);

    let output = run_collatzbox(&["encrypt", "via exported key", "--key", &exported]);
    assert!(output.status.success());
    let ciphertext = stdout_field(&output, "ciphertext");
    let original_length = stdout_field(&output, "original_length");

    let output = run_collatzbox(&[
        "decrypt",
        &ciphertext,
        "--key",
        &exported,
        "--original-length",
        &original_length,
    ]);
    assert!(output.status.success());
    assert_eq!(stdout_field(&output, "plaintext"), "via exported key");
}

#[test]
fn test_key_info_derives_inverse() {
    let output = run_collatzbox(&["key-info", "27:5:8:3142"]);
    assert!(output.status.success());
    assert_eq!(stdout_field(&output, "affine_a_inverse"), "205");
    assert_eq!(stdout_field(&output, "modulus"), "256");
}

#[test]
fn test_invalid_affine_a_fails() {
    let output = run_collatzbox(&["encrypt", "text", "--affine-a", "4"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("coprime"), "stderr: {}", stderr);
}

#[test]
fn test_invalid_key_string_fails() {
    let output = run_collatzbox(&["key-info", "27:5:8"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("SEED:A:B:TRANSKEY"), "stderr: {}", stderr);
}

#[test]
fn test_malformed_hex_fails() {
    let output = run_collatzbox(&["decrypt", "not-hex"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("hex"), "stderr: {}", stderr);
}
