//! CLI integration tests for the offline commands.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

const FIXTURE_SIGNATURE: &str = "117b549016521c7c414cf976a10224f31c3cc3047d7982a86c9167eda3fa43b6";
const WEBHOOK_PAYLOAD: &str = r#"{"event":"payment.completed","payment_id":"pay_123"}"#;
const WEBHOOK_SIGNATURE: &str = "8785c9fb8c94476e982ed383dc806c0380b87c3148bb24f8407ddf7e17e470b3";

fn paycrypt() -> Command {
    let mut cmd = Command::cargo_bin("paycrypt").unwrap();
    cmd.env_remove("PAYCRYPT_API_KEY")
        .env_remove("PAYCRYPT_API_SECRET")
        .env_remove("PAYCRYPT_WEBHOOK_SECRET");
    cmd
}

#[test]
fn sign_prints_pinned_signature() {
    paycrypt()
        .args([
            "sign",
            "--api-key",
            "pk_test",
            "--api-secret",
            "testsecret",
            "--method",
            "post",
            "--path",
            "/payments",
            "--body",
            r#"{"currency": "USD", "amount": 100}"#,
            "--timestamp",
            "1700000000000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"POST/payments{"amount":100,"currency":"USD"}1700000000000"#,
        ))
        .stdout(predicate::str::contains(FIXTURE_SIGNATURE));
}

#[test]
fn sign_json_output_reads_credentials_from_env() {
    let output = paycrypt()
        .env("PAYCRYPT_API_KEY", "pk_env")
        .env("PAYCRYPT_API_SECRET", "testsecret")
        .args([
            "--format",
            "json",
            "sign",
            "--path",
            "/account",
            "--timestamp",
            "1700000000000",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["signing_string"], "GET/account{}1700000000000");
    assert_eq!(json["headers"]["X-API-Key"], "pk_env");
    assert_eq!(json["headers"]["X-Timestamp"], "1700000000000");
    assert_eq!(
        json["headers"]["X-Signature"],
        "b234a0ac9bbaa5558953e01fec850ad5028fa3da9801d1f6a3fe45a13ee60474"
    );
}

#[test]
fn sign_rejects_missing_secret() {
    paycrypt()
        .args(["sign", "--api-key", "pk", "--api-secret", "", "--path", "/account"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid credentials"));
}

#[test]
fn sign_rejects_invalid_body() {
    paycrypt()
        .args([
            "sign",
            "--api-key",
            "pk",
            "--api-secret",
            "sk",
            "--method",
            "POST",
            "--path",
            "/payments",
            "--body",
            "{not json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--body is not valid JSON"));
}

#[test]
fn verify_webhook_accepts_valid_signature() {
    paycrypt()
        .args([
            "verify-webhook",
            "--secret",
            "whsec_test",
            "--signature",
            WEBHOOK_SIGNATURE,
            "--payload",
            WEBHOOK_PAYLOAD,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("signature is valid"));
}

#[test]
fn verify_webhook_rejects_tampered_payload() {
    paycrypt()
        .args([
            "verify-webhook",
            "--secret",
            "whsec_test",
            "--signature",
            WEBHOOK_SIGNATURE,
            "--payload",
            r#"{"event":"payment.completed","payment_id":"pay_124"}"#,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid"));
}

#[test]
fn verify_webhook_reads_payload_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(WEBHOOK_PAYLOAD.as_bytes()).unwrap();

    paycrypt()
        .env("PAYCRYPT_WEBHOOK_SECRET", "whsec_test")
        .args(["--format", "json", "verify-webhook", "--signature", WEBHOOK_SIGNATURE, "--file"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""valid": true"#));
}

#[test]
fn verify_webhook_malformed_signature_is_invalid_not_error() {
    paycrypt()
        .args([
            "verify-webhook",
            "--secret",
            "whsec_test",
            "--signature",
            "not-hex",
            "--payload",
            WEBHOOK_PAYLOAD,
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:").not());
}

#[test]
fn api_commands_require_credentials() {
    paycrypt()
        .args(["account"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("PAYCRYPT_API_KEY"));
}
