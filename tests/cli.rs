//! Command line tests for the domain-scout binary

use assert_cmd::Command;
use predicates::prelude::*;

fn domain_scout() -> Command {
    let mut cmd = Command::cargo_bin("domain-scout").unwrap();
    cmd.env_remove("OPENAI_API_KEY")
        .env_remove("ANTHROPIC_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_flags() {
    domain_scout()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--tld"))
        .stdout(predicate::str::contains("--prompt"))
        .stdout(predicate::str::contains("--names"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--provider"))
        .stdout(predicate::str::contains("--dns-servers"));
}

#[test]
fn test_missing_api_key_without_names_fails() {
    let dir = tempfile::tempdir().unwrap();

    domain_scout()
        .current_dir(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Configuration problem"))
        .stderr(predicate::str::contains("OPENAI_API_KEY"));
}

#[test]
fn test_missing_anthropic_key_names_its_variable() {
    let dir = tempfile::tempdir().unwrap();

    domain_scout()
        .current_dir(dir.path())
        .args(["--provider", "anthropic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ANTHROPIC_API_KEY"));
}

#[test]
fn test_unknown_provider_is_rejected() {
    domain_scout()
        .args(["--provider", "gemini"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("gemini"));
}

#[test]
fn test_invalid_dns_server_is_rejected() {
    domain_scout()
        .args(["--names", "Acme", "--dns-servers", "not-an-ip"])
        .assert()
        .failure()
        .code(2);
}
