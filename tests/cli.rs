// ABOUTME: Integration tests for the firelift CLI surface.
// ABOUTME: Validates --help output and argument validation.

use assert_cmd::Command;
use predicates::prelude::*;

fn firelift_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("firelift"))
}

#[test]
fn help_shows_deploy_command() {
    firelift_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("deploy"));
}

#[test]
fn deploy_help_lists_mode_values() {
    firelift_cmd()
        .args(["deploy", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--ssr"))
        .stdout(predicate::str::contains("cloud-run"))
        .stdout(predicate::str::contains("--preview"));
}

#[test]
fn deploy_requires_project_and_browser_target() {
    firelift_cmd()
        .arg("deploy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--project"))
        .stderr(predicate::str::contains("--browser-target"));
}

#[test]
fn deploy_rejects_malformed_target_reference() {
    firelift_cmd()
        .args(["deploy", "--project", "demo", "--browser-target", "app"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing a ':' separator"));
}
