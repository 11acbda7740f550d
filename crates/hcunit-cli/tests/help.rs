use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to get a Command for the hcunit binary.
#[allow(deprecated)]
fn hcunit_cmd() -> Command {
    Command::cargo_bin("hcunit").unwrap()
}

#[test]
fn help_works() {
    hcunit_cmd().arg("--help").assert().success();
}

#[test]
fn eval_help_lists_flags() {
    hcunit_cmd()
        .args(["eval", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--template"))
        .stdout(predicate::str::contains("--values"))
        .stdout(predicate::str::contains("--policy"))
        .stdout(predicate::str::contains("--namespace"))
        .stdout(predicate::str::contains("--verbose"));
}

#[test]
fn eval_requires_template_and_policy() {
    hcunit_cmd()
        .arg("eval")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--template"));
}
