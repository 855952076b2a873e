use assert_cmd::Command;

#[test]
fn missing_arguments_is_a_usage_error() {
    let mut cmd = Command::cargo_bin("subnet-checker").unwrap();
    cmd.assert().failure();
}

#[test]
fn help_prints_usage() {
    let mut cmd = Command::cargo_bin("subnet-checker").unwrap();
    cmd.arg("--help");
    cmd.assert().success();
}
