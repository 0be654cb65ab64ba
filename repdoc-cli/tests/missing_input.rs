use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn missing_input_is_reported_apart() {
    let dir = tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("repdoc");
    cmd.current_dir(dir.path()).arg("absent.md");
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("file 'absent.md' not found"));
    assert!(!dir.path().join("Пояснительная_записка_финальная.docx").exists());
}

#[test]
fn bare_invocation_looks_for_configured_input() {
    let dir = tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("repdoc");
    cmd.current_dir(dir.path());
    cmd.assert().failure().code(1).stderr(predicate::str::contains(
        "file 'Пояснительная_записка_по_примеру.md' not found",
    ));
}

#[test]
fn inspect_missing_file_fails() {
    let dir = tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("repdoc");
    cmd.current_dir(dir.path()).arg("inspect").arg("absent.md");
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}
