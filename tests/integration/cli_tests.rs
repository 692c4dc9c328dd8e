//! CLI integration tests.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn fixture_project(root: &Path) {
    write(
        root,
        "AndroidManifest.xml",
        r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android"
    package="com.example.app">
    <application android:label="@string/app_name" />
</manifest>"#,
    );
    write(
        root,
        "src/Main.java",
        "class Main { int label = R.string.app_name; }\n",
    );
    write(
        root,
        "res/values/strings.xml",
        r#"<resources>
    <string name="app_name">Demo</string>
    <string name="unused_label">Never shown</string>
</resources>"#,
    );
    write(
        root,
        "gen/com/example/app/R.java",
        r#"public final class R {
    public static final class string {
        public static final int app_name=0x7f040000;
        public static final int unused_label=0x7f040001;
    }
}
"#,
    );
}

#[test]
fn test_help() {
    Command::cargo_bin("resweep")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("unused"));
}

#[test]
fn test_version() {
    Command::cargo_bin("resweep")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_invalid_project_root_fails() {
    let temp = TempDir::new().unwrap();

    Command::cargo_bin("resweep")
        .unwrap()
        .arg(temp.path())
        .assert()
        .failure();
}

#[test]
fn test_terminal_report_lists_unused_resources() {
    let temp = TempDir::new().unwrap();
    fixture_project(temp.path());

    Command::cargo_bin("resweep")
        .unwrap()
        .arg(temp.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("unused_label"))
        .stdout(predicate::str::contains("1 unused resources were found"));
}

#[test]
fn test_json_report() {
    let temp = TempDir::new().unwrap();
    fixture_project(temp.path());

    Command::cargo_bin("resweep")
        .unwrap()
        .arg(temp.path())
        .args(["--format", "json", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_unused\": 1"))
        .stdout(predicate::str::contains("\"unused_label\""));
}

#[test]
fn test_matrix_dir_flag_writes_csv() {
    let temp = TempDir::new().unwrap();
    fixture_project(temp.path());

    Command::cargo_bin("resweep")
        .unwrap()
        .arg(temp.path())
        .args(["--matrix-dir", "matrices", "--quiet"])
        .assert()
        .success();

    let csv = fs::read_to_string(temp.path().join("matrices/string.csv")).unwrap();
    assert!(csv.starts_with(",values"));
    assert!(csv.contains("app_name,X"));
}
