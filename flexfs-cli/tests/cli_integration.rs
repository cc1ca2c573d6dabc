use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixture() -> TempDir {
    let dir = TempDir::new().expect("create temp test dir");
    fs::create_dir_all(dir.path().join("site/a/sub")).expect("create fixture dirs");
    fs::write(dir.path().join("site/a/b.txt"), "bee").expect("write b.txt");
    fs::write(dir.path().join("site/a/c.log"), "sea").expect("write c.log");
    fs::write(dir.path().join("site/a/sub/d.txt"), "dee").expect("write d.txt");
    dir
}

fn run_flexfs(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_flexfs"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("run flexfs")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn exists_reports_files_only() {
    let dir = fixture();
    let output = run_flexfs(&["--root", "site", "exists", "./a//b.txt"], dir.path());
    assert!(output.status.success(), "process failed: {output:?}");
    assert_eq!(stdout(&output), "true\n");

    let output = run_flexfs(&["--root", "site", "exists", "a"], dir.path());
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stdout(&output), "false\n");
}

#[test]
fn cat_prints_file_content() {
    let dir = fixture();
    let output = run_flexfs(&["--root", "site", "cat", "a/sub/d.txt"], dir.path());
    assert!(output.status.success(), "process failed: {output:?}");
    assert_eq!(stdout(&output), "dee");
}

#[test]
fn cat_missing_file_fails() {
    let dir = fixture();
    let output = run_flexfs(&["--root", "site", "cat", "a/zzz.txt"], dir.path());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Path not found: a/zzz.txt"), "got: {stderr}");
    assert_eq!(stderr.matches("Path not found").count(), 1, "got: {stderr}");
}

#[test]
fn lookup_lists_matches_in_walk_order() {
    let dir = fixture();
    let output = run_flexfs(&["--root", "site", "lookup", "a", r".*\.txt"], dir.path());
    assert!(output.status.success(), "process failed: {output:?}");
    assert_eq!(stdout(&output), "a/b.txt\na/sub/d.txt\n");
}

#[test]
fn find_and_search() {
    let dir = fixture();
    let output = run_flexfs(&["--root", "site", "find", "a", r"\.log$"], dir.path());
    assert_eq!(stdout(&output), "a/c.log\n");

    let output = run_flexfs(
        &["--root", "site", "search", "a", "", "--ignore", "b", "--ext", "txt"],
        dir.path(),
    );
    assert!(output.status.success(), "process failed: {output:?}");
    assert_eq!(stdout(&output), "a/sub/d.txt\n");

    let output = run_flexfs(&["--root", "site", "find", "a", r"\.png$"], dir.path());
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
}

#[test]
fn invalid_pattern_is_reported() {
    let dir = fixture();
    let output = run_flexfs(&["--root", "site", "find", "a", "("], dir.path());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid regexp pattern"), "got: {stderr}");
}

#[test]
fn config_file_supplies_the_root() {
    let dir = fixture();
    fs::write(dir.path().join("flexfs.json"), r#"{ "source": { "root": "site/a" } }"#)
        .expect("write config");
    let output = run_flexfs(&["ls", "sub"], dir.path());
    assert!(output.status.success(), "process failed: {output:?}");
    assert_eq!(stdout(&output), "sub/\nsub/d.txt\n");
}

#[test]
fn embedded_bundle_holds_cli_sources() {
    let dir = fixture();
    let output = run_flexfs(&["--embedded", "search", ".", "cli", "--ext", "rs"], dir.path());
    assert!(output.status.success(), "process failed: {output:?}");
    assert_eq!(stdout(&output), "platform/cli.rs\n");

    let output = run_flexfs(&["--embedded", "exists", "main.rs"], dir.path());
    assert_eq!(stdout(&output), "true\n");
}

#[test]
fn resolve_shows_content_type() {
    let dir = fixture();
    let output = run_flexfs(&["--root", "site", "resolve", "/a/b.txt"], dir.path());
    assert!(output.status.success(), "process failed: {output:?}");
    assert_eq!(stdout(&output), "a/b.txt\ttext/plain; charset=utf-8\t3 bytes\n");

    let output = run_flexfs(&["--root", "site", "resolve", "/"], dir.path());
    assert_eq!(stdout(&output), ".\tdirectory\n");
}

#[test]
fn bad_log_level_is_rejected() {
    let dir = fixture();
    let output = run_flexfs(&["--log-level", "loud", "exists", "x"], dir.path());
    assert_eq!(output.status.code(), Some(1));
}
