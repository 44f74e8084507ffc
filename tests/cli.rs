use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn sample_dir() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "first line\nthe cat sat\nlast line\n").unwrap();
    fs::create_dir(temp_dir.path().join("sub")).unwrap();
    fs::write(temp_dir.path().join("sub").join("b.txt"), "cat\n").unwrap();
    temp_dir
}

fn tool(name: &str, dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(name).unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn minidf_reports_the_current_directory() {
    let dir = sample_dir();
    tool("minidf", &dir)
        .args(["--output-format", "plain", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Space     Free Space      Used Space"))
        .stdout(predicate::str::contains("File: "))
        .stdout(predicate::str::contains("B"));
}

#[test]
fn minidf_missing_path_fails_without_table() {
    let dir = sample_dir();
    tool("minidf", &dir)
        .args(["-f", "does-not-exist"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Total Space").not())
        .stderr(predicate::str::contains("does-not-exist"))
        .stderr(predicate::str::contains("No such file or directory"));
}

#[test]
fn minidf_json_output() {
    let dir = sample_dir();
    let output = tool("minidf", &dir)
        .args(["--output-format", "json", "-f", "."])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(value["total"].as_u64().unwrap() >= value["free"].as_u64().unwrap());
}

#[test]
fn minigrep_prints_matching_lines() {
    let dir = sample_dir();
    tool("minigrep", &dir)
        .args(["--output-format", "plain", "-e", "cat", "-f", "a.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("File: a.txt"))
        .stdout(predicate::str::contains("No    Line"))
        .stdout(predicate::str::contains("2     the cat sat"))
        .stdout(predicate::str::contains("first line").not());
}

#[test]
fn minigrep_without_line_numbers() {
    let dir = sample_dir();
    tool("minigrep", &dir)
        .args(["--output-format", "plain", "-q", "-e", "cat", "-f", "a.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No    Line").not())
        .stdout(predicate::str::contains("the cat sat"));
}

#[test]
fn minigrep_reads_files_from_prompt() {
    let dir = sample_dir();
    tool("minigrep", &dir)
        .args(["--output-format", "plain", "-e", "cat"])
        .write_stdin("a.txt sub/b.txt\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Please provide files to search pattern: cat"))
        .stdout(predicate::str::contains("File: sub/b.txt"))
        .stdout(predicate::str::contains("Please provide").not());
}

#[test]
fn minigrep_no_prompt_without_files() {
    let dir = sample_dir();
    tool("minigrep", &dir)
        .args(["--no-prompt", "-e", "cat"])
        .assert()
        .code(6);
}

#[test]
fn minigrep_directory_argument() {
    let dir = sample_dir();
    tool("minigrep", &dir)
        .args(["-e", "cat", "-f", "sub"])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty());
}

#[test]
fn minigrep_requires_pattern() {
    let dir = sample_dir();
    tool("minigrep", &dir).args(["-f", "a.txt"]).assert().failure();
}

#[test]
fn minils_lists_entries() {
    let dir = sample_dir();
    tool("minils", &dir)
        .args(["--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("name                 permissions     owner      last_modified"))
        .stdout(predicate::str::contains("a.txt"))
        .stdout(predicate::str::contains("b.txt").not())
        .stdout(predicate::str::contains("Directory: ").count(1));
}

#[test]
fn minils_verbose_reports_summary() {
    let dir = sample_dir();
    tool("minils", &dir)
        .args(["--output-format", "plain", "-v", "-r", "-f", "."])
        .assert()
        .success()
        .stderr(predicate::str::contains("INFO: Listed 2 entries under 1 path(s)"));

    tool("minils", &dir)
        .args(["--output-format", "plain", "-f", "."])
        .assert()
        .success()
        .stderr(predicate::str::contains("INFO:").not());
}

#[test]
fn minigrep_warns_on_empty_pattern() {
    let dir = sample_dir();
    tool("minigrep", &dir)
        .args(["--output-format", "plain", "-e", "", "-f", "a.txt"])
        .assert()
        .success()
        .stderr(predicate::str::contains("WARNING: Empty pattern matches every line"))
        .stdout(predicate::str::contains("1     first line"));
}

#[test]
fn minils_recursive_marks_subdirectories() {
    let dir = sample_dir();
    tool("minils", &dir)
        .args(["--output-format", "plain", "-r", "-f", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Directory: ./sub"))
        .stdout(predicate::str::contains("b.txt"));
}

#[test]
fn minils_missing_path() {
    let dir = sample_dir();
    tool("minils", &dir)
        .args(["-f", "nope"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No such file or directory"));
}

#[test]
fn generate_config_writes_file() {
    let dir = sample_dir();
    tool("minils", &dir)
        .args(["--generate-config", "-c", "tools.toml"])
        .assert()
        .success();

    let content = fs::read_to_string(dir.path().join("tools.toml")).unwrap();
    assert!(content.contains("[grep]"));

    tool("minigrep", &dir)
        .args(["-c", "tools.toml", "--output-format", "plain", "-e", "cat", "-f", "a.txt"])
        .assert()
        .success();
}

#[test]
fn invalid_config_is_reported() {
    let dir = sample_dir();
    fs::write(dir.path().join("bad.toml"), "[ls\nrecursive = ").unwrap();
    tool("minils", &dir)
        .args(["-c", "bad.toml"])
        .assert()
        .code(1);
}
