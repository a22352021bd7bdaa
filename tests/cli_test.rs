mod helpers;

use std::process::Command;

fn run_binary_in_dir(dir: &std::path::Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_mergepick"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute binary")
}

#[test]
fn test_help_flag() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = run_binary_in_dir(dir.path(), &["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Help flag should succeed");
    for flag in ["--no-stage", "--files", "--theme", "--log-file", "--verbose"] {
        assert!(stdout.contains(flag), "Help should mention {}: {}", flag, stdout);
    }
}

#[test]
fn test_not_a_repo_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = run_binary_in_dir(dir.path(), &[]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success(), "Should fail outside a git repo");
    assert!(
        stderr.to_lowercase().contains("git"),
        "Error should mention git, got: {}",
        stderr
    );
}

#[test]
fn test_no_conflicts_message() {
    let (dir, repo) = helpers::create_temp_repo();
    helpers::commit_file(&repo, "file.txt", "clean\n");
    let output = run_binary_in_dir(dir.path(), &[]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Should succeed with no conflicts");
    assert!(
        stdout.contains("No merge conflicts"),
        "Should report no conflicts, got: {}",
        stdout
    );
}

#[test]
fn test_glob_filters_out_conflicted_files() {
    let (dir, repo) = helpers::create_temp_repo();
    helpers::create_merge_conflict(&repo, "file.txt", "a\n", "b\n", "c\n");

    let output = run_binary_in_dir(dir.path(), &["--files", "*.rs"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("No merge conflicts"), "got: {}", stdout);
}

#[test]
fn test_missing_path_rejected() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = run_binary_in_dir(dir.path(), &["nope.txt"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("does not exist"), "got: {}", stderr);
}

#[test]
fn test_log_file_is_created() {
    let dir = tempfile::TempDir::new().unwrap();
    helpers::write_file(dir.path(), "notes.txt", "plain\n");
    let log_path = dir.path().join("mergepick.log");
    let log_arg = log_path.to_string_lossy().to_string();

    // Filtered to nothing so the TUI never starts
    let output = run_binary_in_dir(
        dir.path(),
        &["--log-file", &log_arg, "--files", "*.rs", "notes.txt"],
    );
    assert!(output.status.success());
    assert!(log_path.exists(), "log file should be created");
}

#[test]
fn test_unknown_flag_rejected() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = run_binary_in_dir(dir.path(), &["--nonexistent-flag"]);
    assert!(!output.status.success(), "Unknown flag should cause failure");
}
