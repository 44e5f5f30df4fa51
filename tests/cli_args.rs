//! Integration tests for CLI argument handling
//!
//! Tests subcommand parsing and argument validation from the command line.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_signclass"))
        .args(args)
        .output()
        .expect("Failed to execute signclass")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("signclass"), "Help should mention signclass");
    assert!(
        stdout.contains("classrooms"),
        "Help should list the classrooms subcommand"
    );
    assert!(
        stdout.contains("search"),
        "Help should list the search subcommand"
    );
}

#[test]
fn test_version_flag_exits_successfully() {
    let output = run_cli(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("signclass"));
}

#[test]
fn test_no_subcommand_fails() {
    let output = run_cli(&[]);
    assert!(
        !output.status.success(),
        "Expected missing subcommand to fail"
    );
}

#[test]
fn test_unknown_subcommand_fails() {
    let output = run_cli(&["beaches"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("beaches") || stderr.contains("unrecognized"),
        "Should report the unrecognized subcommand: {}",
        stderr
    );
}

#[test]
fn test_classroom_requires_id() {
    let output = run_cli(&["classroom"]);
    assert!(
        !output.status.success(),
        "Expected classroom without an id to fail"
    );
}

#[test]
fn test_rename_requires_both_arguments() {
    let output = run_cli(&["rename", "cls-42"]);
    assert!(
        !output.status.success(),
        "Expected rename without a new name to fail"
    );
}

#[test]
fn test_search_requires_query_terms() {
    let output = run_cli(&["search"]);
    assert!(
        !output.status.success(),
        "Expected search without terms to fail"
    );
}

#[test]
fn test_subcommand_help_mentions_flags() {
    let output = run_cli(&["signs", "--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("category"),
        "signs --help should mention --category"
    );
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use signclass::cli::{search_query, Cli, Command};

    #[test]
    fn test_cli_games_subcommand() {
        let cli = Cli::parse_from(["signclass", "games"]);
        assert!(matches!(cli.command, Command::Games));
    }

    #[test]
    fn test_cli_publish_takes_two_ids() {
        let cli = Cli::parse_from(["signclass", "publish", "cls-42", "exm-9"]);
        match cli.command {
            Command::Publish {
                classroom_id,
                exam_id,
            } => {
                assert_eq!(classroom_id, "cls-42");
                assert_eq!(exam_id, "exm-9");
            }
            other => panic!("Expected Publish, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_search_with_classroom_flag() {
        let cli = Cli::parse_from(["signclass", "search", "hello", "--classroom", "cls-42"]);
        match cli.command {
            Command::Search { query, classroom } => {
                assert_eq!(query, vec!["hello".to_string()]);
                assert_eq!(classroom.as_deref(), Some("cls-42"));
            }
            other => panic!("Expected Search, got {:?}", other),
        }
    }

    #[test]
    fn test_search_query_validation() {
        assert!(search_query(&["hello".to_string()]).is_ok());
        assert!(search_query(&["  ".to_string()]).is_err());
    }
}
