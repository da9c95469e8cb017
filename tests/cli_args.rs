//! Integration tests for CLI argument handling
//!
//! Exercises the compiled binary for argument/help behavior and the library
//! CLI parser for command structure. Network-touching subcommands are not run
//! here; the service behavior is covered by `service_flow.rs` against a mock
//! source.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_hostwatch"))
        .args(args)
        .output()
        .expect("Failed to execute hostwatch")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("hostwatch"), "Help should mention hostwatch");
    assert!(stdout.contains("regions"), "Help should list the regions subcommand");
    assert!(stdout.contains("watch"), "Help should list the watch subcommand");
}

#[test]
fn test_missing_subcommand_fails() {
    let output = run_cli(&[]);
    assert!(
        !output.status.success(),
        "Expected bare invocation to ask for a subcommand"
    );
}

#[test]
fn test_unknown_subcommand_fails() {
    let output = run_cli(&["frobnicate"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("unrecognized") || stderr.contains("error"),
        "Should print a parse error: {}",
        stderr
    );
}

#[test]
fn test_status_runs_offline() {
    // Status only reads the (empty) in-process cache; no upstream request
    let output = run_cli(&["status"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Regions cached"), "stdout: {}", stdout);
}

#[cfg(test)]
mod unit_tests {
    //! Parser-level tests that don't require running the binary

    use clap::Parser;
    use hostwatch::cli::{Cli, Command};

    #[test]
    fn test_regions_defaults_to_public_only() {
        let cli = Cli::parse_from(["hostwatch", "regions"]);
        assert!(matches!(cli.command, Command::Regions { all: false }));
    }

    #[test]
    fn test_products_takes_positional_region_id() {
        let cli = Cli::parse_from(["hostwatch", "products", "7"]);
        match cli.command {
            Command::Products {
                region_id,
                in_stock,
            } => {
                assert_eq!(region_id, "7");
                assert!(!in_stock);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_products_without_region_id_is_an_error() {
        assert!(Cli::try_parse_from(["hostwatch", "products"]).is_err());
    }

    #[test]
    fn test_watch_has_no_arguments() {
        assert!(matches!(
            Cli::parse_from(["hostwatch", "watch"]).command,
            Command::Watch
        ));
        assert!(Cli::try_parse_from(["hostwatch", "watch", "extra"]).is_err());
    }
}
