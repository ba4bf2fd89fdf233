//! Tests for CLI subcommand parsing.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use redirect_walker::config::{Cli, Command, OutputFormat, DEFAULT_BIND_ADDR, DEFAULT_MAX_HOPS};
use redirect_walker::Config;

#[test]
fn test_check_defaults() {
    let cli = Cli::try_parse_from(["redirect_walker", "check", "example.com"]).expect("parse");
    let Command::Check(args) = cli.command else {
        panic!("expected check subcommand");
    };
    let config = Config::from(args);
    assert_eq!(config.urls, vec!["example.com"]);
    assert_eq!(config.max_hops, DEFAULT_MAX_HOPS);
    assert_eq!(config.format, OutputFormat::Json);
    assert!(config.output.is_none());
    assert!(!config.allow_private);
    assert!(!config.fail_on_error);
    assert_eq!(config.retries, 0);
}

#[test]
fn test_check_all_flags() {
    let cli = Cli::try_parse_from([
        "redirect_walker",
        "check",
        "a.test",
        "b.test",
        "--file",
        "urls.txt",
        "--max-hops",
        "4",
        "--timeout-ms",
        "2500",
        "--walk-timeout-secs",
        "20",
        "--max-concurrency",
        "3",
        "--retries",
        "2",
        "--format",
        "jsonl",
        "--output",
        "out.jsonl",
        "--allow-private",
        "--user-agent",
        "probe/1.0",
        "--log-level",
        "debug",
        "--log-format",
        "json",
        "--fail-on-error",
    ])
    .expect("parse");
    let Command::Check(args) = cli.command else {
        panic!("expected check subcommand");
    };
    let config = Config::from(args);
    assert_eq!(config.urls, vec!["a.test", "b.test"]);
    assert_eq!(config.file, Some(PathBuf::from("urls.txt")));
    assert_eq!(config.max_hops, 4);
    assert_eq!(config.probe_timeout_ms, 2500);
    assert_eq!(config.walk_timeout, Duration::from_secs(20));
    assert_eq!(config.max_concurrency, 3);
    assert_eq!(config.retries, 2);
    assert_eq!(config.format, OutputFormat::Jsonl);
    assert_eq!(config.output, Some(PathBuf::from("out.jsonl")));
    assert!(config.allow_private);
    assert_eq!(config.user_agent, "probe/1.0");
    assert!(config.fail_on_error);
    assert_eq!(
        config.walk_options().probe_timeout,
        Duration::from_millis(2500)
    );
}

#[test]
fn test_check_stdin_marker() {
    let cli = Cli::try_parse_from(["redirect_walker", "check", "-f", "-"]).expect("parse");
    let Command::Check(args) = cli.command else {
        panic!("expected check subcommand");
    };
    assert_eq!(args.file, Some(PathBuf::from("-")));
    assert!(args.urls.is_empty());
}

#[test]
fn test_serve_defaults_and_walker_flags() {
    let cli = Cli::try_parse_from(["redirect_walker", "serve", "--max-hops", "7"]).expect("parse");
    let Command::Serve(args) = cli.command else {
        panic!("expected serve subcommand");
    };
    assert_eq!(args.bind, DEFAULT_BIND_ADDR);
    let config = Config::from(&args);
    assert_eq!(config.max_hops, 7);
    assert!(config.urls.is_empty());
}

#[test]
fn test_invalid_values_rejected() {
    assert!(Cli::try_parse_from(["redirect_walker", "check", "--format", "csv"]).is_err());
    assert!(Cli::try_parse_from(["redirect_walker", "check", "--max-hops", "-1"]).is_err());
    assert!(Cli::try_parse_from(["redirect_walker", "check", "--log-level", "loud"]).is_err());
    assert!(Cli::try_parse_from(["redirect_walker"]).is_err());
}
