//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `redirect_walker` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Exit codes
//!
//! All core functionality is implemented in the library crate.

use clap::Parser;
use std::process;

use redirect_walker::config::{Cli, Command};
use redirect_walker::initialization::{init_crypto_provider, init_logger_with};
use redirect_walker::{run_check, server, Config};

/// Exit status for a finished run that contained failed items (`--fail-on-error`)
const EXIT_ITEM_FAILURES: i32 = 2;

#[tokio::main]
async fn main() {
    // RUST_LOG and friends may come from a .env file next to the binary or in the cwd
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();

    let walker_args = match &cli.command {
        Command::Check(args) => &args.walker,
        Command::Serve(args) => &args.walker,
    };
    if let Err(e) = init_logger_with(
        walker_args.log_level.clone().into(),
        walker_args.log_format.clone(),
    ) {
        eprintln!("redirect_walker error: Failed to initialize logger: {e}");
        process::exit(1);
    }

    init_crypto_provider();

    match cli.command {
        Command::Check(args) => {
            let config = Config::from(args);
            let fail_on_error = config.fail_on_error;
            match run_check(config).await {
                Ok(report) => {
                    eprintln!(
                        "✅ Walked {} URL{} in {:.1}s: {} completed, {} loop{}, {} too many redirects, {} failed",
                        report.total,
                        if report.total == 1 { "" } else { "s" },
                        report.elapsed_seconds,
                        report.completed,
                        report.loops,
                        if report.loops == 1 { "" } else { "s" },
                        report.too_many_redirects,
                        report.failed(),
                    );
                    if fail_on_error && report.failed() > 0 {
                        process::exit(EXIT_ITEM_FAILURES);
                    }
                }
                Err(e) => {
                    eprintln!("redirect_walker error: {:#}", e);
                    process::exit(1);
                }
            }
        }
        Command::Serve(args) => {
            let config = Config::from(&args);
            if let Err(e) = server::serve(&config, &args.bind).await {
                eprintln!("redirect_walker error: {:#}", e);
                process::exit(1);
            }
        }
    }
}
