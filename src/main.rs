//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `site_export` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Status lines and exit codes
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use site_export::initialization::init_logger_with;
use site_export::{run_export, Opt, RunOutcome};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // Try loading from current directory first, then from the executable's directory
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

    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    let config = match opt.into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    match run_export(&config).await {
        Ok(RunOutcome::Printed { .. }) => Ok(()),
        Ok(RunOutcome::Saved(statuses)) => {
            let mut failed = false;
            for status in &statuses {
                if status.is_success() {
                    println!("{status}");
                } else {
                    eprintln!("{status}");
                    failed = true;
                }
            }
            if failed {
                process::exit(1);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }
}
