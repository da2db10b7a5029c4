//! ncmc: set the latitude and longitude of a single-point netCDF file.
//!
//! Usage:
//!   ncmc <latitude> <longitude> <file>
//!
//! Any failure prints one line to stdout and exits with status 1.
//! Logging is off unless `NCMC_LOG` is set (e.g. `NCMC_LOG=debug`);
//! log output goes to stderr.

use std::process::ExitCode;

use anyhow::Result;
use coord_patch::{run, Options};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter
const LOG_ENV: &str = "NCMC_LOG";

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        println!("Failed to initialize logging: {:#}", e);
        return ExitCode::FAILURE;
    }

    let result = Options::try_from_args(std::env::args_os()).and_then(|options| run(&options));

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
