//! Incentives parameters CLI
//!
//! # Usage
//!
//! ```bash
//! # Print the default parameters
//! incentives-params defaults --format json
//!
//! # Validate a parameter file
//! incentives-params validate --params params.yaml
//!
//! # Dry-run a parameter-change proposal
//! incentives-params propose --params params.json --change 'EpochDuration="3600s"'
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Parameters or proposal rejected
//! - 3: Invalid input or arguments
//! - 4: File not found or inaccessible
//! - 10: Internal error

use clap::Parser;
use incentives_params::{run_cli, ParamsCli};

fn main() {
    let cli = ParamsCli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = run_cli(cli);
    std::process::exit(exit_code.into());
}
