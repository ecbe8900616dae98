//! `tilescan` command-line entry point.

use clap::Parser;
use std::process::ExitCode;
use tilescan_runner::cli::Cli;
use tilescan_runner::logging::init_logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match tilescan_runner::run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
