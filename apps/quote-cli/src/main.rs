//! # LiftQuote Command-Line Entry Point
//!
//! ```bash
//! liftquote hydraulic 9
//! liftquote gearless 12 --customer "Sara Ahmadi" --project "Damavand Tower"
//! liftquote gearless 12 --json
//! ```
//!
//! The actual work is in lib.rs for better testability.

use std::process::ExitCode;

use quote_cli::args::{self, Command};
use quote_cli::config::QuoteConfig;
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    quote_cli::init_tracing();

    let command = match args::parse(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            eprintln!("{}", args::USAGE);
            return ExitCode::from(err.exit_code());
        }
    };

    let quote_args = match command {
        Command::Help => {
            println!("{}", args::USAGE);
            return ExitCode::SUCCESS;
        }
        Command::Quote(quote_args) => quote_args,
    };

    let config = QuoteConfig::from_env();
    info!(db_path = %config.db_path.display(), "Starting LiftQuote");

    match quote_cli::run(&quote_args, &config).await {
        Ok(report) => {
            print!("{}", report.output);
            if quote_args.json {
                println!();
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
