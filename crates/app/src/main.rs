//! Storefront command-line client

use std::process::ExitCode;

use clap::Parser;
use storefront_app::{config, observability};

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    config::load_dotenv();

    let cli = cli::Cli::parse();

    if let Err(error) = observability::init(&cli.config.logging) {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if !error.already_reported() {
                eprintln!("{error}");
            }

            ExitCode::FAILURE
        }
    }
}
