mod api;
mod cli;
mod error;
mod models;

use cli::App;
use colored::*;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Log filter from `RUST_LOG`; logging is off when it is unset or invalid.
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"))
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .init();

    let app = match App::new() {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {:?}", e);
            eprintln!("{}", e.to_string().red());
            return ExitCode::FAILURE;
        },
    };

    // Argument errors, --help and --version are handled by clap and exit here
    let matches = app.command().get_matches();

    match app.dispatch(&matches).await {
        Ok(output) => {
            info!("Command completed");
            println!("{}", output);
            ExitCode::SUCCESS
        },
        Err(e) => {
            error!("Command execution failed: {:?}", e);
            eprintln!("{}", e.to_string().red());
            ExitCode::FAILURE
        },
    }
}
