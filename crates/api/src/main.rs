//! FinSwitch - financial switch command line client

use std::process::ExitCode;

use clap::Parser;
use finswitch_app::Cli;
use finswitch_infra::observability::{init_tracing, DEFAULT_FILTER};

#[tokio::main]
async fn main() -> ExitCode {
    // before tracing so RUST_LOG from .env applies
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    if let Err(e) = init_tracing(cli.log_format, DEFAULT_FILTER) {
        eprintln!("failed to initialise logging: {e}");
    }

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) => tracing::debug!(error = %e, "no .env loaded"),
    }

    let mut stdout = std::io::stdout().lock();
    match finswitch_app::run(cli, &mut stdout).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "finswitch failed");
            ExitCode::FAILURE
        }
    }
}
