//! qxs CLI entry point
//!
//! Parses the command line, runs the query and renders errors. Errors from qxs
//! itself are shown as a one-line `error:` message with optional details and
//! suggestions; anything else is printed with its full cause chain.

use clap::Parser;
use qxs_cli::cli;
use qxs_cli::core::user_friendly_error;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(code) => code,
        Err(e) => {
            match user_friendly_error(e) {
                Ok(error_ctx) => error_ctx.display(),
                Err(e) => eprintln!("{e:?}"),
            }
            ExitCode::FAILURE
        }
    }
}
