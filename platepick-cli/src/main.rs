//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use std::process::ExitCode;

fn main() -> ExitCode {
    match platepick_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(platepick_cli::CliError::ArgumentParsing(err)) => {
            // Clap renders help and version requests through the error path.
            let printed = err.print().is_ok();
            if printed && !err.use_stderr() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            #[expect(
                clippy::print_stderr,
                reason = "the binary reports fatal errors on stderr"
            )]
            {
                eprintln!("platepick: {err}");
            }
            ExitCode::FAILURE
        }
    }
}
