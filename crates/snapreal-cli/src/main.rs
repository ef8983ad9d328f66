use snapreal_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // Log file under XDG state; stderr if that is not writable.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("log file unavailable, logging to stderr: {:#}", err);
    }

    if let Err(err) = CliCommand::run_from_args() {
        tracing::error!("{:#}", err);
        eprintln!("snapreal error: {:#}", err);
        std::process::exit(1);
    }
}
