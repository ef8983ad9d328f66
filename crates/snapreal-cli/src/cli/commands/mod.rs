//! CLI command handlers.

mod run;
mod scan;

pub use run::{run_batch_command, RunArgs};
pub use scan::run_scan;

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Flag value, else config value, else an error naming both.
pub(crate) fn required_path(
    flag: Option<PathBuf>,
    from_config: Option<&PathBuf>,
    what: &str,
    flag_name: &str,
    config_key: &str,
) -> Result<PathBuf> {
    flag.or_else(|| from_config.cloned()).with_context(|| {
        format!(
            "no {} given: pass {} or set {} in the config file",
            what, flag_name, config_key
        )
    })
}
