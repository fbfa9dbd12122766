//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the action executed by the binary.

use crate::cli::actions::{server, Action};
use crate::cli::commands;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches
        .get_one::<u16>(commands::ARG_PORT)
        .copied()
        .unwrap_or(8080);
    let data_dir = matches
        .get_one::<PathBuf>(commands::ARG_DATA_DIR)
        .cloned()
        .context("missing required argument: --data-dir")?;
    let session_ttl_seconds = matches
        .get_one::<u64>(commands::ARG_SESSION_TTL)
        .copied()
        .unwrap_or(86_400);

    Ok(Action::Server(server::Args {
        port,
        data_dir,
        session_ttl_seconds,
    }))
}
