use crate::api;
use anyhow::Result;
use std::path::PathBuf;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub data_dir: PathBuf,
    pub session_ttl_seconds: u64,
}

/// Execute the server action.
///
/// # Errors
/// Returns an error if the data directory cannot be prepared or the
/// server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    api::new(args.port, args.data_dir, args.session_ttl_seconds).await
}
