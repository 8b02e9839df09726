//! Watch-mode command.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;

use docmirror_watch::WatchController;

use super::{load_config, to_sync_config};

/// Run the watch command.
pub async fn run(config_path: &Path, debounce: Option<u64>) -> Result<()> {
    let file = load_config(config_path)?;
    let debounce_ms = debounce.unwrap_or(file.watch.debounce_ms);
    let config = to_sync_config(file, None, None);

    WatchController::new(config, Duration::from_millis(debounce_ms))
        .run()
        .await?;

    Ok(())
}
