//! One-shot mirror command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use docmirror_core::{generate_sidebar, Synchronizer};

use super::{load_config, to_sync_config};

/// Run the sync command.
pub async fn run(config_path: &Path, source: Option<PathBuf>, target: Option<PathBuf>) -> Result<()> {
    let file = load_config(config_path)?;
    let config = to_sync_config(file, source, target);

    tracing::info!(
        "Mirroring {} into {}",
        config.source_root.display(),
        config.target_root.display()
    );

    let report = Synchronizer::new(config.clone()).run()?;
    generate_sidebar(&config)?;

    tracing::info!(
        "Synced {} files ({} indexes created, {} directories skipped) in {}ms",
        report.synced,
        report.created_indexes,
        report.skipped_dirs,
        report.duration_ms
    );

    Ok(())
}
