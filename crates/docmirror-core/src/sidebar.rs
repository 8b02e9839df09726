//! Sidebar manifest generation.

use std::fs;

use crate::config::SyncConfig;
use crate::sync::SyncError;

/// File name of the generated manifest, written at the source root.
pub const SIDEBAR_FILE: &str = "sidebars.js";

/// Outcome of a manifest generation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarOutcome {
    /// Manifest written
    Created,

    /// Manifest already present, left untouched
    Skipped,
}

/// Write the sidebar manifest once.
///
/// An existing manifest is never overwritten; manual edits win. The
/// generated manifest declares a single group whose entries the site
/// generator derives from the target tree itself.
pub fn generate_sidebar(config: &SyncConfig) -> Result<SidebarOutcome, SyncError> {
    let path = config.source_root.join(SIDEBAR_FILE);
    if path.exists() {
        tracing::info!("Sidebar manifest exists, skipping {}", path.display());
        return Ok(SidebarOutcome::Skipped);
    }

    let manifest = serde_json::json!({
        "docs": [
            {
                "type": "autogenerated",
                "dirName": ".",
            }
        ]
    });

    let body = serde_json::to_string_pretty(&manifest).map_err(|e| SyncError::Write {
        path: path.clone(),
        message: e.to_string(),
    })?;
    let module = format!("module.exports = {body};\n");

    fs::write(&path, module).map_err(|e| SyncError::Write {
        path: path.clone(),
        message: e.to_string(),
    })?;

    tracing::info!("Created sidebar manifest {}", path.display());
    Ok(SidebarOutcome::Created)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn writes_manifest_once() {
        let temp = tempdir().unwrap();
        let config = SyncConfig {
            source_root: temp.path().to_path_buf(),
            ..Default::default()
        };

        let outcome = generate_sidebar(&config).unwrap();

        assert_eq!(outcome, SidebarOutcome::Created);
        let content = fs::read_to_string(temp.path().join(SIDEBAR_FILE)).unwrap();
        assert!(content.starts_with("module.exports ="));
        assert!(content.contains("autogenerated"));
    }

    #[test]
    fn never_overwrites_existing_manifest() {
        let temp = tempdir().unwrap();
        let config = SyncConfig {
            source_root: temp.path().to_path_buf(),
            ..Default::default()
        };
        let manual = "module.exports = { custom: [] };\n";
        fs::write(temp.path().join(SIDEBAR_FILE), manual).unwrap();

        let outcome = generate_sidebar(&config).unwrap();

        assert_eq!(outcome, SidebarOutcome::Skipped);
        let content = fs::read_to_string(temp.path().join(SIDEBAR_FILE)).unwrap();
        assert_eq!(content, manual);
    }
}
