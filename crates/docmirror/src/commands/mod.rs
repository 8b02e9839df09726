//! CLI subcommands and config-file loading.

pub mod sync;
pub mod watch;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use docmirror_core::SyncConfig;
use docmirror_watch::DEFAULT_DEBOUNCE_MS;

/// Configuration file structure (docmirror.toml).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub sync: SyncSettings,

    #[serde(default)]
    pub watch: WatchSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    pub source: PathBuf,
    pub target: PathBuf,
    pub excluded_dirs: Vec<String>,
    pub excluded_files: Vec<String>,
    pub extensions: Vec<String>,
    pub add_frontmatter: bool,
    pub create_index_files: bool,
}

impl Default for SyncSettings {
    fn default() -> Self {
        let config = SyncConfig::default();
        Self {
            source: config.source_root,
            target: config.target_root,
            excluded_dirs: config.excluded_dirs,
            excluded_files: config.excluded_files,
            extensions: config.included_extensions,
            add_frontmatter: config.add_frontmatter,
            create_index_files: config.create_index_files,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WatchSettings {
    pub debounce_ms: u64,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

/// Load configuration from the given path if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

/// Build the sync configuration, with CLI overrides taking precedence.
pub fn to_sync_config(
    file: ConfigFile,
    source: Option<PathBuf>,
    target: Option<PathBuf>,
) -> SyncConfig {
    SyncConfig {
        source_root: source.unwrap_or(file.sync.source),
        target_root: target.unwrap_or(file.sync.target),
        excluded_dirs: file.sync.excluded_dirs,
        excluded_files: file.sync.excluded_files,
        included_extensions: file.sync.extensions,
        add_frontmatter: file.sync.add_frontmatter,
        create_index_files: file.sync.create_index_files,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_config() {
        let file: ConfigFile = toml::from_str(
            r#"
[sync]
target = "website/docs"

[watch]
debounce_ms = 250
"#,
        )
        .unwrap();

        assert_eq!(file.sync.target, PathBuf::from("website/docs"));
        assert_eq!(file.sync.source, PathBuf::from("."));
        assert!(file.sync.add_frontmatter);
        assert_eq!(file.watch.debounce_ms, 250);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let file = load_config(Path::new("does-not-exist.toml")).unwrap();

        assert_eq!(file.sync.target, PathBuf::from("docs"));
        assert_eq!(file.watch.debounce_ms, DEFAULT_DEBOUNCE_MS);
    }

    #[test]
    fn cli_overrides_win() {
        let config = to_sync_config(
            ConfigFile::default(),
            Some(PathBuf::from("/src")),
            None,
        );

        assert_eq!(config.source_root, PathBuf::from("/src"));
        assert_eq!(config.target_root, PathBuf::from("docs"));
    }
}
