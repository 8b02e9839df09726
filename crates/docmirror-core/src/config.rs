//! Sync configuration.

use std::path::{Path, PathBuf};

/// Configuration for mirroring a source tree into the docs tree.
///
/// Built once per run and passed by reference; nothing mutates it after
/// construction.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Root of the repository tree to mirror from
    pub source_root: PathBuf,

    /// Docs directory the site generator reads from
    pub target_root: PathBuf,

    /// Directory names that are never descended into
    pub excluded_dirs: Vec<String>,

    /// File names that are never mirrored
    pub excluded_files: Vec<String>,

    /// File extensions (without the dot) that qualify for mirroring
    pub included_extensions: Vec<String>,

    /// Inject a synthesized frontmatter block when a file has none
    pub add_frontmatter: bool,

    /// Synthesize an index page for mirrored directories lacking one
    pub create_index_files: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("."),
            target_root: PathBuf::from("docs"),
            // "docs" must stay in this list when the target tree lives
            // inside the source root, or the mirror would re-consume its
            // own output.
            excluded_dirs: vec![
                "node_modules".to_string(),
                ".git".to_string(),
                "docs".to_string(),
                "build".to_string(),
                ".docusaurus".to_string(),
                "static".to_string(),
                "target".to_string(),
            ],
            excluded_files: vec!["README.md".to_string()],
            included_extensions: vec!["md".to_string(), "mdx".to_string()],
            add_frontmatter: true,
            create_index_files: true,
        }
    }
}

impl SyncConfig {
    /// Whether a directory entry with this name should be skipped.
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        is_hidden(name) || self.excluded_dirs.iter().any(|d| d == name)
    }

    /// Whether a file at this path qualifies for mirroring.
    pub fn is_included_file(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        if is_hidden(name) || self.excluded_files.iter().any(|f| f == name) {
            return false;
        }
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        self.included_extensions.iter().any(|e| e == ext)
    }
}

/// Dot-prefixed entries are excluded regardless of the explicit lists.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}
