//! Mirror pass from the source tree into the docs tree.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use walkdir::WalkDir;

use crate::config::SyncConfig;
use crate::frontmatter::{ensure_frontmatter, title_from_stem, Frontmatter};

/// Result of a mirror pass.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Number of files mirrored
    pub synced: usize,

    /// Number of directories skipped by exclusion rules
    pub skipped_dirs: usize,

    /// Number of index pages synthesized
    pub created_indexes: usize,

    /// Total pass time in milliseconds
    pub duration_ms: u64,
}

/// Errors that can occur during a mirror pass.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },
}

/// Mirrors qualifying files from the source tree into the target tree.
///
/// The pass never deletes anything under the target root and never touches
/// the source tree; re-running it over unchanged input rewrites the same
/// bytes, so the first error simply aborts the pass and the caller re-runs.
pub struct Synchronizer {
    config: SyncConfig,
}

impl Synchronizer {
    /// Create a synchronizer over the given configuration.
    pub fn new(config: SyncConfig) -> Self {
        Self { config }
    }

    /// Run one full mirror pass.
    pub fn run(&self) -> Result<SyncReport, SyncError> {
        let start = Instant::now();
        let mut report = SyncReport::default();
        let mut mirrored_dirs: Vec<PathBuf> = Vec::new();

        fs::create_dir_all(&self.config.target_root).map_err(|e| SyncError::Write {
            path: self.config.target_root.clone(),
            message: e.to_string(),
        })?;

        // Sorted, link-free walk: output ordering stays reproducible and
        // symlink cycles cannot occur.
        let mut walker = WalkDir::new(&self.config.source_root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        while let Some(entry) = walker.next() {
            let entry = entry.map_err(|e| SyncError::Read {
                path: e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.config.source_root.clone()),
                message: e.to_string(),
            })?;

            if entry.depth() == 0 {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&self.config.source_root)
                .unwrap_or(entry.path())
                .to_path_buf();

            if entry.file_type().is_dir() {
                let name = entry.file_name().to_string_lossy();
                if self.config.is_excluded_dir(&name) {
                    tracing::info!("Skipping directory {}", relative.display());
                    report.skipped_dirs += 1;
                    walker.skip_current_dir();
                    continue;
                }

                let target_dir = self.config.target_root.join(&relative);
                fs::create_dir_all(&target_dir).map_err(|e| SyncError::Write {
                    path: target_dir.clone(),
                    message: e.to_string(),
                })?;
                mirrored_dirs.push(target_dir);
            } else if entry.file_type().is_file() {
                if !self.config.is_included_file(entry.path()) {
                    continue;
                }
                self.sync_file(entry.path(), &relative, &mut report)?;
            }
        }

        if self.config.create_index_files {
            for dir in &mirrored_dirs {
                self.ensure_index(dir, &mut report)?;
            }
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        Ok(report)
    }

    /// Copy one file into the target tree, frontmatter ensured.
    fn sync_file(
        &self,
        source: &Path,
        relative: &Path,
        report: &mut SyncReport,
    ) -> Result<(), SyncError> {
        let content = fs::read_to_string(source).map_err(|e| SyncError::Read {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?;

        let stem = source.file_stem().and_then(|s| s.to_str()).unwrap_or("untitled");
        let content = if self.config.add_frontmatter {
            ensure_frontmatter(&content, stem)
        } else {
            content
        };

        let target = self.config.target_root.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| SyncError::Write {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }
        fs::write(&target, content).map_err(|e| SyncError::Write {
            path: target.clone(),
            message: e.to_string(),
        })?;

        tracing::info!("Synced {}", relative.display());
        report.synced += 1;
        Ok(())
    }

    /// Synthesize an index page for a mirrored directory lacking one.
    ///
    /// Runs after the directory's subtree has been mirrored, so an index
    /// copied from the source always wins over synthesis.
    fn ensure_index(&self, dir: &Path, report: &mut SyncReport) -> Result<(), SyncError> {
        if dir.join("index.md").exists() || dir.join("index.mdx").exists() {
            return Ok(());
        }

        let name = dir.file_name().and_then(|s| s.to_str()).unwrap_or("index");
        let fm = Frontmatter::titled(title_from_stem(name));
        let content = format!("{}\n# {}\n", fm.to_block(), fm.title);

        let index_path = dir.join("index.md");
        fs::write(&index_path, content).map_err(|e| SyncError::Write {
            path: index_path.clone(),
            message: e.to_string(),
        })?;

        tracing::info!("Created index {}", index_path.display());
        report.created_indexes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use tempfile::tempdir;

    use super::*;

    fn config_for(root: &Path) -> SyncConfig {
        SyncConfig {
            source_root: root.join("repo"),
            target_root: root.join("docs"),
            ..Default::default()
        }
    }

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn snapshot(root: &Path) -> BTreeMap<String, String> {
        let mut files = BTreeMap::new();
        for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
            if entry.file_type().is_file() {
                let relative = entry
                    .path()
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .to_string();
                files.insert(relative, fs::read_to_string(entry.path()).unwrap());
            }
        }
        files
    }

    #[test]
    fn mirrors_and_injects_frontmatter() {
        let temp = tempdir().unwrap();
        let config = config_for(temp.path());
        write(&config.source_root.join("guide/intro.md"), "# Hello");
        write(&config.source_root.join("node_modules/x.md"), "# Dep");

        let report = Synchronizer::new(config.clone()).run().unwrap();

        let mirrored = fs::read_to_string(config.target_root.join("guide/intro.md")).unwrap();
        assert_eq!(mirrored, "---\ntitle: intro\n---\n\n# Hello");
        assert!(!config.target_root.join("node_modules").exists());
        assert_eq!(report.synced, 1);
        assert_eq!(report.skipped_dirs, 1);
    }

    #[test]
    fn excludes_hidden_entries() {
        let temp = tempdir().unwrap();
        let config = config_for(temp.path());
        write(&config.source_root.join(".draft.md"), "# Draft");
        write(&config.source_root.join(".notes/inner.md"), "# Inner");
        write(&config.source_root.join("visible.md"), "# Visible");

        Synchronizer::new(config.clone()).run().unwrap();

        let files = snapshot(&config.target_root);
        assert!(files.contains_key("visible.md"));
        assert!(files.keys().all(|k| !k.starts_with('.')));
    }

    #[test]
    fn skips_excluded_and_foreign_files() {
        let temp = tempdir().unwrap();
        let config = config_for(temp.path());
        write(&config.source_root.join("README.md"), "# Readme");
        write(&config.source_root.join("notes.txt"), "plain text");
        write(&config.source_root.join("kept.md"), "# Kept");

        let report = Synchronizer::new(config.clone()).run().unwrap();

        let files = snapshot(&config.target_root);
        assert_eq!(files.keys().collect::<Vec<_>>(), vec!["kept.md"]);
        assert_eq!(report.synced, 1);
    }

    #[test]
    fn preserves_existing_frontmatter() {
        let temp = tempdir().unwrap();
        let config = config_for(temp.path());
        let source = "---\ntitle: Custom\ndescription: Kept\n---\n\n# Body\n";
        write(&config.source_root.join("page.md"), source);

        Synchronizer::new(config.clone()).run().unwrap();

        let mirrored = fs::read_to_string(config.target_root.join("page.md")).unwrap();
        assert_eq!(mirrored, source);
    }

    #[test]
    fn overwrites_stale_target_files() {
        let temp = tempdir().unwrap();
        let config = config_for(temp.path());
        write(&config.source_root.join("page.md"), "# Fresh");
        write(&config.target_root.join("page.md"), "stale copy");

        Synchronizer::new(config.clone()).run().unwrap();

        let mirrored = fs::read_to_string(config.target_root.join("page.md")).unwrap();
        assert_eq!(mirrored, "---\ntitle: page\n---\n\n# Fresh");
    }

    #[test]
    fn synthesizes_missing_indexes() {
        let temp = tempdir().unwrap();
        let config = config_for(temp.path());
        write(&config.source_root.join("guide/intro.md"), "# Hello");

        let report = Synchronizer::new(config.clone()).run().unwrap();

        let index = fs::read_to_string(config.target_root.join("guide/index.md")).unwrap();
        assert_eq!(index, "---\ntitle: guide\n---\n\n# guide\n");
        assert_eq!(report.created_indexes, 1);
    }

    #[test]
    fn source_index_wins_over_synthesis() {
        let temp = tempdir().unwrap();
        let config = config_for(temp.path());
        let source = "---\ntitle: Guide\n---\n\n# Guide\n";
        write(&config.source_root.join("guide/index.md"), source);

        let report = Synchronizer::new(config.clone()).run().unwrap();

        let index = fs::read_to_string(config.target_root.join("guide/index.md")).unwrap();
        assert_eq!(index, source);
        assert_eq!(report.created_indexes, 0);
    }

    #[test]
    fn rerun_is_idempotent() {
        let temp = tempdir().unwrap();
        let config = config_for(temp.path());
        write(&config.source_root.join("guide/intro.md"), "# Hello");
        write(&config.source_root.join("guide/deep/page.md"), "# Deep");
        write(&config.source_root.join("top.md"), "---\ntitle: Top\n---\n\n# Top\n");

        let sync = Synchronizer::new(config.clone());
        sync.run().unwrap();
        let first = snapshot(&config.target_root);
        sync.run().unwrap();
        let second = snapshot(&config.target_root);

        assert_eq!(first, second);
    }

    #[test]
    fn raw_copy_when_frontmatter_disabled() {
        let temp = tempdir().unwrap();
        let config = SyncConfig {
            add_frontmatter: false,
            ..config_for(temp.path())
        };
        write(&config.source_root.join("page.md"), "# Hello");

        Synchronizer::new(config.clone()).run().unwrap();

        let mirrored = fs::read_to_string(config.target_root.join("page.md")).unwrap();
        assert_eq!(mirrored, "# Hello");
    }
}
