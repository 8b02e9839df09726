//! File watching over the source tree.

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

use docmirror_core::{SyncConfig, SyncError};

/// Events emitted by the source-tree watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// Document file was created
    DocCreated(PathBuf),

    /// Document file was modified
    DocChanged(PathBuf),

    /// Document file was removed
    DocRemoved(PathBuf),

    /// Directory was added, removed, or renamed
    TreeChanged(PathBuf),
}

impl ChangeEvent {
    /// Path the event refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::DocCreated(p) | Self::DocChanged(p) | Self::DocRemoved(p) | Self::TreeChanged(p) => p,
        }
    }
}

/// Errors raised while setting up observation or resyncing.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("Failed to watch {path}: {message}")]
    Watch { path: PathBuf, message: String },

    #[error(transparent)]
    Sync(#[from] SyncError),
}

/// Watches the source tree and forwards qualifying change events.
pub struct DocsWatcher {
    _watcher: RecommendedWatcher,
}

impl DocsWatcher {
    /// Create a watcher over the configured source root.
    ///
    /// Returns the watcher and a channel yielding classified events. Events
    /// under excluded or hidden directories (the target tree among them) are
    /// dropped before they reach the channel.
    pub fn new(
        config: &SyncConfig,
    ) -> Result<(Self, async_mpsc::Receiver<ChangeEvent>), WatchError> {
        let root = config.source_root.canonicalize().map_err(|e| WatchError::Watch {
            path: config.source_root.clone(),
            message: e.to_string(),
        })?;

        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(|e| WatchError::Watch {
            path: root.clone(),
            message: e.to_string(),
        })?;

        watcher
            .watch(&root, RecursiveMode::Recursive)
            .map_err(|e| WatchError::Watch {
                path: root.clone(),
                message: e.to_string(),
            })?;

        // Forward raw notify events off the watcher thread, dropping
        // anything the mirror pass would ignore anyway.
        let filter = EventFilter::new(root, config);
        std::thread::spawn(move || {
            while let Ok(event) = sync_rx.recv() {
                for path in &event.paths {
                    if let Some(change) = filter.classify(path, &event.kind) {
                        let _ = async_tx.blocking_send(change);
                    }
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

/// Relevance rules lifted from the sync configuration.
struct EventFilter {
    source_root: PathBuf,
    excluded_dirs: Vec<String>,
    included_extensions: Vec<String>,
}

impl EventFilter {
    fn new(source_root: PathBuf, config: &SyncConfig) -> Self {
        Self {
            source_root,
            excluded_dirs: config.excluded_dirs.clone(),
            included_extensions: config.included_extensions.clone(),
        }
    }

    /// Classify a raw notify event, or drop it as irrelevant.
    ///
    /// Removal events carry paths that no longer exist, so file vs
    /// directory is judged by extension presence: extensionless paths are
    /// treated as directory events.
    fn classify(&self, path: &Path, kind: &notify::EventKind) -> Option<ChangeEvent> {
        use notify::EventKind;

        if self.is_ignored(path) {
            return None;
        }

        let ext = path.extension().and_then(|e| e.to_str());
        let is_doc = ext.is_some_and(|e| self.included_extensions.iter().any(|i| i == e));
        if ext.is_some() && !is_doc {
            return None;
        }

        match kind {
            EventKind::Create(_) if is_doc => Some(ChangeEvent::DocCreated(path.to_path_buf())),
            EventKind::Create(_) => Some(ChangeEvent::TreeChanged(path.to_path_buf())),
            EventKind::Remove(_) if is_doc => Some(ChangeEvent::DocRemoved(path.to_path_buf())),
            EventKind::Remove(_) => Some(ChangeEvent::TreeChanged(path.to_path_buf())),
            EventKind::Modify(_) if is_doc => Some(ChangeEvent::DocChanged(path.to_path_buf())),
            EventKind::Modify(_) => Some(ChangeEvent::TreeChanged(path.to_path_buf())),
            _ => None,
        }
    }

    /// Paths under excluded or hidden directories never trigger a resync.
    fn is_ignored(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.source_root).unwrap_or(path);
        relative.components().any(|c| {
            let name = c.as_os_str().to_string_lossy();
            name.starts_with('.') || self.excluded_dirs.iter().any(|d| *d == name)
        })
    }
}
