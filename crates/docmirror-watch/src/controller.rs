//! Watch controller: initial pass plus debounced resync.

use std::time::Duration;

use tokio::sync::mpsc::Receiver;
use tokio::time::Instant;

use docmirror_core::{generate_sidebar, SyncConfig, Synchronizer};

use crate::watcher::{ChangeEvent, DocsWatcher, WatchError};

/// Default debounce window in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;

/// Runs an initial mirror pass, then re-runs it after bursts of
/// filesystem changes settle.
pub struct WatchController {
    config: SyncConfig,
    debounce: Duration,
}

impl WatchController {
    /// Create a controller over the given configuration and debounce window.
    pub fn new(config: SyncConfig, debounce: Duration) -> Self {
        Self { config, debounce }
    }

    /// Run until interrupted.
    ///
    /// The startup pass is fatal on error; errors from debounce-triggered
    /// passes are logged and the controller keeps observing.
    pub async fn run(self) -> Result<(), WatchError> {
        let sync = Synchronizer::new(self.config.clone());

        let report = sync.run()?;
        generate_sidebar(&self.config)?;
        tracing::info!(
            "Initial pass synced {} files in {}ms",
            report.synced,
            report.duration_ms
        );

        let (watcher, rx) = DocsWatcher::new(&self.config)?;
        tracing::info!(
            "Watching {} (debounce {}ms)",
            self.config.source_root.display(),
            self.debounce.as_millis()
        );

        let config = self.config;
        let resync = move || match sync.run() {
            Ok(report) => {
                if let Err(e) = generate_sidebar(&config) {
                    tracing::error!("Resync failed: {}", e);
                    return;
                }
                tracing::info!("Resynced {} files in {}ms", report.synced, report.duration_ms);
            }
            Err(e) => tracing::error!("Resync failed: {}", e),
        };

        tokio::select! {
            _ = debounce_loop(rx, self.debounce, resync) => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, shutting down");
            }
        }

        drop(watcher);
        Ok(())
    }
}

/// Debounce state machine over the event stream.
///
/// Idle until an event arrives, then holds a deadline that every further
/// event pushes back; the resync closure runs once the deadline passes with
/// no new events, so a burst of changes coalesces into one pass and two
/// passes never overlap. Returns when the event channel closes.
async fn debounce_loop<F>(mut rx: Receiver<ChangeEvent>, window: Duration, mut resync: F)
where
    F: FnMut(),
{
    let mut deadline: Option<Instant> = None;

    loop {
        match deadline {
            None => match rx.recv().await {
                Some(event) => {
                    tracing::debug!("Change detected: {}", event.path().display());
                    deadline = Some(Instant::now() + window);
                }
                None => return,
            },
            Some(at) => {
                tokio::select! {
                    event = rx.recv() => match event {
                        Some(event) => {
                            tracing::debug!("Change detected: {}", event.path().display());
                            deadline = Some(Instant::now() + window);
                        }
                        None => return,
                    },
                    _ = tokio::time::sleep_until(at) => {
                        resync();
                        deadline = None;
                    }
                }
            }
        }
    }
}
