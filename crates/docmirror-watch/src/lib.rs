//! Watch mode for docmirror.
//!
//! Wraps the core mirror pass with filesystem observation: one pass at
//! startup, then a debounced full pass after each burst of changes.

pub mod controller;
pub mod watcher;

pub use controller::{WatchController, DEFAULT_DEBOUNCE_MS};
pub use watcher::{ChangeEvent, DocsWatcher, WatchError};
