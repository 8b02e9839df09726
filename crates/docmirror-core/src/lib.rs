//! Core mirror pass for docmirror.
//!
//! Walks a repository tree, copies qualifying Markdown files into the docs
//! tree with frontmatter ensured, and generates the sidebar manifest the
//! site generator consumes.

pub mod config;
pub mod frontmatter;
pub mod sidebar;
pub mod sync;

pub use config::SyncConfig;
pub use frontmatter::{ensure_frontmatter, has_frontmatter, title_from_stem, Frontmatter};
pub use sidebar::{generate_sidebar, SidebarOutcome, SIDEBAR_FILE};
pub use sync::{SyncError, SyncReport, Synchronizer};
