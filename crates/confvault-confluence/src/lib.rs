//! Confluence folder-tree backup and restore.
//!
//! Backs up a tree of Confluence folders and pages to a local directory
//! mirror via the v2 REST API: one directory per folder, three files per
//! page (storage-format detail as JSON, rendered body as HTML, and the
//! page's restriction set). The restore path replays a saved page as a
//! create-page call followed by a restriction update.
//!
//! All I/O is synchronous and sequential; traversal is depth-first with
//! cursor-based pagination per folder.

pub mod backup;
mod client;
mod error;
pub mod restore;
mod sanitize;
#[cfg(test)]
mod test_support;
pub mod types;

pub use backup::{BackupSource, BackupStats, ExportOutcome, PageExporter, TreeWalker};
pub use client::ConfluenceClient;
pub use error::ConfluenceError;
pub use restore::{RestoreError, RestoreReport, RestoreTarget, artifact_paths, restore_page};
pub use sanitize::safe_filename;
