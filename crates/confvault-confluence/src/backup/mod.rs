//! Depth-first backup of a Confluence folder tree.
//!
//! [`TreeWalker`] mirrors a remote folder onto a local directory: one
//! subdirectory per remote folder, and per page the artifacts written by
//! [`PageExporter`]. Listings are consumed page by page via continuation
//! cursors, strictly in server order, and each folder's failures stay
//! contained to its own subtree.

mod exporter;

pub use exporter::{ExportOutcome, PageExporter, RESTRICTIONS_SUFFIX};

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::client::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::sanitize::safe_filename;
use crate::types::{BodyFormat, DescendantsPage, NodeType, PageDetail, RestrictionSet};

/// Read operations the backup path needs from the remote side.
///
/// Implemented by [`ConfluenceClient`]; tests drive the walker and
/// exporter with in-memory implementations.
pub trait BackupSource {
    /// Fetch full page detail with its body in the given representation.
    fn fetch_page(&self, page_id: &str, format: BodyFormat)
    -> Result<PageDetail, ConfluenceError>;

    /// Fetch the restriction set of a page.
    fn fetch_restrictions(&self, page_id: &str) -> Result<RestrictionSet, ConfluenceError>;

    /// List one page of a folder's immediate descendants.
    fn list_descendants(
        &self,
        folder_id: &str,
        cursor: Option<&str>,
    ) -> Result<DescendantsPage, ConfluenceError>;
}

impl BackupSource for ConfluenceClient {
    fn fetch_page(
        &self,
        page_id: &str,
        format: BodyFormat,
    ) -> Result<PageDetail, ConfluenceError> {
        self.get_page(page_id, format)
    }

    fn fetch_restrictions(&self, page_id: &str) -> Result<RestrictionSet, ConfluenceError> {
        self.get_restrictions(page_id)
    }

    fn list_descendants(
        &self,
        folder_id: &str,
        cursor: Option<&str>,
    ) -> Result<DescendantsPage, ConfluenceError> {
        Self::list_descendants(self, folder_id, cursor)
    }
}

/// Counters accumulated over one or more tree walks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackupStats {
    /// Local directories created for remote folders.
    pub folders_created: usize,
    /// Pages with all artifacts written.
    pub pages_exported: usize,
    /// Pages with at least one artifact omitted.
    pub pages_partial: usize,
    /// Pages where no representation could be fetched.
    pub pages_skipped: usize,
    /// Folders whose traversal was aborted (listing or directory failure).
    pub folders_failed: usize,
    /// Sibling titles that collided after sanitization (later one wins).
    pub name_collisions: usize,
}

impl BackupStats {
    /// Add another run's counters into this one.
    pub fn merge(&mut self, other: &Self) {
        self.folders_created += other.folders_created;
        self.pages_exported += other.pages_exported;
        self.pages_partial += other.pages_partial;
        self.pages_skipped += other.pages_skipped;
        self.folders_failed += other.folders_failed;
        self.name_collisions += other.name_collisions;
    }

    /// Total pages that produced at least one artifact.
    #[must_use]
    pub fn pages_written(&self) -> usize {
        self.pages_exported + self.pages_partial
    }
}

/// Depth-first, paginated traversal of a folder's descendants.
pub struct TreeWalker<'a, S> {
    source: &'a S,
    exporter: PageExporter<'a, S>,
    stats: BackupStats,
}

impl<'a, S: BackupSource> TreeWalker<'a, S> {
    /// Create a walker reading from `source`.
    #[must_use]
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            exporter: PageExporter::new(source),
            stats: BackupStats::default(),
        }
    }

    /// Counters accumulated so far.
    #[must_use]
    pub fn stats(&self) -> &BackupStats {
        &self.stats
    }

    /// Consume the walker, returning its counters.
    #[must_use]
    pub fn into_stats(self) -> BackupStats {
        self.stats
    }

    /// Mirror the folder's subtree under `dest` (which must exist).
    ///
    /// Never returns an error: a failed listing call aborts only this
    /// folder's subtree (logged and counted in
    /// [`BackupStats::folders_failed`]); per-page fetch failures are
    /// handled inside the exporter. Descendants are processed exactly in
    /// server order; re-sorting could desynchronize position-encoded
    /// continuation cursors.
    pub fn walk(&mut self, folder_id: &str, dest: &Path) {
        let mut cursor: Option<String> = None;
        // Sanitized sibling names seen in this directory, pages and
        // folders alike. Collisions silently overwrite; we at least log.
        let mut seen: HashSet<String> = HashSet::new();

        loop {
            let listing = match self.source.list_descendants(folder_id, cursor.as_deref()) {
                Ok(listing) => listing,
                Err(err) => {
                    warn!("Listing descendants of folder {folder_id} failed: {err}");
                    self.stats.folders_failed += 1;
                    return;
                }
            };

            for node in &listing.results {
                let safe_title = safe_filename(&node.title);
                if !seen.insert(safe_title.clone()) {
                    warn!(
                        "Sanitized title collision in {}: \"{}\" -> \"{safe_title}\"",
                        dest.display(),
                        node.title
                    );
                    self.stats.name_collisions += 1;
                }

                match &node.node_type {
                    NodeType::Folder => {
                        let subdir = dest.join(&safe_title);
                        if let Err(err) = std::fs::create_dir_all(&subdir) {
                            warn!("Creating {} failed: {err}", subdir.display());
                            self.stats.folders_failed += 1;
                            continue;
                        }
                        info!("Created folder {}", subdir.display());
                        self.stats.folders_created += 1;
                        self.walk(&node.id, &subdir);
                    }
                    NodeType::Page => match self.exporter.export(node, dest) {
                        ExportOutcome::Full => self.stats.pages_exported += 1,
                        ExportOutcome::Partial => self.stats.pages_partial += 1,
                        ExportOutcome::Skipped => self.stats.pages_skipped += 1,
                    },
                    NodeType::Other(kind) => {
                        debug!("Skipping {kind} node {} (\"{}\")", node.id, node.title);
                    }
                }
            }

            cursor = listing.next_cursor();
            if cursor.is_none() {
                break;
            }
        }
    }
}
