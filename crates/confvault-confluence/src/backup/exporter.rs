//! Per-page export.

use std::path::Path;

use tracing::{info, warn};

use super::BackupSource;
use crate::error::ConfluenceError;
use crate::sanitize::safe_filename;
use crate::types::{BodyFormat, Node};

/// Filename suffix of the restriction artifact.
pub const RESTRICTIONS_SUFFIX: &str = "-confrestrict.json";

/// What a single page export produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Both body representations fetched and written.
    Full,
    /// Exactly one representation fetched; the other artifact was omitted.
    Partial,
    /// Neither representation could be fetched; nothing written.
    Skipped,
}

/// Writes one page's artifacts into a target directory.
///
/// Per page, up to three files named from the sanitized title:
/// `<title>.json` (full storage-format detail, restorable), `<title>.html`
/// (rendered body, human-readable only), and `<title>-confrestrict.json`
/// (restriction set). A failed fetch for any of the three is logged and
/// that artifact omitted; it never aborts the surrounding traversal.
pub struct PageExporter<'a, S> {
    source: &'a S,
}

impl<'a, S: BackupSource> PageExporter<'a, S> {
    /// Create an exporter reading from `source`.
    #[must_use]
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Export one page into `dir`.
    pub fn export(&self, node: &Node, dir: &Path) -> ExportOutcome {
        let safe_title = safe_filename(&node.title);

        let storage_ok = self.export_storage(node, dir, &safe_title);
        let view_ok = self.export_rendered(node, dir, &safe_title);

        match (storage_ok, view_ok) {
            (true, true) => ExportOutcome::Full,
            (false, false) => {
                warn!("Skipping page {} (\"{}\"): no representation fetched", node.id, node.title);
                ExportOutcome::Skipped
            }
            _ => ExportOutcome::Partial,
        }
    }

    /// Fetch the storage representation and write the restorable artifact.
    fn export_storage(&self, node: &Node, dir: &Path, safe_title: &str) -> bool {
        let detail = match self.source.fetch_page(&node.id, BodyFormat::Storage) {
            Ok(detail) => detail,
            Err(err) => {
                warn!("Fetching storage body of page {} failed: {err}", node.id);
                return false;
            }
        };

        let path = dir.join(format!("{safe_title}.json"));
        match write_json(&detail, &path) {
            Ok(()) => {
                info!("Saved page {}", path.display());
                true
            }
            Err(err) => {
                warn!("Writing {} failed: {err}", path.display());
                false
            }
        }
    }

    /// Fetch the rendered representation; write the restriction artifact
    /// (restrictions only accompany a readable export) and the HTML file.
    fn export_rendered(&self, node: &Node, dir: &Path, safe_title: &str) -> bool {
        let detail = match self.source.fetch_page(&node.id, BodyFormat::StyledView) {
            Ok(detail) => detail,
            Err(err) => {
                warn!("Fetching rendered body of page {} failed: {err}", node.id);
                return false;
            }
        };

        match self.source.fetch_restrictions(&node.id) {
            Ok(restrictions) => {
                let path = dir.join(format!("{safe_title}{RESTRICTIONS_SUFFIX}"));
                if let Err(err) = write_json(&restrictions, &path) {
                    warn!("Writing {} failed: {err}", path.display());
                }
            }
            Err(err) => {
                warn!("Fetching restrictions of page {} failed: {err}", node.id);
            }
        }

        let path = dir.join(format!("{safe_title}.html"));
        let html = detail
            .body
            .get(BodyFormat::StyledView)
            .map_or("", |content| content.value.as_str());
        match std::fs::write(&path, html) {
            Ok(()) => true,
            Err(err) => {
                warn!("Writing {} failed: {err}", path.display());
                false
            }
        }
    }
}

/// Write any serializable document as pretty-printed JSON.
fn write_json(document: &impl serde::Serialize, path: &Path) -> Result<(), ConfluenceError> {
    let json = serde_json::to_string_pretty(document)?;
    std::fs::write(path, json)?;
    Ok(())
}
