//! Restore a saved page from its local artifacts.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::backup::RESTRICTIONS_SUFFIX;
use crate::client::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::types::{CreatePageRequest, PageDetail, RestrictionSet};

/// Write operations the restore path needs on the remote side.
pub trait RestoreTarget {
    /// Create a page from a storage-format body.
    fn create_page(&self, request: &CreatePageRequest) -> Result<PageDetail, ConfluenceError>;

    /// Apply a restriction set to a page.
    fn put_restrictions(
        &self,
        page_id: &str,
        restrictions: &RestrictionSet,
    ) -> Result<(), ConfluenceError>;
}

impl RestoreTarget for ConfluenceClient {
    fn create_page(&self, request: &CreatePageRequest) -> Result<PageDetail, ConfluenceError> {
        Self::create_page(self, request)
    }

    fn put_restrictions(
        &self,
        page_id: &str,
        restrictions: &RestrictionSet,
    ) -> Result<(), ConfluenceError> {
        Self::put_restrictions(self, page_id, restrictions)
    }
}

/// Error from restoring a saved page.
#[derive(Debug, thiserror::Error)]
pub enum RestoreError {
    /// Artifact file could not be read.
    #[error("Cannot read artifact {}: {source}", .path.display())]
    Artifact {
        /// Artifact path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Artifact is not valid JSON or misses a required field.
    #[error("Malformed artifact {}: {source}", .path.display())]
    Malformed {
        /// Artifact path.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// Artifact carries no storage-format body.
    #[error("Artifact {} has no body.storage.value", .path.display())]
    MissingStorageBody {
        /// Artifact path.
        path: PathBuf,
    },

    /// Remote call failed.
    #[error(transparent)]
    Confluence(#[from] ConfluenceError),
}

/// Result of a completed restore.
#[derive(Debug, Clone)]
pub struct RestoreReport {
    /// ID of the newly created page.
    pub page_id: String,
    /// Title of the restored page.
    pub title: String,
    /// Whether the saved restriction set was applied to the new page.
    pub restrictions_restored: bool,
}

/// Artifact paths for a saved page: `<dir>/<name>.json` and
/// `<dir>/<name>-confrestrict.json`.
#[must_use]
pub fn artifact_paths(dir: &Path, name: &str) -> (PathBuf, PathBuf) {
    (
        dir.join(format!("{name}.json")),
        dir.join(format!("{name}{RESTRICTIONS_SUFFIX}")),
    )
}

/// Recreate a page from its saved artifacts.
///
/// Reads the storage-format detail from `content_path`, validates the
/// fields a create call needs (before any network traffic), creates the
/// page, then replays the restriction set from `restrictions_path`.
///
/// The saved `spaceId` and `parentId` are reused verbatim, so a restore is
/// only valid against the instance the backup was taken from. A missing or
/// rejected restriction artifact is logged and reported via
/// [`RestoreReport::restrictions_restored`], not treated as fatal; a
/// failed create is.
///
/// # Errors
///
/// Returns [`RestoreError`] if the content artifact is unreadable or
/// malformed, or if the create call fails.
pub fn restore_page<T: RestoreTarget>(
    target: &T,
    content_path: &Path,
    restrictions_path: &Path,
) -> Result<RestoreReport, RestoreError> {
    let detail = load_detail(content_path)?;
    let storage_value =
        detail
            .body
            .storage_value()
            .ok_or_else(|| RestoreError::MissingStorageBody {
                path: content_path.to_path_buf(),
            })?;

    let request = CreatePageRequest::new(
        detail.title.clone(),
        detail.space_id.clone(),
        detail.parent_id.clone(),
        storage_value,
    );

    let created = target.create_page(&request)?;
    info!("Restored page \"{}\" as {}", created.title, created.id);

    let restrictions_restored = match load_restrictions(restrictions_path) {
        Ok(restrictions) => match target.put_restrictions(&created.id, &restrictions) {
            Ok(()) => {
                info!("Restored restrictions to page {}", created.id);
                true
            }
            Err(err) => {
                warn!("Applying restrictions to page {} failed: {err}", created.id);
                false
            }
        },
        Err(err) => {
            warn!("Skipping restriction restore: {err}");
            false
        }
    };

    Ok(RestoreReport {
        page_id: created.id,
        title: created.title,
        restrictions_restored,
    })
}

/// Load and validate the restorable content artifact.
fn load_detail(path: &Path) -> Result<PageDetail, RestoreError> {
    let content = std::fs::read_to_string(path).map_err(|source| RestoreError::Artifact {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| RestoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the restriction artifact.
fn load_restrictions(path: &Path) -> Result<RestrictionSet, RestoreError> {
    let content = std::fs::read_to_string(path).map_err(|source| RestoreError::Artifact {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| RestoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::{BackupSource, ExportOutcome, PageExporter};
    use crate::test_support::{FakeSource, FakeTarget, page_node};
    use crate::types::BodyFormat;
    use pretty_assertions::assert_eq;

    fn write_artifacts(dir: &Path, name: &str, content: &str, restrictions: &str) {
        let (content_path, restrictions_path) = artifact_paths(dir, name);
        std::fs::write(content_path, content).unwrap();
        std::fs::write(restrictions_path, restrictions).unwrap();
    }

    const SAVED_PAGE: &str = r#"{
        "id": "4325379",
        "title": "Visual Studios - Setup",
        "spaceId": "163842",
        "parentId": "4325377",
        "version": {"number": 7},
        "body": {"storage": {"representation": "storage", "value": "<p>setup</p>"}}
    }"#;

    #[test]
    fn test_restore_replays_create_and_restrictions() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(
            dir.path(),
            "Visual Studios - Setup",
            SAVED_PAGE,
            r#"{"results": [{"operation": "read"}]}"#,
        );
        let (content_path, restrictions_path) =
            artifact_paths(dir.path(), "Visual Studios - Setup");

        let target = FakeTarget::default();
        let report = restore_page(&target, &content_path, &restrictions_path).unwrap();

        assert_eq!(report.page_id, "new-id");
        assert_eq!(report.title, "Visual Studios - Setup");
        assert!(report.restrictions_restored);

        let created = target.created.borrow();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].title, "Visual Studios - Setup");
        assert_eq!(created[0].space_id, "163842");
        assert_eq!(created[0].parent_id, Some("4325377".to_owned()));
        assert_eq!(created[0].body.value, "<p>setup</p>");

        let restricted = target.restricted.borrow();
        assert_eq!(restricted.len(), 1);
        assert_eq!(restricted[0].0, "new-id");
    }

    #[test]
    fn test_restore_missing_content_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let (content_path, restrictions_path) = artifact_paths(dir.path(), "gone");

        let target = FakeTarget::default();
        let err = restore_page(&target, &content_path, &restrictions_path).unwrap_err();

        assert!(matches!(err, RestoreError::Artifact { .. }));
        assert!(target.created.borrow().is_empty());
    }

    #[test]
    fn test_restore_rejects_artifact_missing_space_id() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(
            dir.path(),
            "bad",
            r#"{"id": "1", "title": "t", "version": {"number": 1}, "body": {}}"#,
            "{}",
        );
        let (content_path, restrictions_path) = artifact_paths(dir.path(), "bad");

        let target = FakeTarget::default();
        let err = restore_page(&target, &content_path, &restrictions_path).unwrap_err();

        assert!(matches!(err, RestoreError::Malformed { .. }));
        assert!(err.to_string().contains("bad.json"));
        // Validation failed before any network call.
        assert!(target.created.borrow().is_empty());
    }

    #[test]
    fn test_restore_rejects_artifact_without_storage_body() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(
            dir.path(),
            "viewonly",
            r#"{
                "id": "1", "title": "t", "spaceId": "s", "version": {"number": 1},
                "body": {"styled_view": {"representation": "styled_view", "value": "<html/>"}}
            }"#,
            "{}",
        );
        let (content_path, restrictions_path) = artifact_paths(dir.path(), "viewonly");

        let target = FakeTarget::default();
        let err = restore_page(&target, &content_path, &restrictions_path).unwrap_err();

        assert!(matches!(err, RestoreError::MissingStorageBody { .. }));
        assert!(target.created.borrow().is_empty());
    }

    #[test]
    fn test_restore_create_failure_skips_restrictions() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path(), "page", SAVED_PAGE, "{}");
        let (content_path, restrictions_path) = artifact_paths(dir.path(), "page");

        let target = FakeTarget {
            fail_create: Some(403),
            ..FakeTarget::default()
        };
        let err = restore_page(&target, &content_path, &restrictions_path).unwrap_err();

        assert!(matches!(
            err,
            RestoreError::Confluence(ConfluenceError::HttpResponse { status: 403, .. })
        ));
        assert!(target.restricted.borrow().is_empty());
    }

    #[test]
    fn test_restore_restriction_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path(), "page", SAVED_PAGE, "{}");
        let (content_path, restrictions_path) = artifact_paths(dir.path(), "page");

        let target = FakeTarget {
            fail_restrictions: true,
            ..FakeTarget::default()
        };
        let report = restore_page(&target, &content_path, &restrictions_path).unwrap();

        assert_eq!(report.page_id, "new-id");
        assert!(!report.restrictions_restored);
    }

    #[test]
    fn test_restore_missing_restriction_artifact_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let (content_path, restrictions_path) = artifact_paths(dir.path(), "page");
        std::fs::write(&content_path, SAVED_PAGE).unwrap();

        let target = FakeTarget::default();
        let report = restore_page(&target, &content_path, &restrictions_path).unwrap();

        assert!(!report.restrictions_restored);
        assert_eq!(target.created.borrow().len(), 1);
    }

    #[test]
    fn test_export_then_restore_round_trip() {
        // Export a page with a fake source, then restore from the written
        // artifacts: the create call must match the originally fetched
        // detail field for field.
        let mut source = FakeSource::default();
        source.add_full_page("P1", "A/B");

        let dir = tempfile::tempdir().unwrap();
        let exporter = PageExporter::new(&source);
        let outcome = exporter.export(&page_node("P1", "A/B"), dir.path());
        assert_eq!(outcome, ExportOutcome::Full);

        let (content_path, restrictions_path) = artifact_paths(dir.path(), "A_B");
        let target = FakeTarget::default();
        let report = restore_page(&target, &content_path, &restrictions_path).unwrap();
        assert!(report.restrictions_restored);

        let original = source
            .fetch_page("P1", BodyFormat::Storage)
            .unwrap();
        let created = target.created.borrow();
        assert_eq!(created[0].title, original.title);
        assert_eq!(created[0].space_id, original.space_id);
        assert_eq!(created[0].parent_id, original.parent_id);
        assert_eq!(
            created[0].body.value,
            original.body.storage_value().unwrap()
        );

        let restricted = target.restricted.borrow();
        let original_restrictions = source.fetch_restrictions("P1").unwrap();
        assert_eq!(restricted[0].1, original_restrictions);
    }
}
