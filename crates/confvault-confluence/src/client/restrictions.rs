//! Page restriction operations.
//!
//! The v2 API has no restriction resource yet, so both operations use the
//! legacy v1 `content/{id}/restriction` endpoints.

use tracing::info;

use super::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::types::RestrictionSet;

impl ConfluenceClient {
    /// Get the restriction set of a page.
    pub fn get_restrictions(&self, page_id: &str) -> Result<RestrictionSet, ConfluenceError> {
        let url = format!("{}/content/{}/restriction", self.legacy_api_url(), page_id);

        info!("Getting restrictions for page {}", page_id);

        self.get_json(&url)
    }

    /// Apply a restriction set to a page.
    ///
    /// The endpoint may answer 200 with a body or 204 without one; only
    /// the status matters here.
    pub fn put_restrictions(
        &self,
        page_id: &str,
        restrictions: &RestrictionSet,
    ) -> Result<(), ConfluenceError> {
        let url = format!("{}/content/{}/restriction", self.legacy_api_url(), page_id);

        info!("Applying restrictions to page {}", page_id);

        let payload_bytes = serde_json::to_vec(restrictions)?;

        let response = self
            .agent
            .put(&url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload_bytes[..])?;

        Self::check_status(response)?;
        Ok(())
    }
}
