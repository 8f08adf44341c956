//! Folder descendant listing.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::info;

use super::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::types::DescendantsPage;

/// Listing depth. One level at a time; the walker recurses. Server max is 5.
const DESCENDANTS_DEPTH: u8 = 1;

/// Results per listing page. Server max is 250.
const DESCENDANTS_LIMIT: u16 = 250;

/// Characters escaped in the cursor query value (everything except the
/// URL-unreserved set).
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

impl ConfluenceClient {
    /// List one page of a folder's immediate descendants.
    ///
    /// Pass the cursor from [`DescendantsPage::next_cursor`] to continue a
    /// paginated listing; `None` starts from the beginning.
    pub fn list_descendants(
        &self,
        folder_id: &str,
        cursor: Option<&str>,
    ) -> Result<DescendantsPage, ConfluenceError> {
        let mut url = format!(
            "{}/folders/{}/descendants?depth={DESCENDANTS_DEPTH}&limit={DESCENDANTS_LIMIT}",
            self.api_url(),
            folder_id
        );
        if let Some(cursor) = cursor {
            url.push_str("&cursor=");
            url.push_str(&utf8_percent_encode(cursor, QUERY_VALUE).to_string());
        }

        info!(
            "Listing descendants of folder {} (cursor: {})",
            folder_id,
            cursor.unwrap_or("none")
        );

        self.get_json(&url)
    }
}
