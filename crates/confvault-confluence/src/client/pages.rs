//! Page operations for the Confluence API.

use tracing::info;

use super::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::types::{BodyFormat, CreatePageRequest, PageDetail};

impl ConfluenceClient {
    /// Get full page detail with its body in the given representation.
    pub fn get_page(
        &self,
        page_id: &str,
        format: BodyFormat,
    ) -> Result<PageDetail, ConfluenceError> {
        let url = format!(
            "{}/pages/{}?body-format={}",
            self.api_url(),
            page_id,
            format.as_str()
        );

        info!("Getting page {} ({})", page_id, format);

        self.get_json(&url)
    }

    /// Create a page from a storage-format body.
    pub fn create_page(
        &self,
        request: &CreatePageRequest,
    ) -> Result<PageDetail, ConfluenceError> {
        let url = format!("{}/pages", self.api_url());

        info!(
            "Creating page \"{}\" in space {}",
            request.title, request.space_id
        );

        let page: PageDetail = self.send_json("POST", &url, request)?;
        info!("Created page {} (\"{}\")", page.id, page.title);
        Ok(page)
    }
}
