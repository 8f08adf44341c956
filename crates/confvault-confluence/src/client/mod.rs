//! Confluence REST API client.
//!
//! Sync HTTP client for the Confluence Cloud REST API with static basic
//! authentication (account email + API token).

mod descendants;
mod pages;
mod restrictions;

use std::time::Duration;

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use serde::de::DeserializeOwned;
use ureq::Agent;

use crate::error::ConfluenceError;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Confluence REST API client.
pub struct ConfluenceClient {
    agent: Agent,
    base_url: String,
    auth_header: String,
}

impl ConfluenceClient {
    /// Create a client for a Confluence Cloud instance.
    ///
    /// # Arguments
    /// * `base_url` - Instance base URL (e.g. `https://example.atlassian.net`)
    /// * `email` - Atlassian account email
    /// * `api_token` - API token for that account
    #[must_use]
    pub fn new(base_url: &str, email: &str, api_token: &str) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        let auth_header = format!(
            "Basic {}",
            BASE64_STANDARD.encode(format!("{email}:{api_token}"))
        );

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            auth_header,
        }
    }

    /// v2 API base URL.
    fn api_url(&self) -> String {
        format!("{}/wiki/api/v2", self.base_url)
    }

    /// Legacy v1 API base URL.
    ///
    /// The v2 API does not expose page restrictions yet; those operations
    /// go through the v1 endpoints.
    fn legacy_api_url(&self) -> String {
        format!("{}/wiki/rest/api", self.base_url)
    }

    /// GET a JSON resource.
    pub(crate) fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ConfluenceError> {
        let response = self
            .agent
            .get(url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        let mut body_reader = Self::check_status(response)?;
        Ok(body_reader.read_json()?)
    }

    /// Send a JSON payload and decode a JSON response.
    pub(crate) fn send_json<T: DeserializeOwned>(
        &self,
        method: &str,
        url: &str,
        payload: &impl serde::Serialize,
    ) -> Result<T, ConfluenceError> {
        let payload_bytes = serde_json::to_vec(payload)?;

        let request = match method {
            "PUT" => self.agent.put(url),
            _ => self.agent.post(url),
        };
        let response = request
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload_bytes[..])?;

        let mut body_reader = Self::check_status(response)?;
        Ok(body_reader.read_json()?)
    }

    /// Turn a non-success status into `HttpResponse` carrying the body text.
    fn check_status(
        response: ureq::http::Response<ureq::Body>,
    ) -> Result<ureq::Body, ConfluenceError> {
        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(ConfluenceError::HttpResponse {
                status,
                body: error_body,
            });
        }

        Ok(body_reader)
    }
}
