//! Headless CMS GraphQL client.
//!
//! Provides a sync HTTP client for the CMS content API. Requests are
//! `POST {query, variables}` authenticated with an `X-API-KEY` header.

mod documents;

use std::time::Duration;

use serde_json::{Value, json};
use shelf_config::CmsEndpoint;
use ureq::Agent;

use crate::error::CmsError;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// CMS GraphQL API client.
pub struct CmsClient {
    agent: Agent,
    url: String,
    token: String,
    branch: Option<String>,
}

impl CmsClient {
    /// Create a client for a GraphQL endpoint.
    #[must_use]
    pub fn new(url: &str, token: &str) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            url: url.trim_end_matches('/').to_owned(),
            token: token.to_owned(),
            branch: None,
        }
    }

    /// Create a client from a resolved CMS endpoint.
    #[must_use]
    pub fn from_endpoint(endpoint: &CmsEndpoint) -> Self {
        let mut client = Self::new(&endpoint.url, &endpoint.token);
        client.branch.clone_from(&endpoint.branch);
        client
    }

    /// GraphQL endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Run a GraphQL operation and return its `data` member.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::HttpResponse`] for error statuses and
    /// [`CmsError::GraphQl`] when the response lists errors.
    pub fn graphql(&self, query: &str, variables: Value) -> Result<Value, CmsError> {
        let mut request = self
            .agent
            .post(&self.url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");
        if !self.token.is_empty() {
            request = request.header("X-API-KEY", &self.token);
        }
        if let Some(branch) = &self.branch {
            request = request.header("X-Branch", branch);
        }

        let response = request.send_json(json!({"query": query, "variables": variables}))?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(CmsError::HttpResponse {
                status,
                body: error_body,
            });
        }

        let body: Value = body_reader.read_json()?;
        extract_data(body)
    }
}

/// Split a GraphQL response into data or errors.
fn extract_data(mut body: Value) -> Result<Value, CmsError> {
    if let Some(errors) = body.get("errors").and_then(Value::as_array)
        && !errors.is_empty()
    {
        let messages: Vec<_> = errors
            .iter()
            .map(|e| {
                e.get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown error")
                    .to_owned()
            })
            .collect();
        return Err(CmsError::GraphQl(messages.join("; ")));
    }

    match body.get_mut("data").map(Value::take) {
        Some(data) if !data.is_null() => Ok(data),
        _ => Err(CmsError::InvalidResponse("response has no data".to_owned())),
    }
}
