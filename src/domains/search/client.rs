//! SerpApi HTTP client.
//!
//! Thin wrapper around the SerpApi search endpoint used by the flight and
//! hotel tools. The API key is optional at construction time; a missing key
//! is reported when a search is attempted, so the server can start (and list
//! its tools) without credentials.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

const SERPAPI_ENDPOINT: &str = "https://serpapi.com/search.json";

/// Errors from the SerpApi backend.
#[derive(Debug, Error)]
pub enum SearchError {
    /// No API key configured (`SERP_API_KEY`).
    #[error("missing SERP_API_KEY - cannot call SerpApi")]
    MissingApiKey,

    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// SerpApi returned an error payload or a non-success status.
    #[error("SerpApi error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Client for the SerpApi search endpoint.
pub struct SerpApiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl SerpApiClient {
    /// Create a client with an optional API key.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            endpoint: SERPAPI_ENDPOINT.to_string(),
        }
    }

    /// Override the endpoint (used by tests against a local server).
    #[allow(dead_code)]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Whether an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Run a search against the given engine with the given query pairs.
    ///
    /// Returns the raw result document; shaping is left to the calling tool.
    pub async fn search(
        &self,
        engine: &str,
        params: Vec<(String, String)>,
    ) -> Result<Value, SearchError> {
        let api_key = self.api_key.as_deref().ok_or(SearchError::MissingApiKey)?;

        let mut query = vec![
            ("engine".to_string(), engine.to_string()),
            ("api_key".to_string(), api_key.to_string()),
        ];
        query.extend(params);

        debug!("SerpApi request: engine={}", engine);

        let response = self.http.get(&self.endpoint).query(&query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json().await?;

        // SerpApi reports engine-level failures inside a 200 response.
        if let Some(message) = body.get("error").and_then(Value::as_str) {
            return Err(SearchError::Api {
                status: status.as_u16(),
                message: message.to_string(),
            });
        }

        Ok(body)
    }
}
