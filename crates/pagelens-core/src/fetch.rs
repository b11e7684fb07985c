//! Page fetching
//!
//! Requires the `http-client` feature.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::error::{PageError, Result};
use crate::parser::validate_url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(12);

/// One-shot HTML fetcher: a single GET, fixed timeout, no retries
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!(
                "Mozilla/5.0 (compatible; pagelens/{})",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| PageError::Fetch {
                url: String::new(),
                reason: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self { client })
    }

    /// Validate `url` and fetch its body as text
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let url = validate_url(url)?;
        self.fetch_url(&url).await
    }

    pub async fn fetch_url(&self, url: &Url) -> Result<String> {
        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "request failed");
            PageError::fetch(url.as_str(), e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "non-success status");
            return Err(PageError::fetch(url.as_str(), format!("HTTP {status}")));
        }

        let html = response
            .text()
            .await
            .map_err(|e| PageError::Parse(e.to_string()))?;

        debug!(url = %url, bytes = html.len(), "page fetched");
        Ok(html)
    }
}
