//! HTTP client for downloading the product page.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use crate::error::FetchFailure;

/// A downloaded page. Non-200 bodies are kept: whether they hold the
/// variable is for the extractor to decide.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK.as_u16()
    }
}

/// Single-shot page downloader with a bounded request timeout.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Creates a `PageFetcher` with the given request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchFailure::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, FetchFailure> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Downloads `url` once. No retries.
    ///
    /// # Errors
    ///
    /// - [`FetchFailure::InvalidUrl`] if `url` is not an absolute URL.
    /// - [`FetchFailure::Http`] on network, TLS, timeout, or body decoding failure.
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchFailure> {
        let parsed = Url::parse(url).map_err(|e| FetchFailure::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;

        let response = self
            .client
            .get(parsed)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != StatusCode::OK.as_u16() {
            tracing::debug!(url, status, "non-200 response");
        }
        let body = response.text().await?;

        Ok(FetchedPage { status, body })
    }
}
