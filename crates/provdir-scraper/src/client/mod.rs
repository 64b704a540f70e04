//! HTTP client for directory listing and profile pages.

mod origin;

use std::time::Duration;

use reqwest::{header, Client, Response, StatusCode};

use crate::error::ScraperError;
use crate::fetch::PageFetcher;
use crate::retry::RetryPolicy;

pub(crate) use origin::extract_domain;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8";

/// Fetches directory pages over HTTPS.
///
/// Non-success statuses become typed errors: 429 is [`ScraperError::RateLimited`],
/// 404 is [`ScraperError::NotFound`], anything else [`ScraperError::UnexpectedStatus`].
/// Transport failures and 5xx responses are re-tried up to `max_retries`
/// times; with `max_retries = 0` the first failure is final.
pub struct DirectoryClient {
    client: Client,
    retry: RetryPolicy,
}

impl DirectoryClient {
    /// Builds a client with the given request timeout, `User-Agent`, and
    /// retry budget.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            retry: RetryPolicy {
                max_retries,
                backoff_base_secs,
            },
        })
    }

    /// Fetches one page and returns its body as text.
    ///
    /// # Errors
    ///
    /// Returns the typed status error described on [`DirectoryClient`], or
    /// [`ScraperError::Http`] on a network or TLS failure, once retries are
    /// used up.
    pub async fn fetch_html(&self, url: &str) -> Result<String, ScraperError> {
        self.retry.run(|| self.get_once(url)).await
    }

    async fn get_once(&self, url: &str) -> Result<String, ScraperError> {
        tracing::debug!(url, "fetching page");
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, ACCEPT_HTML)
            .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;

        let response = check_status(response, url)?;
        let body = response.text().await?;
        tracing::debug!(url, bytes = body.len(), "fetched page");
        Ok(body)
    }
}

fn check_status(response: Response, url: &str) -> Result<Response, ScraperError> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::TOO_MANY_REQUESTS => Err(ScraperError::RateLimited {
            domain: extract_domain(url),
            retry_after_secs: response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse().ok()),
        }),
        StatusCode::NOT_FOUND => Err(ScraperError::NotFound {
            url: url.to_owned(),
        }),
        status => Err(ScraperError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        }),
    }
}

impl PageFetcher for DirectoryClient {
    async fn fetch(&self, url: &str) -> Result<String, ScraperError> {
        self.fetch_html(url).await
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
