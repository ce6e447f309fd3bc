//! HTTP client for fetching product pages, optionally through a render
//! gateway.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tokio::sync::Semaphore;

use crate::error::ScrapeError;

/// External render gateway settings (ScraperAPI-style).
///
/// When configured, fetches are routed through the gateway with
/// `render=true`: the gateway loads the page in a real browser, waits for
/// scripts to settle, and returns the rendered HTML. Pages that build their
/// content client-side are unusable without this.
#[derive(Debug, Clone)]
pub struct RenderGateway {
    pub endpoint: String,
    pub api_key: String,
}

/// HTTP client for fetching product pages.
///
/// Sends a realistic browser user-agent and header set (commerce sites
/// routinely block default library agents) under a bounded request timeout.
/// In-flight fetches are capped by a semaphore; the permit is released by
/// drop on every exit path, so a failed or timed-out fetch never leaks its
/// slot.
pub struct PageFetcher {
    client: Client,
    render_gateway: Option<RenderGateway>,
    permits: Arc<Semaphore>,
}

impl PageFetcher {
    /// Creates a `PageFetcher` with configured timeout, `User-Agent`, and
    /// fetch-concurrency cap.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_concurrent_fetches: usize,
        render_gateway: Option<RenderGateway>,
    ) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            render_gateway,
            permits: Arc::new(Semaphore::new(max_concurrent_fetches)),
        })
    }

    /// Fetches a page's HTML, rendered when a gateway is configured.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::InvalidUrl`] — the page URL (or gateway endpoint)
    ///   does not parse.
    /// - [`ScrapeError::UnexpectedStatus`] — any non-2xx response.
    /// - [`ScrapeError::EmptyBody`] — a 2xx response with a blank body.
    /// - [`ScrapeError::Http`] — network failure or timeout.
    pub async fn fetch_page(&self, page_url: &str) -> Result<String, ScrapeError> {
        let request_url = self.request_url(page_url)?;

        // One permit per in-flight fetch, held until this function returns.
        let _permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .expect("fetch semaphore is never closed");

        tracing::debug!(url = %page_url, rendered = self.render_gateway.is_some(), "fetching page");

        let response = self
            .client
            .get(&request_url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(reqwest::header::UPGRADE_INSECURE_REQUESTS, "1")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::UnexpectedStatus {
                status: status.as_u16(),
                url: page_url.to_owned(),
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(ScrapeError::EmptyBody {
                url: page_url.to_owned(),
            });
        }

        Ok(body)
    }

    /// Builds the URL actually requested: the page URL itself for direct
    /// fetches, or the gateway endpoint with `api_key`/`url`/`render` query
    /// parameters when a gateway is configured.
    fn request_url(&self, page_url: &str) -> Result<String, ScrapeError> {
        // Validate the target before spending a fetch slot on it.
        reqwest::Url::parse(page_url).map_err(|e| ScrapeError::InvalidUrl {
            url: page_url.to_owned(),
            reason: e.to_string(),
        })?;

        let Some(gateway) = &self.render_gateway else {
            return Ok(page_url.to_string());
        };

        let mut url =
            reqwest::Url::parse(&gateway.endpoint).map_err(|e| ScrapeError::InvalidUrl {
                url: gateway.endpoint.clone(),
                reason: e.to_string(),
            })?;

        url.query_pairs_mut()
            .append_pair("api_key", &gateway.api_key)
            .append_pair("url", page_url)
            .append_pair("render", "true");

        Ok(url.to_string())
    }
}
