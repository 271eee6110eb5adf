//! Watch page fetching

use crate::error::YtdlError;
use reqwest::Client;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Base URL for YouTube.
pub const YOUTUBE_BASE_URL: &str = "https://www.youtube.com";

/// bpctr sentinel value that bypasses content restriction interstitials.
const BPCTR_VALUE: &str = "9999999999";

/// A fetched YouTube video watch page
#[derive(Debug, Clone)]
pub struct WatchPage {
    /// The video ID this page was fetched for
    pub video_id: String,
    /// Raw HTML content of the page
    pub html: String,
}

/// Fetches YouTube video watch pages
#[derive(Debug, Clone)]
pub struct WatchPageFetcher {
    client: Client,
    base_url: String,
}

/// The URL of a video's watch page, including the bpctr sentinel.
pub fn watch_page_url(video_id: &str) -> String {
    format!(
        "{}/watch?v={}&bpctr={}",
        YOUTUBE_BASE_URL, video_id, BPCTR_VALUE
    )
}

impl WatchPageFetcher {
    /// Create a fetcher using the given HTTP client.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: YOUTUBE_BASE_URL.to_string(),
        }
    }

    /// Override the base URL (used by tests to point at a local server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Retrieve the watch page HTML for a video ID.
    pub async fn fetch(
        &self,
        cancel: &CancellationToken,
        video_id: &str,
    ) -> Result<WatchPage, YtdlError> {
        let url = format!(
            "{}/watch?v={}&bpctr={}",
            self.base_url, video_id, BPCTR_VALUE
        );
        debug!("fetching watch page: {}", url);

        let request = self.client.get(&url);
        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(YtdlError::Cancelled),
            response = request.send() => response?,
        };

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(YtdlError::RateLimited(
                "YouTube returned 429 Too Many Requests".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(YtdlError::UnexpectedStatus(status.as_u16()));
        }

        let html = tokio::select! {
            _ = cancel.cancelled() => return Err(YtdlError::Cancelled),
            body = response.text() => body?,
        };

        Ok(WatchPage {
            video_id: video_id.to_string(),
            html,
        })
    }
}
