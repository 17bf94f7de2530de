// SPDX-License-Identifier: GPL-3.0-or-later
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

const SONGSTERR_BASE_URL: &str = "https://www.songsterr.com";
const SEARCH_PATH: &str = "/a/wa/search";
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Issues one search request per query and hands back the raw response markup.
#[async_trait]
pub trait TabSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<String, TabSearchError>;
}

#[derive(Debug, Error)]
pub enum TabSearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// HTTP client for the Songsterr search page.
#[derive(Debug, Clone)]
pub struct SongsterrClient {
    client: Client,
    search_url: Url,
}

impl SongsterrClient {
    pub fn new() -> Result<Self, TabSearchError> {
        Self::builder().build()
    }

    pub fn builder() -> SongsterrClientBuilder {
        SongsterrClientBuilder::default()
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }
}

#[async_trait]
impl TabSearch for SongsterrClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<String, TabSearchError> {
        debug!(target: "tabs", url = %self.search_url, "searching for tabs");

        let response = self
            .client
            .get(self.search_url.clone())
            .query(&[("pattern", query)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(target: "tabs", %status, bytes = body.len(), "search response received");

        if !status.is_success() {
            return Err(TabSearchError::HttpStatus { status, body });
        }

        Ok(body)
    }
}

#[derive(Debug)]
pub struct SongsterrClientBuilder {
    base_url: String,
    search_path: String,
    user_agent: String,
    timeout: Duration,
}

impl Default for SongsterrClientBuilder {
    fn default() -> Self {
        Self {
            base_url: SONGSTERR_BASE_URL.to_string(),
            search_path: SEARCH_PATH.to_string(),
            user_agent: BROWSER_USER_AGENT.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl SongsterrClientBuilder {
    /// Set a custom base URL (useful for testing with mock servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn search_path(mut self, path: impl Into<String>) -> Self {
        self.search_path = path.into();
        self
    }

    /// The search page rejects requests that do not look like a browser.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<SongsterrClient, TabSearchError> {
        let base = Url::parse(self.base_url.trim_end_matches('/'))
            .map_err(|source| TabSearchError::InvalidBaseUrl(format!("{}: {}", self.base_url, source)))?;
        let search_url = base
            .join(&self.search_path)
            .map_err(|source| TabSearchError::InvalidBaseUrl(format!("{}: {}", self.search_path, source)))?;

        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .build()?;

        Ok(SongsterrClient { client, search_url })
    }
}
