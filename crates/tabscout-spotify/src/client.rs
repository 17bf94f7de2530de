// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{Result, SpotifyError};
use crate::models::PlaylistTracksPage;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::time::Duration;
use tabscout_domain::{AudioFeatures, Track};
use tracing::{debug, instrument, trace};
use url::Url;

const SPOTIFY_API_BASE: &str = "https://api.spotify.com/v1";

/// Spotify Web API client authenticated with a user bearer token.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl SpotifyClient {
    /// Create a client with default settings and the given access token.
    pub fn new(access_token: impl Into<String>) -> Result<Self> {
        Self::builder().access_token(access_token).build()
    }

    pub fn builder() -> SpotifyClientBuilder {
        SpotifyClientBuilder::default()
    }

    /// Fetch every track of a playlist, following pagination links.
    ///
    /// Playlist entries without a track object are skipped. A page is fetched
    /// at most once, so a `next` link back to an earlier page ends the walk.
    #[instrument(skip(self))]
    pub async fn fetch_playlist_tracks(&self, playlist_id: &str) -> Result<Vec<Track>> {
        let mut next = Some(self.endpoint(&["playlists", playlist_id, "tracks"])?);
        let mut visited = HashSet::new();
        let mut tracks = Vec::new();

        while let Some(url) = next.take() {
            if !visited.insert(url.clone()) {
                debug!(target: "spotify", %url, "pagination revisits a fetched page, stopping");
                break;
            }
            let page: PlaylistTracksPage = self.get(&url).await?;
            debug!(
                target: "spotify",
                items = page.items.len(),
                total = ?page.total,
                "fetched playlist page"
            );
            tracks.extend(page.items.into_iter().filter_map(|item| item.track));
            next = page.next;
        }

        Ok(tracks)
    }

    /// Fetch tempo/energy analysis for a track.
    #[instrument(skip(self))]
    pub async fn fetch_audio_features(&self, track_id: &str) -> Result<AudioFeatures> {
        let url = self.endpoint(&["audio-features", track_id])?;
        self.get(&url).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<String> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| SpotifyError::InvalidResponse(format!("invalid base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| SpotifyError::InvalidResponse(format!("invalid base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.to_string())
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let token = self
            .access_token
            .as_deref()
            .ok_or(SpotifyError::MissingAccessToken)?;

        trace!(target: "spotify", "GET {}", url);

        let response = self.client.get(url).bearer_auth(token).send().await?;

        let status = response.status();
        debug!(target: "spotify", "response status: {}", status);

        match status {
            StatusCode::UNAUTHORIZED => return Err(SpotifyError::Unauthorized),
            StatusCode::NOT_FOUND => return Err(SpotifyError::NotFound(url.to_string())),
            _ => {}
        }

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SpotifyError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        trace!(target: "spotify", "response body: {}", body);

        serde_json::from_str(&body).map_err(|e| {
            SpotifyError::InvalidResponse(format!("Failed to parse response: {}", e))
        })
    }
}

/// Builder for configuring a Spotify client.
#[derive(Debug)]
pub struct SpotifyClientBuilder {
    base_url: String,
    access_token: Option<String>,
    timeout: Duration,
}

impl Default for SpotifyClientBuilder {
    fn default() -> Self {
        Self {
            base_url: SPOTIFY_API_BASE.to_string(),
            access_token: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl SpotifyClientBuilder {
    /// Set a custom base URL (useful for testing with mock servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set request timeout duration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<SpotifyClient> {
        let client = Client::builder().timeout(self.timeout).build()?;

        Ok(SpotifyClient {
            client,
            base_url: self.base_url,
            access_token: self.access_token,
        })
    }
}
