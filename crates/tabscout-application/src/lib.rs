// SPDX-License-Identifier: GPL-3.0-or-later
pub mod difficulty;
pub mod pipeline;

pub use difficulty::{classify, classify_features, AudioFeatureSource, DifficultyDetector};
pub use pipeline::PlaylistEnrichmentPipeline;

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tabscout_config::AppConfig;
use tabscout_spotify::SpotifyClient;
use tabscout_tabs::{SongEntryExtractor, SongsterrClient, TabLookup, TabLookupCache};
use tracing::info;

/// Services wired from configuration. The tab cache lives as long as the state.
pub struct AppState {
    pub config: AppConfig,
    pub pipeline: PlaylistEnrichmentPipeline,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let pipeline = build_pipeline(&config)?;
        Ok(Self { config, pipeline })
    }

    pub fn on_start(&self) {
        info!(
            target: "application",
            max_concurrent_lookups = self.config.pipeline.max_concurrent_lookups,
            "application state initialized"
        );
    }

    pub fn spotify_client(&self) -> Result<SpotifyClient> {
        let spotify = &self.config.spotify;
        let mut builder = SpotifyClient::builder()
            .base_url(spotify.api_base_url.clone())
            .timeout(Duration::from_secs(spotify.timeout_secs));
        if let Some(token) = &spotify.access_token {
            builder = builder.access_token(token.clone());
        }
        Ok(builder.build()?)
    }

    pub fn difficulty_detector(&self) -> Result<DifficultyDetector> {
        Ok(DifficultyDetector::new(Arc::new(self.spotify_client()?)))
    }
}

pub fn build_pipeline(config: &AppConfig) -> Result<PlaylistEnrichmentPipeline> {
    let search = &config.tab_search;
    let client = SongsterrClient::builder()
        .base_url(search.base_url.clone())
        .search_path(search.search_path.clone())
        .user_agent(search.user_agent.clone())
        .timeout(Duration::from_secs(search.timeout_secs))
        .build()?;
    let lookup = TabLookup::new(
        Arc::new(client),
        Arc::new(SongEntryExtractor::new()),
        &search.origin,
    )?;

    let mut cache = TabLookupCache::builder();
    if let Some(max_capacity) = config.cache.max_capacity {
        cache = cache.max_capacity(max_capacity);
    }
    if let Some(ttl) = config.cache.time_to_live_secs {
        cache = cache.time_to_live(Duration::from_secs(ttl));
    }

    Ok(PlaylistEnrichmentPipeline::new(lookup, cache.build())
        .with_max_concurrent_lookups(config.pipeline.max_concurrent_lookups))
}
