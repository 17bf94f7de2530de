// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::Path;

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabSearchConfig {
    /// Host the search request is sent to.
    pub base_url: String,
    pub search_path: String,
    /// Origin that relative tab links are resolved against.
    pub origin: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for TabSearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.songsterr.com".to_string(),
            search_path: "/a/wa/search".to_string(),
            origin: "https://www.songsterr.com".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Unset fields keep the lookup cache unbounded and non-expiring.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CacheConfig {
    pub max_capacity: Option<u64>,
    pub time_to_live_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub max_concurrent_lookups: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_concurrent_lookups: 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyConfig {
    pub api_base_url: String,
    pub access_token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.spotify.com/v1".to_string(),
            access_token: None,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub telemetry: TelemetryConfig,
    pub tab_search: TabSearchConfig,
    pub cache: CacheConfig,
    pub pipeline: PipelineConfig,
    pub spotify: SpotifyConfig,
}

/// Load configuration from defaults, optional TOML file, and environment overrides (prefix: TABSCOUT_).
pub fn load(config_path: Option<&Path>) -> Result<AppConfig> {
    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

    if let Some(path) = config_path {
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("TABSCOUT_").split("__"));

    let config: AppConfig = figment.extract()?;
    info!(target: "config", "configuration loaded");
    Ok(config)
}
