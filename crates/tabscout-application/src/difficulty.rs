// SPDX-License-Identifier: GPL-3.0-or-later

//! Playing-difficulty estimate from a track's tempo and energy.

use async_trait::async_trait;
use std::sync::Arc;
use tabscout_domain::{AudioFeatures, DifficultyLabel};
use tabscout_spotify::SpotifyClient;
use tracing::{debug, warn};

const DEFAULT_TEMPO: f64 = 120.0;
const DEFAULT_ENERGY: f64 = 0.5;

/// Score tempo (±2 around 120 BPM) and energy (±1 around 0.5); a negative score
/// is easy, a positive one hard. A zero score falls back to tempo alone:
/// below 115 is easy, above 125 hard, anything else intermediate.
pub fn classify(tempo: f64, energy: f64) -> DifficultyLabel {
    let mut score = 0i32;

    if tempo < DEFAULT_TEMPO {
        score -= 2;
    } else if tempo > DEFAULT_TEMPO {
        score += 2;
    }

    if energy < DEFAULT_ENERGY {
        score -= 1;
    } else if energy > DEFAULT_ENERGY {
        score += 1;
    }

    match score {
        s if s < 0 => DifficultyLabel::Easy,
        s if s > 0 => DifficultyLabel::Hard,
        _ if tempo < 115.0 => DifficultyLabel::Easy,
        _ if tempo > 125.0 => DifficultyLabel::Hard,
        _ => DifficultyLabel::Intermediate,
    }
}

/// [`classify`] with absent, zero or NaN values replaced by 120 BPM and 0.5 energy.
pub fn classify_features(features: &AudioFeatures) -> DifficultyLabel {
    classify(
        usable(features.tempo).unwrap_or(DEFAULT_TEMPO),
        usable(features.energy).unwrap_or(DEFAULT_ENERGY),
    )
}

fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

#[async_trait]
pub trait AudioFeatureSource: Send + Sync {
    async fn audio_features(&self, track_id: &str) -> anyhow::Result<AudioFeatures>;
}

#[async_trait]
impl AudioFeatureSource for SpotifyClient {
    async fn audio_features(&self, track_id: &str) -> anyhow::Result<AudioFeatures> {
        Ok(self.fetch_audio_features(track_id).await?)
    }
}

/// Fetches features and classifies them. A failed fetch yields `Intermediate`.
#[derive(Clone)]
pub struct DifficultyDetector {
    source: Arc<dyn AudioFeatureSource>,
}

impl DifficultyDetector {
    pub fn new(source: Arc<dyn AudioFeatureSource>) -> Self {
        Self { source }
    }

    pub async fn detect(&self, track_id: &str) -> DifficultyLabel {
        match self.source.audio_features(track_id).await {
            Ok(features) => {
                let label = classify_features(&features);
                debug!(
                    target: "difficulty",
                    track_id,
                    tempo = ?features.tempo,
                    energy = ?features.energy,
                    %label,
                    "classified track"
                );
                label
            }
            Err(error) => {
                warn!(target: "difficulty", track_id, error = %error, "audio features unavailable");
                DifficultyLabel::Intermediate
            }
        }
    }
}
