// SPDX-License-Identifier: GPL-3.0-or-later
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Tracks
// ============================================================================

/// Artist credit as delivered by the streaming service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArtistRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ArtistRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            extra: Map::new(),
        }
    }
}

/// A playlist track. Fields the scanner does not interpret are kept in `extra`
/// so the track round-trips unchanged into the enriched output.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Track {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Track {
    pub fn new(name: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            artists: vec![ArtistRef::named(artist)],
            extra: Map::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Title plus first credited artist, or `None` when either is missing or empty.
    pub fn query(&self) -> Option<TrackQuery> {
        let title = self.name.as_deref().filter(|name| !name.is_empty())?;
        let artist = self
            .artists
            .first()
            .and_then(|artist| artist.name.as_deref())
            .filter(|name| !name.is_empty())?;
        Some(TrackQuery::new(title, artist))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackQuery {
    pub title: String,
    pub artist: String,
}

impl TrackQuery {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }

    /// Free-text pattern sent to the tab search endpoint.
    pub fn search_pattern(&self) -> String {
        format!("{} {}", self.title, self.artist)
    }
}

/// A track kept by the enrichment pipeline, serialized as the original track
/// object plus `isGuitar` and `songsterrUrl`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedTrack {
    #[serde(flatten)]
    pub track: Track,
    pub is_guitar: bool,
    pub songsterr_url: String,
}

impl EnrichedTrack {
    pub fn new(track: Track, tab_url: impl Into<String>) -> Self {
        Self {
            track,
            is_guitar: true,
            songsterr_url: tab_url.into(),
        }
    }

    pub fn tab_url(&self) -> &str {
        &self.songsterr_url
    }
}

// ============================================================================
// Tab search results
// ============================================================================

/// One parsed row of a tab search response, before matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateEntry {
    pub title: String,
    pub artist: String,
    /// Link target as found in the markup; may be relative.
    pub url: Option<String>,
}

impl CandidateEntry {
    pub fn new(title: impl Into<String>, artist: impl Into<String>, url: Option<&str>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            url: url.map(str::to_string),
        }
    }
}

// ============================================================================
// Audio features & difficulty
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AudioFeatures {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub tempo: Option<f64>,
    #[serde(default)]
    pub energy: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLabel {
    Easy,
    Intermediate,
    Hard,
}

impl DifficultyLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Intermediate => "intermediate",
            Self::Hard => "hard",
        }
    }
}

impl std::fmt::Display for DifficultyLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_requires_title_and_first_artist() {
        assert_eq!(
            Track::new("Hey Jude", "The Beatles").query(),
            Some(TrackQuery::new("Hey Jude", "The Beatles"))
        );

        let mut untitled = Track::new("", "The Beatles");
        assert!(untitled.query().is_none());
        untitled.name = None;
        assert!(untitled.query().is_none());

        let mut no_artist = Track::new("Hey Jude", "The Beatles");
        no_artist.artists.clear();
        assert!(no_artist.query().is_none());

        let mut unnamed_artist = Track::new("Hey Jude", "The Beatles");
        unnamed_artist.artists[0].name = None;
        assert!(unnamed_artist.query().is_none());
    }

    #[test]
    fn search_pattern_joins_unnormalized_text() {
        let query = TrackQuery::new("Hey Jude!", "The Beatles");
        assert_eq!(query.search_pattern(), "Hey Jude! The Beatles");
    }

    #[test]
    fn enriched_track_keeps_upstream_fields() {
        let track: Track = serde_json::from_value(json!({
            "id": "4iV5W9uYEdYUVa79Axb7Rh",
            "name": "Hey Jude",
            "artists": [{ "name": "The Beatles", "id": "3WrFJ7ztbogyGnTHbHJFl2" }],
            "duration_ms": 431333,
            "popularity": 77
        }))
        .unwrap();

        let enriched = EnrichedTrack::new(track, "https://www.songsterr.com/s/1");
        let value = serde_json::to_value(&enriched).unwrap();

        assert_eq!(value["name"], "Hey Jude");
        assert_eq!(value["duration_ms"], 431333);
        assert_eq!(value["artists"][0]["id"], "3WrFJ7ztbogyGnTHbHJFl2");
        assert_eq!(value["isGuitar"], true);
        assert_eq!(value["songsterrUrl"], "https://www.songsterr.com/s/1");
    }

    #[test]
    fn difficulty_label_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(DifficultyLabel::Intermediate).unwrap(),
            json!("intermediate")
        );
        assert_eq!(DifficultyLabel::Hard.to_string(), "hard");
    }
}
