// SPDX-License-Identifier: GPL-3.0-or-later

use serde::Deserialize;
use tabscout_domain::Track;

/// One page of `GET /playlists/{id}/tracks`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTracksPage {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    /// Absolute URL of the following page, if any.
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub total: Option<u32>,
}

/// Playlist entry; `track` is null for removed or local-only items.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    #[serde(default)]
    pub track: Option<Track>,
}
