// SPDX-License-Identifier: GPL-3.0-or-later
//! Turns search response markup into candidate entries.
//!
//! The markup shape belongs to the tab site and can change without notice. A
//! change that the extractor no longer recognizes yields zero candidates rather
//! than an error, so a scan degrades to "no tabs found".

use scraper::{ElementRef, Html, Selector};
use tabscout_domain::CandidateEntry;
use tracing::{debug, warn};

pub trait ResultExtractor: Send + Sync {
    /// Candidates in document order. Rows missing a name or artist are skipped.
    fn extract(&self, markup: &str) -> Vec<CandidateEntry>;
}

/// Extracts `<a data-song href=...>` rows holding `data-field="name"` and
/// `data-field="artist"` children.
#[derive(Debug, Clone)]
pub struct SongEntryExtractor {
    row: String,
    name: String,
    artist: String,
}

impl SongEntryExtractor {
    pub fn new() -> Self {
        Self::with_layout("a[data-song]", r#"[data-field="name"]"#, r#"[data-field="artist"]"#)
    }

    /// Extractor for a different row/field layout, given as CSS selectors.
    pub fn with_layout(
        row: impl Into<String>,
        name: impl Into<String>,
        artist: impl Into<String>,
    ) -> Self {
        Self {
            row: row.into(),
            name: name.into(),
            artist: artist.into(),
        }
    }

    fn field_text(row: &ElementRef<'_>, selector: &Selector) -> Option<String> {
        let text = row.select(selector).next()?.text().collect::<String>();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

impl Default for SongEntryExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultExtractor for SongEntryExtractor {
    fn extract(&self, markup: &str) -> Vec<CandidateEntry> {
        let (row_sel, name_sel, artist_sel) = match (
            Selector::parse(&self.row),
            Selector::parse(&self.name),
            Selector::parse(&self.artist),
        ) {
            (Ok(row), Ok(name), Ok(artist)) => (row, name, artist),
            _ => {
                warn!(target: "tabs", row = %self.row, name = %self.name, artist = %self.artist, "invalid extractor selectors");
                return Vec::new();
            }
        };

        let document = Html::parse_document(markup);
        let mut entries = Vec::new();
        let mut dropped = 0usize;

        for row in document.select(&row_sel) {
            let name = Self::field_text(&row, &name_sel);
            let artist = Self::field_text(&row, &artist_sel);

            match (name, artist) {
                (Some(title), Some(artist)) => entries.push(CandidateEntry {
                    title,
                    artist,
                    url: row.value().attr("href").map(str::to_string),
                }),
                _ => dropped += 1,
            }
        }

        if entries.is_empty() && dropped > 0 {
            warn!(target: "tabs", dropped, "song rows found but none carried a name and artist");
        }
        debug!(target: "tabs", candidates = entries.len(), dropped, "extracted search candidates");
        entries
    }
}
