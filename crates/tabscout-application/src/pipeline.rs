// SPDX-License-Identifier: GPL-3.0-or-later

//! Playlist enrichment: keep the tracks that have a tab page and attach its URL.
//!
//! Lookups run on a bounded set of tasks. Permits are taken in input order
//! before a task is spawned, so with a single permit tracks are searched
//! strictly one after another. Each task is tagged with the track's input
//! position and results are re-sorted before filtering, so the output order
//! always follows the input order.

use std::sync::Arc;
use tabscout_domain::{EnrichedTrack, Track};
use tabscout_tabs::{TabLookup, TabLookupCache};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

pub struct PlaylistEnrichmentPipeline {
    lookup: Arc<TabLookup>,
    cache: TabLookupCache,
    max_concurrent_lookups: usize,
}

impl PlaylistEnrichmentPipeline {
    /// Sequential pipeline: one outstanding tab search at a time.
    pub fn new(lookup: TabLookup, cache: TabLookupCache) -> Self {
        Self {
            lookup: Arc::new(lookup),
            cache,
            max_concurrent_lookups: 1,
        }
    }

    pub fn with_max_concurrent_lookups(mut self, max_concurrent_lookups: usize) -> Self {
        self.max_concurrent_lookups = max_concurrent_lookups.clamp(1, Semaphore::MAX_PERMITS);
        self
    }

    pub fn cache(&self) -> &TabLookupCache {
        &self.cache
    }

    /// Return the tracks with a tab page, in input order, each annotated with
    /// its tab URL. Tracks without a title or first artist are skipped, and
    /// lookup failures count as "no tab" instead of failing the scan.
    pub async fn enrich(&self, tracks: Vec<Track>) -> Vec<EnrichedTrack> {
        let total = tracks.len();
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_lookups));
        let mut tasks = JoinSet::new();
        let mut skipped = 0usize;

        for (index, track) in tracks.into_iter().enumerate() {
            let Some(query) = track.query() else {
                debug!(target: "pipeline", index, id = ?track.id, "skipping track without title or artist");
                skipped += 1;
                continue;
            };

            let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
                warn!(target: "pipeline", index, "lookup semaphore closed");
                continue;
            };
            let lookup = Arc::clone(&self.lookup);
            let cache = self.cache.clone();

            tasks.spawn(async move {
                let decision = cache.get_or_compute(&query, lookup.decide(&query)).await;
                drop(permit);
                (index, track, decision)
            });
        }

        let mut decided = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(result) => decided.push(result),
                Err(error) => {
                    warn!(target: "pipeline", error = %error, "tab lookup task aborted");
                }
            }
        }
        decided.sort_by_key(|(index, _, _)| *index);

        let enriched: Vec<EnrichedTrack> = decided
            .into_iter()
            .filter_map(|(_, track, decision)| decision.map(|url| EnrichedTrack::new(track, url)))
            .collect();

        info!(
            target: "pipeline",
            total,
            skipped,
            with_tabs = enriched.len(),
            "playlist scan complete"
        );

        enriched
    }
}

impl std::fmt::Debug for PlaylistEnrichmentPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaylistEnrichmentPipeline")
            .field("lookup", &self.lookup)
            .field("max_concurrent_lookups", &self.max_concurrent_lookups)
            .finish_non_exhaustive()
    }
}
