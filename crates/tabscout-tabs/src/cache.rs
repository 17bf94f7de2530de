// SPDX-License-Identifier: GPL-3.0-or-later
use moka::future::Cache;
use std::future::Future;
use std::time::Duration;
use tabscout_domain::TrackQuery;
use tracing::debug;

use crate::normalize::canonical_key;

/// Memoizes tab decisions per canonical (title, artist) key.
///
/// Both outcomes are cached: `Some(url)` for a match and `None` for "no tab".
/// Concurrent lookups of the same key share a single computation. By default the
/// cache is unbounded and entries never expire; [`TabLookupCache::builder`]
/// allows a bounded or expiring variant.
#[derive(Clone)]
pub struct TabLookupCache {
    inner: Cache<String, Option<String>>,
}

impl TabLookupCache {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> TabLookupCacheBuilder {
        TabLookupCacheBuilder::default()
    }

    /// Return the stored decision for `query`, or run `compute` once, store its
    /// result (including `None`) and return it.
    pub async fn get_or_compute<F>(&self, query: &TrackQuery, compute: F) -> Option<String>
    where
        F: Future<Output = Option<String>>,
    {
        let key = canonical_key(query);
        if let Some(decision) = self.inner.get(&key) {
            debug!(target: "tab-cache", %key, hit = true, "tab decision cached");
            return decision;
        }

        debug!(target: "tab-cache", %key, hit = false, "computing tab decision");
        self.inner.get_with(key, compute).await
    }

    pub fn contains(&self, query: &TrackQuery) -> bool {
        self.inner.contains_key(&canonical_key(query))
    }
}

impl Default for TabLookupCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TabLookupCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabLookupCache").finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct TabLookupCacheBuilder {
    max_capacity: Option<u64>,
    time_to_live: Option<Duration>,
}

impl TabLookupCacheBuilder {
    pub fn max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = Some(max_capacity);
        self
    }

    pub fn time_to_live(mut self, ttl: Duration) -> Self {
        self.time_to_live = Some(ttl);
        self
    }

    pub fn build(self) -> TabLookupCache {
        let mut builder = Cache::builder();
        if let Some(max_capacity) = self.max_capacity {
            builder = builder.max_capacity(max_capacity);
        }
        if let Some(ttl) = self.time_to_live {
            builder = builder.time_to_live(ttl);
        }
        TabLookupCache {
            inner: builder.build(),
        }
    }
}
