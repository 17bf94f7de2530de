// SPDX-License-Identifier: GPL-3.0-or-later
use std::sync::Arc;
use tabscout_domain::TrackQuery;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::extract::ResultExtractor;
use crate::matcher::find_match;
use crate::search::{TabSearch, TabSearchError};

/// Result of a single uncached tab lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Absolute URL of the matching tab page.
    Matched(String),
    /// The search worked but no candidate matched.
    Unmatched,
    /// The search or URL resolution failed.
    LookupFailed(String),
}

impl LookupOutcome {
    /// Collapse to the cached form. `Unmatched` and `LookupFailed` both become `None`.
    pub fn into_decision(self) -> Option<String> {
        match self {
            Self::Matched(url) => Some(url),
            Self::Unmatched | Self::LookupFailed(_) => None,
        }
    }
}

/// Search, extract and match for one query, resolving the winning link
/// against the tab site's origin.
#[derive(Clone)]
pub struct TabLookup {
    search: Arc<dyn TabSearch>,
    extractor: Arc<dyn ResultExtractor>,
    origin: Url,
}

impl TabLookup {
    pub fn new(
        search: Arc<dyn TabSearch>,
        extractor: Arc<dyn ResultExtractor>,
        origin: &str,
    ) -> Result<Self, TabSearchError> {
        let origin = Url::parse(origin)
            .map_err(|source| TabSearchError::InvalidBaseUrl(format!("{}: {}", origin, source)))?;
        Ok(Self {
            search,
            extractor,
            origin,
        })
    }

    #[instrument(skip(self), fields(title = %query.title, artist = %query.artist))]
    pub async fn lookup(&self, query: &TrackQuery) -> LookupOutcome {
        let markup = match self.search.search(&query.search_pattern()).await {
            Ok(markup) => markup,
            Err(error) => return LookupOutcome::LookupFailed(error.to_string()),
        };

        let candidates = self.extractor.extract(&markup);
        let Some(winner) = find_match(query, &candidates) else {
            return LookupOutcome::Unmatched;
        };

        let Some(href) = winner.url.as_deref() else {
            return LookupOutcome::LookupFailed(format!(
                "matched entry '{}' by '{}' has no link",
                winner.title, winner.artist
            ));
        };

        match self.origin.join(href) {
            Ok(url) => LookupOutcome::Matched(url.to_string()),
            Err(error) => LookupOutcome::LookupFailed(format!("unresolvable link '{}': {}", href, error)),
        }
    }

    /// Lookup collapsed to the cacheable decision. Never fails; failures are logged.
    pub async fn decide(&self, query: &TrackQuery) -> Option<String> {
        let outcome = self.lookup(query).await;
        match &outcome {
            LookupOutcome::Matched(url) => {
                debug!(target: "tabs", title = %query.title, artist = %query.artist, %url, "tab found");
            }
            LookupOutcome::Unmatched => {
                debug!(target: "tabs", title = %query.title, artist = %query.artist, "no matching tab");
            }
            LookupOutcome::LookupFailed(reason) => {
                warn!(target: "tabs", title = %query.title, artist = %query.artist, %reason, "tab lookup failed");
            }
        }
        outcome.into_decision()
    }
}

impl std::fmt::Debug for TabLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabLookup")
            .field("origin", &self.origin.as_str())
            .finish_non_exhaustive()
    }
}
