// SPDX-License-Identifier: GPL-3.0-or-later

//! Tab-site lookup: search request, markup extraction, fuzzy title/artist
//! matching and a memoizing decision cache.

pub mod cache;
pub mod extract;
pub mod lookup;
pub mod matcher;
pub mod normalize;
pub mod search;

pub use cache::{TabLookupCache, TabLookupCacheBuilder};
pub use extract::{ResultExtractor, SongEntryExtractor};
pub use lookup::{LookupOutcome, TabLookup};
pub use matcher::find_match;
pub use normalize::{canonical_key, normalize};
pub use search::{SongsterrClient, SongsterrClientBuilder, TabSearch, TabSearchError};
