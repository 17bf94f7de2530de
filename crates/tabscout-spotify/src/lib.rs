// SPDX-License-Identifier: GPL-3.0-or-later

//! Spotify Web API client for playlist tracks and audio features.
//!
//! Only bearer-token reads are supported; acquiring and refreshing tokens is
//! left to the caller.

pub mod client;
pub mod error;
pub mod models;

pub use client::{SpotifyClient, SpotifyClientBuilder};
pub use error::{Result, SpotifyError};
pub use models::{PlaylistItem, PlaylistTracksPage};
