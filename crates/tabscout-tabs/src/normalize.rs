// SPDX-License-Identifier: GPL-3.0-or-later
//! Text canonicalization shared by matching and cache keying.

use tabscout_domain::TrackQuery;

/// Lowercase, trim, then drop every character that is neither an ASCII word
/// character nor whitespace.
///
/// Trimming happens before stripping, so `"Jude !"` becomes `"jude "`.
/// No locale-aware folding is done: `"Beyoncé"` becomes `"beyonc"`.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect()
}

/// Cache identity for a query: `"<title>::<artist>"` over normalized text with
/// whitespace runs collapsed to single spaces.
pub fn canonical_key(query: &TrackQuery) -> String {
    format!(
        "{}::{}",
        collapse_whitespace(&normalize(&query.title)),
        collapse_whitespace(&normalize(&query.artist))
    )
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
