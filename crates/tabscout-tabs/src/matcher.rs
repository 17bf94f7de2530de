// SPDX-License-Identifier: GPL-3.0-or-later
use tabscout_domain::{CandidateEntry, TrackQuery};

use crate::normalize::normalize;

/// Return the first candidate, in response order, whose normalized title and
/// artist each contain, or are contained in, the query's normalized title and
/// artist. Later candidates are never considered once one matches.
pub fn find_match<'a>(
    query: &TrackQuery,
    candidates: &'a [CandidateEntry],
) -> Option<&'a CandidateEntry> {
    let title = normalize(&query.title);
    let artist = normalize(&query.artist);

    candidates.iter().find(|candidate| {
        contains_either_way(&normalize(&candidate.title), &title)
            && contains_either_way(&normalize(&candidate.artist), &artist)
    })
}

fn contains_either_way(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beatles_candidates() -> Vec<CandidateEntry> {
        vec![
            CandidateEntry::new("Hey Jude", "The Beatles", Some("/s/1")),
            CandidateEntry::new("Let It Be", "The Beatles", Some("/s/2")),
        ]
    }

    #[test]
    fn partial_artist_matches_first_entry() {
        let candidates = beatles_candidates();
        let winner = find_match(&TrackQuery::new("Hey Jude", "Beatles"), &candidates);
        assert_eq!(winner.and_then(|c| c.url.as_deref()), Some("/s/1"));
    }

    #[test]
    fn query_containing_candidate_title_matches() {
        let candidates = vec![CandidateEntry::new("Creep", "Radiohead", Some("/s/7"))];
        let winner = find_match(
            &TrackQuery::new("Creep - Remastered 2008", "Radiohead"),
            &candidates,
        );
        assert!(winner.is_some());
    }

    #[test]
    fn first_satisfying_candidate_wins_over_closer_one() {
        let candidates = vec![
            CandidateEntry::new("One (Live)", "Metallica", Some("/s/live")),
            CandidateEntry::new("One", "Metallica", Some("/s/studio")),
        ];
        let winner = find_match(&TrackQuery::new("One", "Metallica"), &candidates);
        assert_eq!(winner.and_then(|c| c.url.as_deref()), Some("/s/live"));
    }

    #[test]
    fn title_match_alone_is_not_enough() {
        let candidates = vec![CandidateEntry::new("Hurt", "Nine Inch Nails", Some("/s/3"))];
        assert!(find_match(&TrackQuery::new("Hurt", "Johnny Cash"), &candidates).is_none());
    }

    #[test]
    fn punctuation_and_case_are_ignored() {
        let candidates = vec![CandidateEntry::new("Don't Stop Me Now", "QUEEN", Some("/s/4"))];
        assert!(find_match(&TrackQuery::new("dont stop me now", "Queen"), &candidates).is_some());
    }

    #[test]
    fn word_order_is_not_normalized() {
        let candidates = vec![CandidateEntry::new("Jude Hey", "The Beatles", Some("/s/5"))];
        assert!(find_match(&TrackQuery::new("Hey Jude", "The Beatles"), &candidates).is_none());
    }

    #[test]
    fn no_candidates_means_no_match() {
        assert!(find_match(&TrackQuery::new("Hey Jude", "The Beatles"), &[]).is_none());
    }
}
