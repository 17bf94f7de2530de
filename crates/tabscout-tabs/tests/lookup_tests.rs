use std::sync::Arc;

use tabscout_domain::TrackQuery;
use tabscout_tabs::{LookupOutcome, SongEntryExtractor, SongsterrClient, TabLookup, TabLookupCache};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ORIGIN: &str = "https://www.songsterr.com";

fn results_page(rows: &[(&str, &str, &str)]) -> String {
    let rows: String = rows
        .iter()
        .map(|(href, name, artist)| {
            format!(
                r#"<a href="{href}" data-song="" class="B0cew"><div data-field="name">{name}</div><div data-field="artist">{artist}</div></a>"#
            )
        })
        .collect();
    format!("<!DOCTYPE html><html><body><div id=\"search-results\">{rows}</div></body></html>")
}

fn lookup_for(server: &MockServer) -> TabLookup {
    let client = SongsterrClient::builder()
        .base_url(server.uri())
        .build()
        .unwrap();
    TabLookup::new(Arc::new(client), Arc::new(SongEntryExtractor::new()), ORIGIN).unwrap()
}

#[tokio::test]
async fn test_lookup_resolves_relative_link_against_origin() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/a/wa/search"))
        .and(query_param("pattern", "Hey Jude Beatles"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(&[
            ("/s/1", "Hey Jude", "The Beatles"),
            ("/s/2", "Let It Be", "The Beatles"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = lookup_for(&server)
        .lookup(&TrackQuery::new("Hey Jude", "Beatles"))
        .await;

    assert_eq!(outcome, LookupOutcome::Matched(format!("{ORIGIN}/s/1")));
}

#[tokio::test]
async fn test_lookup_keeps_absolute_link() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/a/wa/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(&[(
            "https://mirror.example/tabs/creep",
            "Creep",
            "Radiohead",
        )])))
        .mount(&server)
        .await;

    let outcome = lookup_for(&server)
        .lookup(&TrackQuery::new("Creep", "Radiohead"))
        .await;

    assert_eq!(
        outcome,
        LookupOutcome::Matched("https://mirror.example/tabs/creep".to_string())
    );
}

#[tokio::test]
async fn test_lookup_without_matching_candidate_is_unmatched() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/a/wa/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(&[(
            "/s/9",
            "Hurt",
            "Nine Inch Nails",
        )])))
        .mount(&server)
        .await;

    let outcome = lookup_for(&server)
        .lookup(&TrackQuery::new("Hurt", "Johnny Cash"))
        .await;

    assert_eq!(outcome, LookupOutcome::Unmatched);
}

#[tokio::test]
async fn test_lookup_http_failure_is_lookup_failed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/a/wa/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let outcome = lookup_for(&server)
        .lookup(&TrackQuery::new("Creep", "Radiohead"))
        .await;

    assert!(matches!(outcome, LookupOutcome::LookupFailed(_)));
    assert_eq!(outcome.into_decision(), None);
}

#[tokio::test]
async fn test_lookup_match_without_link_is_lookup_failed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/a/wa/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<a data-song><div data-field="name">Creep</div><div data-field="artist">Radiohead</div></a>
               <a href="/s/2" data-song><div data-field="name">Creep</div><div data-field="artist">Radiohead</div></a>"#,
        ))
        .mount(&server)
        .await;

    let outcome = lookup_for(&server)
        .lookup(&TrackQuery::new("Creep", "Radiohead"))
        .await;

    assert!(matches!(outcome, LookupOutcome::LookupFailed(_)));
}

#[tokio::test]
async fn test_cached_decisions_query_endpoint_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/a/wa/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(&[(
            "/s/1",
            "Hey Jude",
            "The Beatles",
        )])))
        .expect(1)
        .mount(&server)
        .await;

    let lookup = lookup_for(&server);
    let cache = TabLookupCache::new();

    let first_query = TrackQuery::new("Hey Jude", "The Beatles");
    let first = cache
        .get_or_compute(&first_query, lookup.decide(&first_query))
        .await;

    let second_query = TrackQuery::new("  hey   jude!", "the beatles");
    let second = cache
        .get_or_compute(&second_query, lookup.decide(&second_query))
        .await;

    assert_eq!(first.as_deref(), Some("https://www.songsterr.com/s/1"));
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_negative_decision_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/a/wa/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let lookup = lookup_for(&server);
    let cache = TabLookupCache::new();
    let query = TrackQuery::new("Obscure B-Side", "Nobody");

    for _ in 0..3 {
        let decision = cache.get_or_compute(&query, lookup.decide(&query)).await;
        assert_eq!(decision, None);
    }
}
