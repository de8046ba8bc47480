//! Result cache behaviour through the analyzer

use alyze::analysis::{AnalysisOptions, AnalysisRequest};
use alyze::config::{CacheConfig, Config};
use alyze::{Analyzer, ResultCache};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE: &str = "<html><head><title>Cached</title></head><body><h1>Cached</h1></body></html>";

async fn mount_page(mock_server: &MockServer, route: &str, expected_fetches: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string(PAGE),
        )
        .expect(expected_fetches)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_second_analysis_is_served_from_cache() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", 1).await;

    let analyzer = Analyzer::new(Config::default()).unwrap();
    let request = AnalysisRequest::new(mock_server.uri());

    let first = analyzer.analyze(&request).await.unwrap();
    let second = analyzer.analyze(&request).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.timestamp, second.timestamp);
    assert_eq!(analyzer.cache_size(), 1);
}

#[tokio::test]
async fn test_equivalent_targets_share_an_entry() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", 1).await;

    let analyzer = Analyzer::new(Config::default()).unwrap();

    analyzer
        .analyze(&AnalysisRequest::new(mock_server.uri()))
        .await
        .unwrap();
    analyzer
        .analyze(&AnalysisRequest::new(format!("  {}/  ", mock_server.uri())))
        .await
        .unwrap();

    assert_eq!(analyzer.cache_size(), 1);
}

#[tokio::test]
async fn test_different_options_are_cached_separately() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", 2).await;

    let analyzer = Analyzer::new(Config::default()).unwrap();
    let with_seo = AnalysisRequest::new(mock_server.uri());
    let without_seo = AnalysisRequest::new(mock_server.uri()).with_options(AnalysisOptions {
        seo_analysis: false,
        ..AnalysisOptions::default()
    });

    let first = analyzer.analyze(&with_seo).await.unwrap();
    let second = analyzer.analyze(&without_seo).await.unwrap();

    assert!(first.seo.is_some());
    assert!(second.seo.is_none());
    assert_eq!(analyzer.cache_size(), 2);

    // Both are now cached
    analyzer.analyze(&with_seo).await.unwrap();
    analyzer.analyze(&without_seo).await.unwrap();
}

#[tokio::test]
async fn test_clear_cache_forces_a_new_fetch() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", 2).await;

    let analyzer = Analyzer::new(Config::default()).unwrap();
    let request = AnalysisRequest::new(mock_server.uri());

    analyzer.analyze(&request).await.unwrap();
    analyzer.clear_cache();
    assert_eq!(analyzer.cache_size(), 0);

    analyzer.analyze(&request).await.unwrap();
    assert_eq!(analyzer.cache_size(), 1);
}

#[tokio::test]
async fn test_zero_freshness_disables_hits() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", 2).await;

    let config = Config {
        cache: CacheConfig {
            freshness_secs: 0,
            ..CacheConfig::default()
        },
        ..Config::default()
    };
    let analyzer = Analyzer::new(config).unwrap();
    let request = AnalysisRequest::new(mock_server.uri());

    analyzer.analyze(&request).await.unwrap();
    analyzer.analyze(&request).await.unwrap();

    // The stale entry was replaced, not duplicated
    assert_eq!(analyzer.cache_size(), 1);
}

#[tokio::test]
async fn test_eviction_keeps_cache_bounded() {
    let mock_server = MockServer::start().await;
    for i in 0..5 {
        mount_page(&mock_server, &format!("/page{}", i), 1).await;
    }

    let config = Config {
        cache: CacheConfig {
            max_entries: 4,
            eviction_batch: 2,
            ..CacheConfig::default()
        },
        ..Config::default()
    };
    let analyzer = Analyzer::new(config).unwrap();

    for i in 0..5 {
        analyzer
            .analyze(&AnalysisRequest::new(format!(
                "{}/page{}",
                mock_server.uri(),
                i
            )))
            .await
            .unwrap();
    }

    assert_eq!(analyzer.cache_size(), 3);
}

#[tokio::test]
async fn test_analyzers_can_share_a_cache() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", 1).await;

    let cache = Arc::new(ResultCache::new(&CacheConfig::default()));
    let first = Analyzer::with_cache(Config::default(), Arc::clone(&cache)).unwrap();
    let second = Analyzer::with_cache(Config::default(), Arc::clone(&cache)).unwrap();
    let request = AnalysisRequest::new(mock_server.uri());

    first.analyze(&request).await.unwrap();
    second.analyze(&request).await.unwrap();

    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_concurrent_analyses_of_distinct_pages() {
    let mock_server = MockServer::start().await;
    for i in 0..4 {
        mount_page(&mock_server, &format!("/p{}", i), 1).await;
    }

    let analyzer = Arc::new(Analyzer::new(Config::default()).unwrap());
    let mut handles = Vec::new();
    for i in 0..4 {
        let analyzer = Arc::clone(&analyzer);
        let url = format!("{}/p{}", mock_server.uri(), i);
        handles.push(tokio::spawn(async move {
            analyzer.analyze(&AnalysisRequest::new(url)).await
        }));
    }

    for handle in handles {
        let result = handle.await.unwrap().unwrap();
        assert_eq!(result.title, Some("Cached".to_string()));
    }
    assert_eq!(analyzer.cache_size(), 4);
}

#[tokio::test]
async fn test_language_case_does_not_split_or_leak_entries() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", 1).await;

    let analyzer = Analyzer::new(Config::default()).unwrap();
    let request = |language: &str| {
        AnalysisRequest::new(mock_server.uri()).with_options(AnalysisOptions {
            language: language.to_string(),
            ..AnalysisOptions::default()
        })
    };

    let upper = analyzer.analyze(&request("FR")).await.unwrap();
    let lower = analyzer.analyze(&request(" fr")).await.unwrap();

    assert_eq!(analyzer.cache_size(), 1);
    assert_eq!(upper, lower);
    assert_eq!(lower.analysis_options.language, "fr");
    assert_eq!(lower.language.requested, "fr");
}
