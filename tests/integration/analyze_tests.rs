//! End-to-end analyses against mock servers

use alyze::analysis::{AnalysisOptions, AnalysisRequest, Level, SuspicionLevel};
use alyze::config::{Config, FetchConfig};
use alyze::{AlyzeError, Analyzer, FetchError};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TITLE_45: &str = "Handmade Ceramic Mugs and Bowls from Brittany";
const DESCRIPTION_140: &str = "Discover our collection of handmade ceramic mugs, bowls and plates, \
    crafted in small batches in our Brittany workshop since nineteen ninety.";

fn html(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_string(body.into())
}

fn analyzer() -> Analyzer {
    Analyzer::new(Config::default()).expect("Failed to build analyzer")
}

#[tokio::test]
async fn test_full_analysis_of_a_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            html(
                r#"<html lang="fr"><head><title>Accueil</title>
                <script src="https://code.jquery.com/jquery-3.7.1.min.js"></script>
                </head><body><h1>Bonjour</h1>
                <p>Le site de la boulangerie et de ses pains.</p>
                <a href="/contact">Contact</a></body></html>"#,
            )
            .insert_header("server", "nginx")
            .insert_header("cache-control", "public, max-age=600"),
        )
        .mount(&mock_server)
        .await;

    let result = analyzer()
        .analyze(&AnalysisRequest::new(mock_server.uri()))
        .await
        .expect("Analysis failed");

    assert_eq!(result.url, format!("{}/", mock_server.uri()));
    assert_eq!(result.final_url, result.url);
    assert_eq!(result.status, 200);
    assert_eq!(result.title, Some("Accueil".to_string()));
    assert_eq!(result.language.detected, "fr");
    assert_eq!(result.language.requested, "auto");
    assert_eq!(result.links.internal, 1);
    assert_eq!(result.technologies, vec!["jQuery", "nginx"]);
    assert_eq!(
        result.headers.cache_control,
        Some("public, max-age=600".to_string())
    );
    assert!(result.redirect_chain.is_empty());

    let performance = result.performance.expect("performance report");
    assert!(performance.details.has_caching);
    assert!(!performance.details.has_compression);

    let security = result.security.expect("security report");
    assert_eq!(security.details.protocol, "http");
    assert!(security
        .issues
        .contains(&"Insecure site (HTTP instead of HTTPS)".to_string()));
}

#[tokio::test]
async fn test_identity_and_locale_headers_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header(
            "user-agent",
            "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)",
        ))
        .and(header("x-forwarded-for", "23.239.5.1"))
        .respond_with(html("<html><body><h1>Bot view</h1></body></html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let options: AnalysisOptions = serde_json::from_str(
        r#"{"identityProfile": "googlebot", "localeProfile": "usa-washington"}"#,
    )
    .unwrap();
    let result = analyzer()
        .analyze(&AnalysisRequest::new(mock_server.uri()).with_options(options))
        .await
        .expect("Analysis failed");

    assert_eq!(result.status, 200);
}

#[tokio::test]
async fn test_seo_complete_page_is_excellent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/mugs"))
        .respond_with(html(format!(
            r#"<html lang="en"><head>
                <title>{title}</title>
                <meta name="description" content="{description}">
                <meta property="og:title" content="Mugs">
                <meta property="og:description" content="Handmade mugs">
                <meta property="og:image" content="https://shop.example.com/og.png">
            </head><body>
                <h1>Ceramics</h1>
                <img src="a.png" alt="Blue mug">
                <img src="b.png" alt="Green bowl">
                <a href="/collections">Collections</a>
            </body></html>"#,
            title = TITLE_45,
            description = DESCRIPTION_140,
        )))
        .mount(&mock_server)
        .await;

    let result = analyzer()
        .analyze(&AnalysisRequest::new(format!("{}/mugs", mock_server.uri())))
        .await
        .expect("Analysis failed");

    assert_eq!(result.title_length, 45);
    assert_eq!(result.meta_description_length, 140);

    let seo = result.seo.expect("seo report");
    assert!(seo.score >= 90);
    assert_eq!(seo.level, Level::Excellent);
}

#[tokio::test]
async fn test_accessible_page_scores_perfectly() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<html lang="en"><body>
                <h1>Welcome</h1>
                <img src="a.png" alt="A photo">
                <a href="/about">About us</a>
                <a href="/home"><img src="logo.png" alt="Home"></a>
                <label for="email">Email</label><input id="email" type="email">
                <input type="submit" value="Send">
            </body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    let result = analyzer()
        .analyze(&AnalysisRequest::new(mock_server.uri()))
        .await
        .expect("Analysis failed");

    let accessibility = result.accessibility.expect("accessibility report");
    assert_eq!(accessibility.score, 100);
    assert_eq!(accessibility.level, Level::Excellent);
    assert!(accessibility.issues.is_empty());
}

#[tokio::test]
async fn test_minimal_page_has_no_accessibility_issues() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<html lang="en"><head><title>Hello</title></head><body><h1>Hello</h1></body></html>"#,
        ))
        .mount(&mock_server)
        .await;

    let result = analyzer()
        .analyze(&AnalysisRequest::new(mock_server.uri()))
        .await
        .expect("Analysis failed");

    let accessibility = result.accessibility.expect("accessibility report");
    assert_eq!(accessibility.score, 100);
    assert_eq!(accessibility.level, Level::Excellent);
    assert!(accessibility.issues.is_empty());
    assert_eq!(accessibility.details.images_total, 0);
}

#[tokio::test]
async fn test_script_heavy_page_is_suspicious() {
    let mock_server = MockServer::start().await;

    let mut page = String::from("<html><head>");
    for i in 0..16 {
        page.push_str(&format!(
            r#"<script src="https://tracker{}.example.net/t.js"></script>"#,
            i
        ));
    }
    page.push_str("</head><body><div>Claim now</div></body></html>");

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(page))
        .mount(&mock_server)
        .await;

    let result = analyzer()
        .analyze(&AnalysisRequest::new(mock_server.uri()))
        .await
        .expect("Analysis failed");

    // http 30 + scripts 20 + structure 15 + headers 10
    let suspicious = result.suspicious.expect("suspicious report");
    assert_eq!(suspicious.score, 75);
    assert_eq!(suspicious.level, SuspicionLevel::VerySuspicious);
    assert!(suspicious.details.is_suspicious);
    assert_eq!(suspicious.details.cross_origin_scripts, 16);
    assert_eq!(suspicious.details.domain, "127.0.0.1");
}

#[tokio::test]
async fn test_not_found_page_is_still_analyzed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("content-type", "text/html")
                .set_body_string("<html><head><title>Not Found</title></head></html>"),
        )
        .mount(&mock_server)
        .await;

    let result = analyzer()
        .analyze(&AnalysisRequest::new(format!(
            "{}/missing",
            mock_server.uri()
        )))
        .await
        .expect("Analysis failed");

    assert_eq!(result.status, 404);
    assert_eq!(result.title, Some("Not Found".to_string()));
    assert!(result.seo.is_some());
}

#[tokio::test]
async fn test_server_error_fails_the_analysis() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let analyzer = analyzer();
    let err = analyzer
        .analyze(&AnalysisRequest::new(mock_server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AlyzeError::Fetch(FetchError::ServerError { status: 503 })
    ));
    let report = err.to_report();
    assert_eq!(report.code, "SERVER_ERROR");
    assert_eq!(report.error, "Server error (HTTP 503)");
    assert_eq!(analyzer.cache_size(), 0);
}

#[tokio::test]
async fn test_redirects_are_followed_and_recorded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/older"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/older"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/new"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(html("<html><head><title>New home</title></head></html>"))
        .mount(&mock_server)
        .await;

    let result = analyzer()
        .analyze(&AnalysisRequest::new(format!("{}/old", mock_server.uri())))
        .await
        .expect("Analysis failed");

    assert_eq!(result.url, format!("{}/old", mock_server.uri()));
    assert_eq!(result.final_url, format!("{}/new", mock_server.uri()));
    assert_eq!(
        result.redirect_chain,
        vec![
            format!("{}/older", mock_server.uri()),
            format!("{}/new", mock_server.uri()),
        ]
    );
    assert_eq!(result.title, Some("New home".to_string()));
    assert_eq!(result.suspicious.expect("suspicious").details.redirect_count, 2);
}

#[tokio::test]
async fn test_redirect_not_followed_when_disabled() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(html("<html></html>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let options = AnalysisOptions {
        follow_redirects: false,
        ..AnalysisOptions::default()
    };
    let result = analyzer()
        .analyze(
            &AnalysisRequest::new(format!("{}/old", mock_server.uri())).with_options(options),
        )
        .await
        .expect("Analysis failed");

    assert_eq!(result.status, 301);
    assert_eq!(result.final_url, result.url);
    assert!(result.redirect_chain.is_empty());
}

#[tokio::test]
async fn test_redirect_loop_is_bounded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/loop"))
        .mount(&mock_server)
        .await;

    let err = analyzer()
        .analyze(&AnalysisRequest::new(format!("{}/loop", mock_server.uri())))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AlyzeError::Fetch(FetchError::TooManyRedirects { limit: 10 })
    ));
}

#[tokio::test]
async fn test_gzip_body_is_decoded_and_rewarded() {
    let mock_server = MockServer::start().await;

    let page = "<html><head><title>Compressed</title></head><body><h1>Small</h1></body></html>";
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(page.as_bytes()).unwrap();
    let compressed = encoder.finish().unwrap();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .insert_header("content-encoding", "gzip")
                .set_body_bytes(compressed),
        )
        .mount(&mock_server)
        .await;

    let result = analyzer()
        .analyze(&AnalysisRequest::new(mock_server.uri()))
        .await
        .expect("Analysis failed");

    assert_eq!(result.title, Some("Compressed".to_string()));
    assert_eq!(result.headers.content_encoding, Some("gzip".to_string()));

    let performance = result.performance.expect("performance report");
    assert!(performance.details.has_compression);
    assert!(performance
        .good_points
        .contains(&"Compressed response (gzip)".to_string()));
}

#[tokio::test]
async fn test_binary_body_is_analyzed_as_empty_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/logo.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(vec![0x89, 0x50, 0x4e, 0x47, 0x00, 0x00, 0x00, 0x0d]),
        )
        .mount(&mock_server)
        .await;

    let result = analyzer()
        .analyze(&AnalysisRequest::new(format!(
            "{}/logo.png",
            mock_server.uri()
        )))
        .await
        .expect("Analysis failed");

    assert_eq!(result.title, None);
    assert_eq!(result.word_count, 0);
    assert_eq!(result.seo.expect("seo report").score, 0);
}

#[tokio::test]
async fn test_connection_refused() {
    let err = analyzer()
        .analyze(&AnalysisRequest::new("http://127.0.0.1:1/"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AlyzeError::Fetch(FetchError::ConnectionRefused { .. })
    ));
    assert_eq!(err.code(), "ECONNREFUSED");
}

#[tokio::test]
async fn test_invalid_scheme_is_rejected() {
    let err = analyzer()
        .analyze(&AnalysisRequest::new("ftp://files.example.com/"))
        .await
        .unwrap_err();

    assert!(matches!(err, AlyzeError::InvalidUrl(_)));
    assert_eq!(err.to_report().code, "INVALID_URL");
}

#[tokio::test]
async fn test_latin1_page_is_decoded_with_its_charset() {
    let mock_server = MockServer::start().await;

    let page: &[u8] = b"<html lang=\"fr\"><head><title>Caf\xE9 de la Gare</title>\
        <meta name=\"description\" content=\"Cr\xEApes et g\xE2teaux\"></head>\
        <body><h1>\xC9t\xE9</h1></body></html>";

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(page.to_vec(), "text/html; charset=iso-8859-1"),
        )
        .mount(&mock_server)
        .await;

    let result = analyzer()
        .analyze(&AnalysisRequest::new(mock_server.uri()))
        .await
        .expect("Analysis failed");

    assert_eq!(result.title, Some("Caf\u{e9} de la Gare".to_string()));
    assert_eq!(result.title_length, 15);
    assert_eq!(
        result.meta_description,
        Some("Cr\u{ea}pes et g\u{e2}teaux".to_string())
    );
    assert_eq!(result.headings.h1, vec!["\u{c9}t\u{e9}"]);
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html("<html></html>").set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let config = Config {
        fetch: FetchConfig {
            timeout_secs: 1,
            connect_timeout_secs: 1,
            ..FetchConfig::default()
        },
        ..Config::default()
    };
    let analyzer = Analyzer::new(config).unwrap();

    let err = analyzer
        .analyze(&AnalysisRequest::new(format!("{}/slow", mock_server.uri())))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AlyzeError::Fetch(FetchError::Timeout { seconds: 1 })
    ));
    assert_eq!(err.code(), "ETIMEDOUT");
    assert_eq!(err.to_report().error, "Request timed out (1s)");
    assert_eq!(analyzer.cache_size(), 0);
}
