//! Integration tests for the well-known path probe

use site_extractor::config::Config;
use site_extractor::crawler::{build_http_client, build_probe_client};
use site_extractor::probe::{scan_paths, ProbeClients, ProbeJob};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn clients(config: &Config) -> ProbeClients {
    ProbeClients {
        probe: build_probe_client(&config.http).unwrap(),
        content: build_http_client(&config.http).unwrap(),
    }
}

#[tokio::test]
async fn test_scan_keeps_only_existing_paths() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /admin\n"))
        .mount(&mock_server)
        .await;

    // Unmatched requests answer 404, so `.env` must be reported missing
    let config = Config::default();
    let root = Url::parse(&format!("{}/some/page", mock_server.uri())).unwrap();
    let job = ProbeJob::from_config(&root, &config.probe);

    let found = scan_paths(&clients(&config), &job, &["robots.txt", ".env"]).await;

    assert_eq!(found.len(), 1);
    let robots = &found["robots.txt"];
    assert_eq!(robots.file, "robots.txt");
    assert_eq!(robots.url, format!("{}/robots.txt", mock_server.uri()));
    assert_eq!(robots.status, 200);
    assert_eq!(robots.size, "User-agent: *\nDisallow: /admin\n".len());
    assert!(robots.content_preview.starts_with("User-agent"));
}

#[tokio::test]
async fn test_scan_truncates_preview() {
    let mock_server = MockServer::start().await;
    let body = "x".repeat(1_000);

    Mock::given(method("HEAD"))
        .and(path("/package.json"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/package.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.clone()))
        .mount(&mock_server)
        .await;

    let mut config = Config::default();
    config.probe.preview_chars = 10;
    let root = Url::parse(&mock_server.uri()).unwrap();
    let job = ProbeJob::from_config(&root, &config.probe);

    let found = scan_paths(&clients(&config), &job, &["package.json"]).await;

    let result = &found["package.json"];
    assert_eq!(result.size, 1_000);
    assert_eq!(result.content_preview, "x".repeat(10));
}

#[tokio::test]
async fn test_large_body_reports_declared_size() {
    let mock_server = MockServer::start().await;
    let body = "a".repeat(2 * 1024 * 1024);

    Mock::given(method("HEAD"))
        .and(path("/backup.tar.gz"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/backup.tar.gz"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&mock_server)
        .await;

    let mut config = Config::default();
    config.probe.preview_chars = 16;
    let root = Url::parse(&mock_server.uri()).unwrap();
    let job = ProbeJob::from_config(&root, &config.probe);

    let found = scan_paths(&clients(&config), &job, &["backup.tar.gz"]).await;

    let result = &found["backup.tar.gz"];
    assert_eq!(result.size, 2 * 1024 * 1024);
    assert_eq!(result.content_preview, "a".repeat(16));
}

#[tokio::test]
async fn test_scan_does_not_follow_redirects() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/admin"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/login"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/admin"))
        .respond_with(ResponseTemplate::new(200).set_body_string("login form"))
        .mount(&mock_server)
        .await;

    let config = Config::default();
    let root = Url::parse(&mock_server.uri()).unwrap();
    let job = ProbeJob::from_config(&root, &config.probe);

    let found = scan_paths(&clients(&config), &job, &["admin"]).await;

    // A redirect is below 400 and counts as present, reported with its own status
    assert_eq!(found["admin"].status, 302);
}
