//! Integration tests for the extraction service and its HTTP surface

use serde_json::Value;
use site_extractor::config::Config;
use site_extractor::server;
use site_extractor::service::{ExtractRequest, Extractor, Mode};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static TEST_PROBE_PATHS: &[&str] = &["robots.txt", ".env"];

fn test_config() -> Config {
    let mut config = Config::default();
    config.crawler.max_pages = 5;
    config.crawler.deadline_ms = 5_000;
    config.deadlines.crawl_ms = 10_000;
    config.deadlines.probe_ms = 10_000;
    config.http.request_timeout_ms = 2_000;
    config.http.basic_timeout_ms = 1_000;
    config.http.headers_timeout_ms = 2_000;
    config.discovery.timeout_ms = 1_000;
    config
}

async fn mount_site(mock_server: &MockServer) {
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .insert_header("server", "nginx")
                .set_body_string(format!(
                    r#"<html><head><title>Shop</title>
                    <meta name="generator" content="WordPress 6.4">
                    </head><body>
                    <h1>Welcome</h1>
                    <form action="/search"><input name="q"></form>
                    <a href="{0}/about">About</a>
                    <a href="https://elsewhere.example/">Partner</a>
                    <img src="/logo.png" alt="Logo">
                    <script src="/wp-content/app.js"></script>
                    </body></html>"#,
                    base_url
                )),
        )
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string("<html><head><title>About</title></head><body><p>About the shop</p></body></html>"),
        )
        .mount(mock_server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\n"))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_basic_mode_reports_headers_and_endpoints() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;

    let extractor = Extractor::new(test_config()).unwrap();
    let report = extractor
        .extract(ExtractRequest::new(mock_server.uri()).with_mode(Mode::Basic))
        .await
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["mode"], "basic");
    assert_eq!(json["status_code"], 200);
    assert_eq!(json["security_headers"]["server"], "nginx");
    assert!(json["tech_stack"]
        .as_array()
        .unwrap()
        .contains(&Value::from("WordPress")));
    assert!(json["endpoints"]
        .as_array()
        .unwrap()
        .contains(&Value::from("https://elsewhere.example/")));
}

#[tokio::test]
async fn test_basic_mode_unreachable_host() {
    let extractor = Extractor::new(test_config()).unwrap();
    let report = extractor
        .extract(ExtractRequest::new("http://127.0.0.1:1/").with_mode(Mode::Basic))
        .await
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["mode"], "basic");
    assert!(json["error"].is_string());
    assert!(json.get("status_code").is_none());
}

#[tokio::test]
async fn test_advanced_mode_aggregates_site() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;
    let base_url = mock_server.uri();

    let extractor = Extractor::new(test_config())
        .unwrap()
        .with_probe_paths(TEST_PROBE_PATHS);
    let report = extractor
        .extract(ExtractRequest::new(base_url.clone()))
        .await
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["mode"], "advanced");

    let summary = &json["extraction_summary"];
    assert_eq!(summary["total_pages_extracted"], 2);
    assert_eq!(summary["total_files_found"], 1);

    let all_urls: Vec<&str> = json["website_structure"]["all_urls"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(
        all_urls,
        vec![format!("{}/", base_url), format!("{}/about", base_url)]
    );

    let technical = &json["technical_data"];
    assert_eq!(technical["headers"]["server"], "nginx");
    assert_eq!(technical["file_types_found"], serde_json::json!(["robots.txt"]));
    assert_eq!(technical["detected_files"]["robots.txt"]["status"], 200);

    let content = &json["content_analysis"];
    assert_eq!(content["total_forms"], 1);
    assert_eq!(content["total_images"], 1);
    assert_eq!(content["total_scripts"], 1);

    assert_eq!(json["llm_ready_data"]["pages_count"], 2);
    assert_eq!(json["llm_ready_data"]["forms_count"], 1);
}

#[tokio::test]
async fn test_probe_deadline_yields_empty_files() {
    let mock_server = MockServer::start().await;
    mount_site(&mock_server).await;
    let base_url = mock_server.uri();

    // One catalog path that never answers within the probe deadline
    Mock::given(method("HEAD"))
        .and(path("/.env"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let mut config = test_config();
    config.deadlines.probe_ms = 500;
    config.probe.head_timeout_ms = 10_000;
    let extractor = Extractor::new(config)
        .unwrap()
        .with_probe_paths(TEST_PROBE_PATHS);

    let report = extractor
        .extract(ExtractRequest::new(base_url))
        .await
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();

    // robots.txt exists, but the whole probe sub-task missed its deadline
    assert_eq!(json["extraction_summary"]["total_files_found"], 0);
    assert_eq!(json["technical_data"]["detected_files"], serde_json::json!({}));
    assert_eq!(json["technical_data"]["file_types_found"], serde_json::json!([]));

    // The crawl is unaffected
    assert_eq!(json["extraction_summary"]["total_pages_extracted"], 2);
    assert_eq!(json["technical_data"]["headers"]["server"], "nginx");
}

#[tokio::test]
async fn test_http_surface() {
    let extractor = Extractor::new(test_config()).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (stop, stopped) = oneshot::channel::<()>();
    let server = tokio::spawn(server::serve(listener, extractor, async move {
        let _ = stopped.await;
    }));

    let client = reqwest::Client::new();

    let health: Value = client
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["service"], "site-extractor");

    // Missing target
    let response = client
        .post(format!("http://{}/extract", addr))
        .header("content-type", "application/json")
        .body("{}")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "targetUrl is required");

    // Unknown mode
    let response = client
        .post(format!("http://{}/extract", addr))
        .body(r#"{"targetUrl": "example.com", "mode": "deep"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    // Malformed body
    let response = client
        .post(format!("http://{}/extract", addr))
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    drop(client);
    stop.send(()).unwrap();
    server.await.unwrap().unwrap();
}
