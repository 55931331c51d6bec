//! Integration tests for discovery and the crawl worker pool

use site_extractor::config::Config;
use site_extractor::crawler::{
    build_http_client, process_url, run_crawl, CrawlJob, PageOutcome, SkipReason,
};
use site_extractor::url::domain_label;
use site_extractor::discovery::discover_urls;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

fn test_job(root: &Url, page_cap: usize) -> CrawlJob {
    let mut config = Config::default();
    config.crawler.max_pages = page_cap;
    config.crawler.workers = 4;
    config.crawler.deadline_ms = 10_000;
    config.http.request_timeout_ms = 2_000;
    CrawlJob::from_config(root.clone(), &config.crawler, &config.http)
}

#[tokio::test]
async fn test_crawl_single_page_site() {
    // Start a mock server
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Root page with one internal and one external link; nothing else exists
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(format!(
            r#"<html><head><title>Home</title></head><body>
            <a href="{}/missing">Missing</a>
            <a href="https://external.example/page">Elsewhere</a>
            </body></html>"#,
            base_url
        )))
        .mount(&mock_server)
        .await;

    let client = build_http_client(&Config::default().http).unwrap();
    let root = Url::parse(&format!("{}/", base_url)).unwrap();

    let output = run_crawl(client, test_job(&root, 5), Vec::new())
        .await
        .expect("Crawl should start");

    assert!(!output.timed_out);
    assert_eq!(output.pages.len(), 1, "Only the root page answers 200");

    let page = &output.pages[0];
    assert_eq!(page.url, root.as_str());
    assert_eq!(page.title, "Home");
    assert_eq!(page.status_code, 200);
    assert_eq!(page.links.total, 2);
    assert_eq!(page.links.internal.len(), 1);
    assert_eq!(page.links.external.len(), 1);
    assert_eq!(
        page.links.internal[0].full_url.as_deref(),
        Some(format!("{}/missing", base_url).as_str())
    );
}

#[tokio::test]
async fn test_crawl_follows_internal_links() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(format!(
            r#"<html><body><a href="{}/about">About</a></body></html>"#,
            base_url
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html(
            "<html><head><title>About</title></head><body><p>About us</p></body></html>"
                .to_string(),
        ))
        .mount(&mock_server)
        .await;

    let client = build_http_client(&Config::default().http).unwrap();
    let root = Url::parse(&format!("{}/", base_url)).unwrap();

    let output = run_crawl(client, test_job(&root, 5), Vec::new())
        .await
        .unwrap();

    let mut urls: Vec<&str> = output.pages.iter().map(|p| p.url.as_str()).collect();
    urls.sort();
    assert_eq!(
        urls,
        vec![format!("{}/", base_url), format!("{}/about", base_url)]
    );
}

#[tokio::test]
async fn test_crawl_deadline_returns_partial_results() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(format!(
            r#"<html><body><a href="{}/slow">Slow</a></body></html>"#,
            base_url
        )))
        .mount(&mock_server)
        .await;

    // Outlives the crawl deadline
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            html("<html><body>late</body></html>".to_string()).set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let client = build_http_client(&Config::default().http).unwrap();
    let root = Url::parse(&format!("{}/", base_url)).unwrap();
    let mut job = test_job(&root, 5);
    job.request_timeout = Duration::from_secs(10);
    job.deadline = Duration::from_secs(1);

    let output = run_crawl(client, job, Vec::new())
        .await
        .expect("A deadline is not an error");

    assert!(output.timed_out);
    assert_eq!(output.pages.len(), 1);
    assert_eq!(output.pages[0].url, root.as_str());
    assert_eq!(output.visited, 2);
    assert!(output.elapsed < Duration::from_secs(5));
}

#[tokio::test]
async fn test_request_timeout_is_reported_as_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            html("<html></html>".to_string()).set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let client = build_http_client(&Config::default().http).unwrap();
    let root = Url::parse(&format!("{}/", mock_server.uri())).unwrap();
    let mut job = test_job(&root, 5);
    job.request_timeout = Duration::from_millis(300);
    let label = domain_label(&root).unwrap();

    let slow = root.join("slow").unwrap();
    match process_url(&client, &job, &label, &slow).await {
        PageOutcome::Skipped { url, reason } => {
            assert_eq!(url, slow);
            assert_eq!(reason, SkipReason::Timeout);
        }
        PageOutcome::Extracted { .. } => panic!("A timed out fetch must be skipped"),
    }

    // Unmatched paths answer 404
    let missing = root.join("missing").unwrap();
    match process_url(&client, &job, &label, &missing).await {
        PageOutcome::Skipped { reason, .. } => assert_eq!(reason, SkipReason::HttpStatus(404)),
        PageOutcome::Extracted { .. } => panic!("A 404 must be skipped"),
    }
}

#[tokio::test]
async fn test_sitemap_seeds_respect_page_cap() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
            <urlset>
              <url><loc>{0}/one</loc></url>
              <url><loc>{0}/two</loc></url>
              <url><loc>{0}/three</loc></url>
            </urlset>"#,
            base_url
        )))
        .mount(&mock_server)
        .await;

    // Every page answers with a small document
    Mock::given(method("GET"))
        .respond_with(html(
            "<html><body><p>Hello</p></body></html>".to_string(),
        ))
        .mount(&mock_server)
        .await;

    let client = build_http_client(&Config::default().http).unwrap();
    let root = Url::parse(&format!("{}/", base_url)).unwrap();

    let discovered = discover_urls(&client, &root, Duration::from_secs(2)).await;
    assert_eq!(discovered.len(), 3);

    let output = run_crawl(client, test_job(&root, 2), discovered)
        .await
        .unwrap();

    assert!(!output.pages.is_empty());
    assert!(output.pages.len() <= 2, "Page cap must bound the records");
}

#[tokio::test]
async fn test_discovery_reads_robots_sitemaps() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "User-agent: *\nDisallow:\nSitemap: {}/pages.xml\n",
            base_url
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/pages.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "<urlset><url><loc>{}/from-robots</loc></url></urlset>",
            base_url
        )))
        .mount(&mock_server)
        .await;

    let client = build_http_client(&Config::default().http).unwrap();
    let root = Url::parse(&format!("{}/", base_url)).unwrap();

    let discovered = discover_urls(&client, &root, Duration::from_secs(2)).await;
    let discovered: Vec<String> = discovered.iter().map(Url::to_string).collect();
    assert_eq!(discovered, vec![format!("{}/from-robots", base_url)]);
}
