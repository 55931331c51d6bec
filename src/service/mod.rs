//! Extraction coordinator
//!
//! Entry point for one extraction request. Basic mode is a single fetch of
//! the target. Advanced mode runs three independent sub-tasks concurrently,
//! each under its own deadline:
//! - discovery followed by the crawl worker pool
//! - the path probe scan
//! - a header-only fetch of the target
//!
//! A sub-task that misses its deadline contributes empty results instead of
//! failing the request.

mod report;
mod request;
mod stats;

pub use report::{
    AdvancedReport, BasicFailure, BasicReport, BasicSuccess, ContentAnalysis, ExtractReport,
    ExtractionSummary, LlmReadyData, TechnicalData, WebsiteStructure,
};
pub use request::{ExtractRequest, Mode};
pub use stats::{collect_site_urls, elapsed_seconds};

use crate::config::{validate, Config};
use crate::crawler::{
    build_http_client, build_probe_client, fetch_url, run_crawl, CrawlJob, FetchResult,
};
use crate::discovery::discover_urls;
use crate::page::{anchor_hrefs, detect_technologies, PageRecord};
use crate::probe::{scan_paths, FileProbeResult, ProbeClients, ProbeJob, DEFAULT_PROBE_PATHS};
use crate::ExtractError;
use reqwest::Client;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;
use url::Url;

const BASIC_FAILURE_MESSAGE: &str = "Basic extraction failed";

/// Result of the crawl sub-task
#[derive(Debug, Default)]
struct SiteCrawl {
    pages: Vec<PageRecord>,
    sitemap_urls: Vec<String>,
}

/// Runs extraction requests against a shared configuration and client pool
#[derive(Debug, Clone)]
pub struct Extractor {
    config: Arc<Config>,
    client: Client,
    clients: ProbeClients,
    probe_paths: &'static [&'static str],
}

impl Extractor {
    /// Validates `config` and builds the HTTP clients from `config.http`
    pub fn new(config: Config) -> Result<Self, ExtractError> {
        validate(&config)?;
        let client = build_http_client(&config.http)?;
        let clients = ProbeClients {
            probe: build_probe_client(&config.http)?,
            content: client.clone(),
        };

        Ok(Self {
            config: Arc::new(config),
            client,
            clients,
            probe_paths: DEFAULT_PROBE_PATHS,
        })
    }

    /// Replaces the probe catalog
    pub fn with_probe_paths(mut self, paths: &'static [&'static str]) -> Self {
        self.probe_paths = paths;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validates a request and runs the requested mode
    ///
    /// Only malformed requests are errors; fetch failures are reported
    /// inside the returned report.
    pub async fn extract(&self, request: ExtractRequest) -> Result<ExtractReport, ExtractError> {
        let (target, mode) = request.resolve()?;
        tracing::info!("Extracting {} in {} mode", target, mode);

        Ok(match mode {
            Mode::Basic => ExtractReport::Basic(self.basic(&target).await),
            Mode::Advanced => ExtractReport::Advanced(Box::new(self.advanced(&target).await)),
        })
    }

    /// Single fetch of the target: headers, technology hints and anchors
    pub async fn basic(&self, target: &Url) -> BasicReport {
        let start = Instant::now();

        match fetch_url(&self.client, target.as_str(), self.config.http.basic_timeout()).await {
            FetchResult::Fetched(page) => BasicReport::Success(BasicSuccess {
                mode: Mode::Basic,
                target_url: target.to_string(),
                status_code: page.status_code,
                tech_stack: detect_technologies(&page.body, &page.headers),
                endpoints: anchor_hrefs(&page.body, self.config.response.max_endpoints),
                security_headers: page.headers,
                extraction_time: elapsed_seconds(start.elapsed()),
            }),
            FetchResult::NetworkError { error, .. } => {
                tracing::warn!("Basic extraction of {} failed: {}", target, error);
                BasicReport::Failure(BasicFailure {
                    mode: Mode::Basic,
                    target_url: target.to_string(),
                    error,
                    message: BASIC_FAILURE_MESSAGE.to_string(),
                    extraction_time: elapsed_seconds(start.elapsed()),
                })
            }
        }
    }

    /// Crawl, probe scan and header fetch, aggregated into one report
    pub async fn advanced(&self, target: &Url) -> AdvancedReport {
        let start = Instant::now();
        let deadlines = &self.config.deadlines;

        let (crawl, detected_files, headers) = tokio::join!(
            timeout(deadlines.crawl(), self.crawl_site(target)),
            timeout(deadlines.probe(), self.probe_site(target)),
            self.root_headers(target),
        );

        let crawl = crawl.unwrap_or_else(|_| {
            tracing::warn!(
                "Crawl of {} exceeded {:?}, reporting no pages",
                target,
                deadlines.crawl()
            );
            SiteCrawl::default()
        });
        let detected_files = detected_files.unwrap_or_else(|_| {
            tracing::warn!(
                "Probe of {} exceeded {:?}, reporting no files",
                target,
                deadlines.probe()
            );
            BTreeMap::new()
        });

        self.assemble(target, crawl, detected_files, headers, start)
    }

    fn assemble(
        &self,
        target: &Url,
        crawl: SiteCrawl,
        detected_files: BTreeMap<String, FileProbeResult>,
        headers: BTreeMap<String, String>,
        start: Instant,
    ) -> AdvancedReport {
        let limits = &self.config.response;
        let SiteCrawl {
            pages,
            sitemap_urls,
        } = crawl;

        let site_urls = collect_site_urls(&pages);
        let content_analysis = ContentAnalysis::from_pages(&pages);
        let technologies = pages
            .first()
            .map(|page| page.technology_hints.clone())
            .unwrap_or_default();
        let total_pages = pages.len();
        let total_urls = site_urls.len();
        let forms_count = content_analysis.total_forms;

        AdvancedReport {
            mode: Mode::Advanced,
            extraction_summary: ExtractionSummary {
                target_url: target.to_string(),
                total_pages_extracted: total_pages,
                total_urls_found: total_urls,
                total_files_found: detected_files.len(),
                extraction_time: elapsed_seconds(start.elapsed()),
            },
            website_structure: WebsiteStructure {
                pages: pages.into_iter().take(limits.max_pages).collect(),
                all_urls: site_urls.into_iter().take(limits.max_urls).collect(),
                sitemap_urls: sitemap_urls
                    .into_iter()
                    .take(limits.max_sitemap_urls)
                    .collect(),
            },
            technical_data: TechnicalData {
                headers,
                file_types_found: detected_files.keys().cloned().collect(),
                detected_files,
                technology_hints: technologies.clone(),
            },
            content_analysis,
            llm_ready_data: LlmReadyData {
                pages_count: total_pages,
                forms_count,
                endpoints_found: total_urls,
                technologies,
            },
        }
    }

    /// Discovery, then the crawl seeded with the discovered URLs
    async fn crawl_site(&self, target: &Url) -> SiteCrawl {
        let discovered = discover_urls(&self.client, target, self.config.discovery.timeout()).await;
        let sitemap_urls = discovered.iter().map(Url::to_string).collect();

        let job = CrawlJob::from_config(target.clone(), &self.config.crawler, &self.config.http);
        let pages = match run_crawl(self.client.clone(), job, discovered).await {
            Ok(output) => {
                tracing::info!(
                    "Crawl of {} kept {} of {} visited URLs in {:.2}s{}",
                    target,
                    output.pages.len(),
                    output.visited,
                    output.elapsed.as_secs_f64(),
                    if output.timed_out { " (deadline reached)" } else { "" }
                );
                output.pages
            }
            Err(e) => {
                tracing::warn!("Crawl of {} could not start: {}", target, e);
                Vec::new()
            }
        };

        SiteCrawl {
            pages,
            sitemap_urls,
        }
    }

    async fn probe_site(&self, target: &Url) -> BTreeMap<String, FileProbeResult> {
        let job = ProbeJob::from_config(target, &self.config.probe);
        scan_paths(&self.clients, &job, self.probe_paths).await
    }

    /// Response headers of the target, or nothing if the fetch fails
    async fn root_headers(&self, target: &Url) -> BTreeMap<String, String> {
        match fetch_url(&self.client, target.as_str(), self.config.http.headers_timeout()).await {
            FetchResult::Fetched(page) => page.headers,
            FetchResult::NetworkError { error, .. } => {
                tracing::debug!("Header fetch of {} failed: {}", target, error);
                BTreeMap::new()
            }
        }
    }
}
