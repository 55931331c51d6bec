//! Crawler coordinator - worker pool orchestration
//!
//! This module contains the crawl loop that drives a fixed pool of workers
//! over one shared `Frontier`:
//! - spawning `min(workers, page cap)` tokio tasks
//! - fetching each dequeued URL and running the extraction pipeline
//! - feeding newly discovered links back into the frontier
//! - enforcing the overall deadline and returning partial results

use crate::config::{CrawlerConfig, HttpConfig};
use crate::crawler::fetcher::{fetch_url, FetchResult};
use crate::crawler::frontier::Frontier;
use crate::crawler::links::extract_links;
use crate::page::{extract_page, PageRecord};
use crate::url::domain_label;
use crate::{ExtractError, UrlError};
use reqwest::Client;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use url::Url;

/// Immutable description of one crawl invocation
#[derive(Debug, Clone)]
pub struct CrawlJob {
    /// Root URL; always the first candidate in the frontier
    pub root: Url,

    /// Maximum number of page records collected
    pub page_cap: usize,

    /// Configured worker count
    pub workers: usize,

    /// Timeout for every page fetch
    pub request_timeout: Duration,

    /// Overall deadline for the worker pool
    pub deadline: Duration,
}

impl CrawlJob {
    /// Builds a job for `root` from the crawler and HTTP configuration
    pub fn from_config(root: Url, crawler: &CrawlerConfig, http: &HttpConfig) -> Self {
        Self {
            root,
            page_cap: crawler.max_pages,
            workers: crawler.workers,
            request_timeout: http.request_timeout(),
            deadline: crawler.deadline(),
        }
    }

    /// Number of workers actually spawned: `min(workers, page cap)`, at least one
    pub fn worker_count(&self) -> usize {
        self.workers.min(self.page_cap).max(1)
    }
}

/// Why a single URL contributed nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The server answered with something other than `200 OK`
    HttpStatus(u16),

    /// The request ran into the per-request timeout
    Timeout,

    /// The request failed before a response arrived
    Network(String),

    /// The extraction task failed
    Extraction(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::HttpStatus(status) => write!(f, "HTTP {}", status),
            SkipReason::Timeout => write!(f, "timed out"),
            SkipReason::Network(error) => write!(f, "network error: {}", error),
            SkipReason::Extraction(error) => write!(f, "extraction failed: {}", error),
        }
    }
}

/// Outcome of processing one URL
#[derive(Debug)]
pub enum PageOutcome {
    /// The page was fetched and extracted
    Extracted {
        record: PageRecord,
        /// Same-site crawl candidates found in the raw body
        links: Vec<Url>,
    },

    /// The URL is dropped for this crawl
    Skipped { url: Url, reason: SkipReason },
}

/// Result of a crawl run
#[derive(Debug, Clone, Default)]
pub struct CrawlOutput {
    /// Page records in completion order
    pub pages: Vec<PageRecord>,

    /// Number of URLs handed out to workers
    pub visited: usize,

    /// Whether the overall deadline cut the crawl short
    pub timed_out: bool,

    /// Wall-clock time spent in the worker pool
    pub elapsed: Duration,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    client: Client,
    job: Arc<CrawlJob>,
    frontier: Arc<Frontier>,
    domain_label: Arc<str>,
}

impl Coordinator {
    /// Creates a coordinator whose frontier holds only the root URL
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to seed and run
    /// * `Err(ExtractError)` - The root URL has no host to derive a domain label from
    pub fn new(client: Client, job: CrawlJob) -> Result<Self, ExtractError> {
        let label = domain_label(&job.root).ok_or(UrlError::MissingHost)?;
        let frontier = Arc::new(Frontier::new(job.page_cap));
        frontier.seed([job.root.clone()]);

        Ok(Self {
            client,
            job: Arc::new(job),
            frontier,
            domain_label: Arc::from(label),
        })
    }

    /// Appends discovery seeds behind the root URL
    pub fn seed<I>(&self, urls: I) -> usize
    where
        I: IntoIterator<Item = Url>,
    {
        self.frontier.seed(urls)
    }

    /// Returns the shared frontier
    pub fn frontier(&self) -> &Arc<Frontier> {
        &self.frontier
    }

    /// Runs the worker pool until the frontier is drained, the page cap is
    /// reached, or the overall deadline elapses
    ///
    /// A deadline is not an error: the frontier is closed, the remaining
    /// workers are aborted, and whatever records accumulated are returned.
    pub async fn run(self) -> CrawlOutput {
        let start = Instant::now();
        let worker_count = self.job.worker_count();

        tracing::info!(
            "Crawling {} with {} workers (cap {} pages, deadline {:?})",
            self.job.root,
            worker_count,
            self.job.page_cap,
            self.job.deadline
        );

        let mut workers = JoinSet::new();
        for id in 0..worker_count {
            workers.spawn(worker(
                id,
                self.client.clone(),
                Arc::clone(&self.job),
                Arc::clone(&self.frontier),
                Arc::clone(&self.domain_label),
            ));
        }

        let drained = tokio::time::timeout(self.job.deadline, async {
            while let Some(joined) = workers.join_next().await {
                if let Err(e) = joined {
                    tracing::warn!("Crawl worker failed: {}", e);
                }
            }
        })
        .await;

        let timed_out = drained.is_err();
        if timed_out {
            tracing::warn!(
                "Crawl deadline of {:?} elapsed, returning partial results",
                self.job.deadline
            );
        }

        let visited = self.frontier.stats().visited;
        let pages = self.frontier.take_results();
        workers.abort_all();

        let elapsed = start.elapsed();
        tracing::info!(
            "Crawl of {} finished: {} pages from {} visited URLs in {:?}",
            self.job.root,
            pages.len(),
            visited,
            elapsed
        );

        CrawlOutput {
            pages,
            visited,
            timed_out,
            elapsed,
        }
    }
}

/// One crawl worker: pull, fetch, extract, record, discover, repeat
async fn worker(
    id: usize,
    client: Client,
    job: Arc<CrawlJob>,
    frontier: Arc<Frontier>,
    domain_label: Arc<str>,
) -> usize {
    let mut recorded = 0;

    while let Some(url) = frontier.next().await {
        tracing::debug!("Worker {} processing {}", id, url);

        match process_url(&client, &job, &domain_label, &url).await {
            PageOutcome::Extracted { record, links } => {
                if frontier.record(record) {
                    recorded += 1;
                }
                if !frontier.is_full() {
                    let added = frontier.discovered(links);
                    tracing::trace!("{} added {} new candidates", url, added);
                }
            }
            PageOutcome::Skipped { url, reason } => {
                tracing::debug!("Skipping {}: {}", url, reason);
            }
        }

        frontier.complete();
    }

    recorded
}

/// Fetches one URL and runs the extraction pipeline on a `200 OK` body
///
/// Extraction runs on the blocking pool so that large documents do not
/// stall the other workers' I/O.
pub async fn process_url(
    client: &Client,
    job: &CrawlJob,
    domain_label: &str,
    url: &Url,
) -> PageOutcome {
    let page = match fetch_url(client, url.as_str(), job.request_timeout).await {
        FetchResult::Fetched(page) if page.is_ok() => page,
        FetchResult::Fetched(page) => {
            return PageOutcome::Skipped {
                url: url.clone(),
                reason: SkipReason::HttpStatus(page.status_code),
            }
        }
        FetchResult::NetworkError { error, timed_out } => {
            let reason = if timed_out {
                SkipReason::Timeout
            } else {
                SkipReason::Network(error)
            };
            return PageOutcome::Skipped {
                url: url.clone(),
                reason,
            };
        }
    };

    let target = url.clone();
    let label = domain_label.to_string();
    let extracted = tokio::task::spawn_blocking(move || {
        let record = extract_page(&target, &page.body, &page.headers);
        let links = extract_links(&page.body, &page.final_url, &label);
        (record, links)
    })
    .await;

    match extracted {
        Ok((record, links)) => PageOutcome::Extracted { record, links },
        Err(e) => PageOutcome::Skipped {
            url: url.clone(),
            reason: SkipReason::Extraction(e.to_string()),
        },
    }
}

/// Runs a complete crawl of `job.root`, seeded with `seeds` behind the root
///
/// # Example
///
/// ```no_run
/// use site_extractor::config::Config;
/// use site_extractor::crawler::{build_http_client, run_crawl, CrawlJob};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let client = build_http_client(&config.http)?;
/// let root = Url::parse("https://example.com/")?;
/// let job = CrawlJob::from_config(root, &config.crawler, &config.http);
/// let output = run_crawl(client, job, Vec::new()).await?;
/// println!("{} pages", output.pages.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    client: Client,
    job: CrawlJob,
    seeds: Vec<Url>,
) -> Result<CrawlOutput, ExtractError> {
    let coordinator = Coordinator::new(client, job)?;
    let added = coordinator.seed(seeds);
    tracing::debug!("Seeded frontier with {} discovery URLs", added);
    Ok(coordinator.run().await)
}
