//! Path probe scanner
//!
//! Checks a catalog of well-known paths against a site origin:
//! 1. `HEAD` with the probe client (no redirects, short timeout)
//! 2. on a status below 400, `GET` with the content client for size and preview
//!
//! Each path is independent; a failure on either step drops only that
//! path. Paths are checked with a bounded number of concurrent requests.

mod catalog;

pub use catalog::DEFAULT_PROBE_PATHS;

use crate::config::ProbeConfig;
use crate::page::limits::truncate_chars;
use crate::url::origin_of;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

/// Longest UTF-8 encoding of one character
const MAX_UTF8_BYTES: usize = 4;

/// Bodies without a `Content-Length` are counted up to this many bytes
const MAX_COUNTED_BYTES: usize = 8 * 1024 * 1024;

/// A path that answered the existence check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileProbeResult {
    /// Catalog path
    pub file: String,

    /// Absolute URL probed
    pub url: String,

    /// Status of the existence check
    pub status: u16,

    /// Body size in bytes: the declared `Content-Length`, or the bytes
    /// read up to `MAX_COUNTED_BYTES`
    pub size: usize,

    pub content_preview: String,
}

/// Outcome of probing one path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Found(FileProbeResult),

    /// The existence check answered 400 or above
    Missing { status: u16 },

    /// A request failed or the path did not resolve
    Failed { error: String },
}

/// Parameters of one scan
#[derive(Debug, Clone)]
pub struct ProbeJob {
    /// Origin every path is joined against
    pub origin: Url,
    pub workers: usize,
    pub head_timeout: Duration,
    pub get_timeout: Duration,
    pub preview_chars: usize,
}

impl ProbeJob {
    pub fn from_config(target: &Url, config: &ProbeConfig) -> Self {
        Self {
            origin: origin_of(target),
            workers: config.workers,
            head_timeout: config.head_timeout(),
            get_timeout: config.get_timeout(),
            preview_chars: config.preview_chars,
        }
    }
}

/// Clients used by a scan
#[derive(Debug, Clone)]
pub struct ProbeClients {
    /// Existence checks; must not follow redirects
    pub probe: Client,

    /// Content fetches
    pub content: Client,
}

/// Probes a single path
pub async fn probe_path(clients: &ProbeClients, job: &ProbeJob, path: &str) -> ProbeOutcome {
    let url = match job.origin.join(path) {
        Ok(url) => url,
        Err(e) => {
            return ProbeOutcome::Failed {
                error: format!("Invalid path: {}", e),
            }
        }
    };

    let status = match clients
        .probe
        .head(url.as_str())
        .timeout(job.head_timeout)
        .send()
        .await
    {
        Ok(response) => response.status().as_u16(),
        Err(e) => {
            return ProbeOutcome::Failed {
                error: e.to_string(),
            }
        }
    };

    if status >= 400 {
        return ProbeOutcome::Missing { status };
    }

    match fetch_content(&clients.content, &url, job).await {
        Ok((size, content_preview)) => ProbeOutcome::Found(FileProbeResult {
            file: path.to_string(),
            url: url.to_string(),
            status,
            size,
            content_preview,
        }),
        Err(e) => ProbeOutcome::Failed {
            error: e.to_string(),
        },
    }
}

/// Streams a body for its size and preview without buffering all of it
///
/// The size is the declared `Content-Length` when present. Otherwise the
/// body is counted up to `MAX_COUNTED_BYTES`.
async fn fetch_content(
    client: &Client,
    url: &Url,
    job: &ProbeJob,
) -> Result<(usize, String), reqwest::Error> {
    let mut response = client
        .get(url.as_str())
        .timeout(job.get_timeout)
        .send()
        .await?;

    let declared = response
        .content_length()
        .and_then(|len| usize::try_from(len).ok());
    let preview_bytes = job.preview_chars.saturating_mul(MAX_UTF8_BYTES);

    let mut head: Vec<u8> = Vec::new();
    let mut read = 0usize;
    while let Some(chunk) = response.chunk().await? {
        read = read.saturating_add(chunk.len());
        let room = preview_bytes.saturating_sub(head.len());
        head.extend_from_slice(&chunk[..chunk.len().min(room)]);

        let preview_full = head.len() >= preview_bytes;
        if (preview_full && declared.is_some()) || read >= MAX_COUNTED_BYTES {
            break;
        }
    }

    let preview = truncate_chars(&String::from_utf8_lossy(&head), job.preview_chars);
    Ok((declared.unwrap_or(read), preview))
}

/// Probes every path and keeps the ones found, keyed by catalog path
///
/// # Example
///
/// ```no_run
/// use site_extractor::config::Config;
/// use site_extractor::crawler::{build_http_client, build_probe_client};
/// use site_extractor::probe::{scan_paths, ProbeClients, ProbeJob, DEFAULT_PROBE_PATHS};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let clients = ProbeClients {
///     probe: build_probe_client(&config.http)?,
///     content: build_http_client(&config.http)?,
/// };
/// let job = ProbeJob::from_config(&Url::parse("https://example.com/")?, &config.probe);
/// let found = scan_paths(&clients, &job, DEFAULT_PROBE_PATHS).await;
/// for (path, result) in &found {
///     println!("{} -> {} ({} bytes)", path, result.status, result.size);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn scan_paths(
    clients: &ProbeClients,
    job: &ProbeJob,
    paths: &[&str],
) -> BTreeMap<String, FileProbeResult> {
    tracing::info!(
        "Probing {} paths on {} with {} workers",
        paths.len(),
        job.origin,
        job.workers
    );

    let owned: Vec<String> = paths.iter().map(ToString::to_string).collect();
    let outcomes: Vec<(String, ProbeOutcome)> = stream::iter(owned)
        .map(|path| async move {
            let outcome = probe_path(clients, job, &path).await;
            (path, outcome)
        })
        .buffer_unordered(job.workers.max(1))
        .collect()
        .await;

    let mut found = BTreeMap::new();
    for (path, outcome) in outcomes {
        match outcome {
            ProbeOutcome::Found(result) => {
                tracing::debug!("Found {} (HTTP {})", result.url, result.status);
                found.insert(path, result);
            }
            ProbeOutcome::Missing { status } => {
                tracing::trace!("{} answered HTTP {}", path, status);
            }
            ProbeOutcome::Failed { error } => {
                tracing::trace!("Probe of {} failed: {}", path, error);
            }
        }
    }

    tracing::info!("Probe of {} found {} paths", job.origin, found.len());
    found
}
