//! Site Extractor main entry point
//!
//! Serves the extraction API over HTTP, or runs a single extraction from the
//! command line and prints the report as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use site_extractor::config::{load_config_with_hash, validate, Config};
use site_extractor::service::{ExtractRequest, Extractor, Mode};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Site Extractor: a bounded website crawler and exposure scanner
///
/// Crawls a target site into structured page records (links, forms, media,
/// metadata, structured data, technology hints) and probes a catalog of
/// well-known paths for exposed files.
#[derive(Parser, Debug)]
#[command(name = "site-extractor")]
#[command(version)]
#[command(about = "A bounded website crawler and exposure scanner", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on, overriding the configuration
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Run a single extraction of URL, print the report and exit
    #[arg(long, value_name = "URL", conflicts_with = "dry_run")]
    once: Option<String>,

    /// Extraction mode for --once
    #[arg(long, value_name = "MODE", default_value = "advanced", requires = "once")]
    mode: String,

    /// Validate the configuration, print it and exit
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = load(&cli)?;
    if let Some(bind) = &cli.bind {
        config.server.bind = bind.clone();
        validate(&config).context("Invalid --bind address")?;
    }

    if cli.dry_run {
        handle_dry_run(&config)
    } else if let Some(target) = &cli.once {
        handle_once(config, target, &cli.mode).await
    } else {
        handle_serve(config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_extractor=info,warn"),
            1 => EnvFilter::new("site_extractor=debug,tower_http=debug,info"),
            2 => EnvFilter::new("site_extractor=trace,tower_http=debug,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the configuration file, or the defaults when none is given
fn load(cli: &Cli) -> Result<Config> {
    let Some(path) = &cli.config else {
        tracing::info!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);
    Ok(config)
}

/// Handles --dry-run: prints the effective configuration
fn handle_dry_run(config: &Config) -> Result<()> {
    println!("=== Site Extractor Dry Run ===\n");
    println!(
        "{}",
        toml::to_string_pretty(config).context("Failed to render configuration")?
    );
    println!("Configuration is valid.");
    Ok(())
}

/// Handles --once: runs one extraction and prints the report
async fn handle_once(config: Config, target: &str, mode: &str) -> Result<()> {
    let mode: Mode = mode.parse()?;
    let extractor = Extractor::new(config).context("Failed to build HTTP clients")?;

    let report = extractor
        .extract(ExtractRequest::new(target).with_mode(mode))
        .await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Serves the HTTP API until Ctrl-C
async fn handle_serve(config: Config) -> Result<()> {
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;

    let extractor = Extractor::new(config).context("Failed to build HTTP clients")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Health check: http://{}/health", addr);
    site_extractor::server::serve(listener, extractor, shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
