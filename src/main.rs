//! Company Brief main entry point
//!
//! This is the command-line interface for the Company Brief summarizer.

use anyhow::Context;
use clap::{Parser, Subcommand};
use company_brief::config::{resolve_config, Config};
use company_brief::crawler::{Crawler, Fetcher};
use company_brief::{OpenAiClient, SummaryGenerator};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Company Brief: summarize a company from its website
///
/// Company Brief crawls a company website, lets a language model pick the
/// pages that describe the company, and writes a markdown summary of them.
#[derive(Parser, Debug)]
#[command(name = "company-brief")]
#[command(version)]
#[command(about = "Summarize a company from its website", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (all keys have defaults)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl a website and print a markdown summary of the company
    Summarize {
        /// Company name used in the summary prompt
        company: String,

        /// Landing page URL
        url: String,

        /// Print the summary as it is generated
        #[arg(long)]
        stream: bool,

        /// Override the configured crawl depth
        #[arg(long, value_name = "N")]
        max_depth: Option<u32>,
    },

    /// Crawl a website and print the pages it visited and the links it found
    Crawl {
        /// Seed URL
        url: String,

        /// Override the configured crawl depth
        #[arg(long, value_name = "N")]
        max_depth: Option<u32>,
    },

    /// Run the HTTP API
    Serve {
        /// Override the configured bind address
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    if let Some(path) = &cli.config {
        tracing::info!("Loading configuration from: {}", path.display());
    }
    let mut config =
        resolve_config(cli.config.as_deref()).context("failed to load configuration")?;

    match cli.command {
        Command::Summarize {
            company,
            url,
            stream,
            max_depth,
        } => {
            if let Some(depth) = max_depth {
                config.crawler.max_depth = depth;
            }
            if stream {
                config.summary.output = company_brief::OutputMode::Streaming;
            }
            handle_summarize(&config, &company, &url).await
        }
        Command::Crawl { url, max_depth } => {
            if let Some(depth) = max_depth {
                config.crawler.max_depth = depth;
            }
            handle_crawl(&config, &url).await
        }
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            handle_serve(&config).await
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the summary.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("company_brief=info,warn"),
            1 => EnvFilter::new("company_brief=debug,info"),
            2 => EnvFilter::new("company_brief=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles `summarize`: runs the full pipeline and prints the summary
async fn handle_summarize(config: &Config, company: &str, url: &str) -> anyhow::Result<()> {
    let client = OpenAiClient::from_config(&config.llm)?;
    let fetcher = Fetcher::new(&config.crawler).context("failed to build HTTP client")?;
    let generator = SummaryGenerator::from_config(config, fetcher, Arc::new(client));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    generator
        .generate(company, url, config.summary.output, &mut out)
        .await?;

    Ok(())
}

/// Handles `crawl`: prints visited URLs in visit order, then discovered links
async fn handle_crawl(config: &Config, url: &str) -> anyhow::Result<()> {
    let fetcher = Fetcher::new(&config.crawler).context("failed to build HTTP client")?;
    let crawler = Crawler::from_config(fetcher, &config.crawler);

    let state = crawler.crawl(url, config.crawler.max_depth).await;

    tracing::info!(
        "Crawl finished: {} pages fetched, {} failed, {} links",
        state.pages_fetched(),
        state.failed_fetches(),
        state.links().len()
    );
    if state.page_limit_hit() {
        tracing::warn!("Page limit of {} reached", config.crawler.max_pages);
    }

    println!("# Visited ({})", state.visited_count());
    for url in state.visited() {
        println!("{}", url);
    }

    println!("\n# Links ({})", state.links().len());
    for link in state.links() {
        println!("{}", link);
    }

    Ok(())
}

/// Handles `serve`: runs the HTTP API until interrupted
async fn handle_serve(config: &Config) -> anyhow::Result<()> {
    let client = OpenAiClient::from_config(&config.llm)?;
    company_brief::server::serve(config, Arc::new(client)).await?;
    Ok(())
}
