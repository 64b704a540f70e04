mod checkpoint;
mod crawl;
mod output;

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use provdir_core::AppConfig;
use provdir_scraper::{DirectoryClient, DiscoveryOptions};
use tracing_subscriber::EnvFilter;

use crate::checkpoint::CheckpointStore;
use crate::crawl::{discover_urls, Crawl, CrawlOptions, RunError};

#[derive(Debug, Parser)]
#[command(name = "provdir")]
#[command(about = "Resumable provider directory extractor")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Discover (or resume) and extract every provider profile, then write the CSV
    Run(RunArgs),
    /// Discover profile URLs and print them, one per line
    Discover {
        /// Regions file to search (overrides PROVDIR_REGIONS_PATH)
        #[arg(long)]
        regions: Option<PathBuf>,
    },
    /// Show the progress recorded in the checkpoint file
    Status {
        /// Checkpoint file (overrides PROVDIR_CHECKPOINT_PATH)
        #[arg(long)]
        checkpoint: Option<PathBuf>,
    },
}

#[derive(Debug, Default, Args)]
struct RunArgs {
    /// Regions file to search (overrides PROVDIR_REGIONS_PATH)
    #[arg(long)]
    regions: Option<PathBuf>,

    /// Checkpoint file (overrides PROVDIR_CHECKPOINT_PATH)
    #[arg(long)]
    checkpoint: Option<PathBuf>,

    /// Output CSV; must not exist yet (overrides PROVDIR_OUTPUT_PATH)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Profiles fetched per ordered batch (overrides PROVDIR_EXTRACT_CONCURRENCY)
    #[arg(long)]
    concurrency: Option<NonZeroUsize>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code_for(&err))
        }
    }
}

async fn dispatch(cli: Cli) -> anyhow::Result<()> {
    let config = provdir_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command.unwrap_or_else(|| Commands::Run(RunArgs::default())) {
        Commands::Run(args) => run_crawl(&config, &args).await,
        Commands::Discover { regions } => {
            let client = build_client(&config)?;
            let regions_path = regions.unwrap_or_else(|| config.regions_path.clone());
            let urls = discover_urls(&client, &regions_path, &discovery_options(&config)).await?;
            for url in &urls {
                println!("{url}");
            }
            Ok(())
        }
        Commands::Status { checkpoint } => {
            let path = checkpoint.unwrap_or_else(|| config.checkpoint_path.clone());
            print_status(&CheckpointStore::new(path))
        }
    }
}

async fn run_crawl(config: &AppConfig, args: &RunArgs) -> anyhow::Result<()> {
    let started = Instant::now();
    let client = build_client(config)?;
    let options = crawl_options(config, args);

    let summary = Crawl::new(&client, &options).run().await?;

    match summary.resumed_from {
        Some(index) => tracing::info!(resumed_from = index, "resumed run finished"),
        None => tracing::info!("fresh run finished"),
    }
    println!(
        "wrote {} provider records to {} ({} extracted this run) in {:.1?}",
        summary.total_urls,
        summary.output_path.display(),
        summary.extracted,
        started.elapsed()
    );
    Ok(())
}

fn print_status(store: &CheckpointStore) -> anyhow::Result<()> {
    let Some(state) = store.load()? else {
        println!("no checkpoint at {}", store.path().display());
        return Ok(());
    };

    println!(
        "checkpoint {}: {}/{} URLs extracted",
        store.path().display(),
        state.current_index,
        state.urls.len()
    );
    if state.is_complete() {
        println!("all URLs extracted; the next run only writes the output file");
    } else if let Some(next) = state.remaining().first() {
        println!("next URL: {next}");
    }
    Ok(())
}

fn build_client(config: &AppConfig) -> Result<DirectoryClient, provdir_scraper::ScraperError> {
    DirectoryClient::new(
        config.request_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_base_secs,
    )
}

fn discovery_options(config: &AppConfig) -> DiscoveryOptions {
    DiscoveryOptions {
        base_url: config.base_url.clone(),
        specialty: config.search_specialty.clone(),
        max_pages: config.max_pages,
        inter_request_delay_ms: config.inter_request_delay_ms,
    }
}

/// Command-line flags win over the environment-derived config.
fn crawl_options(config: &AppConfig, args: &RunArgs) -> CrawlOptions {
    CrawlOptions {
        regions_path: args
            .regions
            .clone()
            .unwrap_or_else(|| config.regions_path.clone()),
        checkpoint_path: args
            .checkpoint
            .clone()
            .unwrap_or_else(|| config.checkpoint_path.clone()),
        output_path: args
            .output
            .clone()
            .unwrap_or_else(|| config.output_path.clone()),
        concurrency: args
            .concurrency
            .map_or(config.extract_concurrency, NonZeroUsize::get),
        discovery: discovery_options(config),
    }
}

fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<RunError>()
        .map_or(3, RunError::exit_code)
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
