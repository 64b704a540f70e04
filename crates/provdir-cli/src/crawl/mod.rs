//! The resumable extraction run.
//!
//! A run either resumes from a checkpoint or discovers a fresh URL list,
//! then extracts every remaining profile in URL order. Each extracted record
//! is staged on disk before the frontier moves past it, so the checkpoint
//! written on failure is always safe to resume from.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures::stream::{self, StreamExt};
use provdir_core::{load_regions, targets_from_regions, ConfigError, CrawlState, ProviderRecord};
use provdir_scraper::{discover_profile_urls, extract_record, DiscoveryOptions, PageFetcher, ScraperError};
use thiserror::Error;

use crate::checkpoint::{CheckpointError, CheckpointStore};
use crate::output::{staging_path_for, write_output, OutputError, StagingStore};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("output file {path} already exists; move it aside and rerun")]
    OutputConflict { path: PathBuf },

    #[error("extraction failed at index {index} ({url}): {source}")]
    Extraction {
        index: usize,
        url: String,
        #[source]
        source: ScraperError,
    },

    #[error("discovery failed: {0}")]
    Discovery(#[source] ScraperError),

    #[error("regions configuration: {0}")]
    Regions(#[from] ConfigError),

    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),

    #[error("staging store: {0}")]
    Staging(#[source] OutputError),

    #[error("writing output: {0}")]
    Output(#[source] OutputError),
}

impl RunError {
    /// Process exit code for this failure.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Extraction { .. } => 1,
            Self::OutputConflict { .. } => 2,
            _ => 3,
        }
    }
}

/// Paths and knobs for one run.
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub regions_path: PathBuf,
    pub checkpoint_path: PathBuf,
    pub output_path: PathBuf,
    /// Profiles fetched at once. 1 is strictly sequential.
    pub concurrency: usize,
    pub discovery: DiscoveryOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total_urls: usize,
    /// Index the run resumed at, or `None` for a fresh discovery run.
    pub resumed_from: Option<usize>,
    pub extracted: usize,
    pub output_path: PathBuf,
}

/// Drives one run against a [`PageFetcher`].
pub struct Crawl<'a, F> {
    fetcher: &'a F,
    options: &'a CrawlOptions,
    checkpoint: CheckpointStore,
    staging: StagingStore,
}

impl<'a, F: PageFetcher> Crawl<'a, F> {
    pub fn new(fetcher: &'a F, options: &'a CrawlOptions) -> Self {
        Self {
            fetcher,
            options,
            checkpoint: CheckpointStore::new(&options.checkpoint_path),
            staging: StagingStore::new(staging_path_for(&options.output_path)),
        }
    }

    /// Runs to completion or to the first failure.
    ///
    /// On success the output file holds every record, and the staging file
    /// and checkpoint are gone. On an extraction failure the checkpoint
    /// points at the failing URL and the staged records below it are kept.
    ///
    /// # Errors
    ///
    /// Returns [`RunError`]; see [`RunError::exit_code`] for how each
    /// variant maps to a process exit status.
    pub async fn run(&self) -> Result<RunSummary, RunError> {
        self.ensure_output_free()?;

        let (mut state, mut records, resumed_from) = self.resume_or_discover().await?;
        let start = state.current_index;

        self.extract_remaining(&mut state, &mut records).await?;

        match write_output(&self.options.output_path, &records) {
            Ok(()) => {}
            Err(OutputError::AlreadyExists { path }) => {
                // Everything is staged; a rerun after the file is moved
                // only needs to write.
                state.current_index = state.urls.len();
                self.checkpoint.save(&state)?;
                return Err(RunError::OutputConflict { path });
            }
            Err(e) => return Err(RunError::Output(e)),
        }

        self.staging.remove().map_err(RunError::Staging)?;
        self.checkpoint.clear()?;

        Ok(RunSummary {
            total_urls: state.urls.len(),
            resumed_from,
            extracted: state.urls.len() - start,
            output_path: self.options.output_path.clone(),
        })
    }

    fn ensure_output_free(&self) -> Result<(), RunError> {
        let path = &self.options.output_path;
        if path.exists() {
            return Err(RunError::OutputConflict { path: path.clone() });
        }
        Ok(())
    }

    async fn resume_or_discover(
        &self,
    ) -> Result<(CrawlState, Vec<ProviderRecord>, Option<usize>), RunError> {
        if let Some(state) = self.checkpoint.load()? {
            tracing::info!(
                current_index = state.current_index,
                total = state.urls.len(),
                staging = %self.staging.path().display(),
                "resuming from checkpoint"
            );
            let records = self
                .staging
                .load_prefix(state.current_index)
                .map_err(RunError::Staging)?;
            let index = state.current_index;
            return Ok((state, records, Some(index)));
        }

        tracing::info!("no checkpoint found; discovering profile URLs");
        let urls = discover_urls(self.fetcher, &self.options.regions_path, &self.options.discovery)
            .await?;
        self.staging.reset().map_err(RunError::Staging)?;
        Ok((CrawlState::fresh(urls), Vec::new(), None))
    }

    /// Extracts `state.urls[state.current_index..]` in ordered batches of
    /// `concurrency`, staging each record before `current_index` passes it.
    async fn extract_remaining(
        &self,
        state: &mut CrawlState,
        records: &mut Vec<ProviderRecord>,
    ) -> Result<(), RunError> {
        let total = state.urls.len();
        let batch_size = self.options.concurrency.max(1);
        let delay = Duration::from_millis(self.options.discovery.inter_request_delay_ms);

        while state.current_index < total {
            let start = state.current_index;
            let end = (start + batch_size).min(total);
            if !delay.is_zero() && start > 0 {
                tokio::time::sleep(delay).await;
            }

            let results: Vec<Result<ProviderRecord, ScraperError>> =
                stream::iter(&state.urls[start..end])
                    .map(|url| self.extract_one(url))
                    .buffered(batch_size)
                    .collect()
                    .await;

            for result in results {
                let index = state.current_index;
                let url = state.urls[index].clone();
                match result {
                    Ok(record) => {
                        if let Err(e) = self.staging.append(&record) {
                            self.checkpoint.save(state)?;
                            return Err(RunError::Staging(e));
                        }
                        tracing::info!(index, total, url = %url, "extracted profile");
                        records.push(record);
                        state.current_index += 1;
                    }
                    Err(source) => {
                        tracing::error!(index, url = %url, error = %source, "extraction failed");
                        self.checkpoint.save(state)?;
                        return Err(RunError::Extraction { index, url, source });
                    }
                }
            }
        }

        Ok(())
    }

    async fn extract_one(&self, url: &str) -> Result<ProviderRecord, ScraperError> {
        let html = self.fetcher.fetch(url).await?;
        extract_record(&html)
    }
}

/// Loads the regions file and discovers the deduplicated profile URL list.
///
/// # Errors
///
/// Returns [`RunError::Regions`] if the regions file is unusable and
/// [`RunError::Discovery`] on the first listing fetch failure.
pub async fn discover_urls<F: PageFetcher>(
    fetcher: &F,
    regions_path: &Path,
    options: &DiscoveryOptions,
) -> Result<Vec<String>, RunError> {
    let regions = load_regions(regions_path)?;
    let targets = targets_from_regions(&regions);
    discover_profile_urls(fetcher, &targets, options)
        .await
        .map_err(RunError::Discovery)
}

#[cfg(test)]
#[path = "crawl_test.rs"]
mod tests;
