//! Profile URL discovery across paginated listing pages.

use std::collections::HashSet;
use std::time::Duration;

use provdir_core::SearchTarget;

use crate::error::ScraperError;
use crate::fetch::PageFetcher;
use crate::listing::{extract_profile_links, search_url};

/// Where and how far to page through listings.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    pub base_url: String,
    pub specialty: String,
    /// Hard ceiling on pages per target, guarding against a server that
    /// never returns an empty page.
    pub max_pages: u32,
    /// Delay between consecutive listing requests (not applied before the first).
    pub inter_request_delay_ms: u64,
}

/// Collects profile URLs for every target and removes duplicates.
///
/// The result keeps the first occurrence of each URL, so the same targets
/// over the same pages always produce the same list.
///
/// # Errors
///
/// The first fetch failure aborts discovery and is returned as-is; URLs
/// gathered before it are discarded.
pub async fn discover_profile_urls<F: PageFetcher>(
    fetcher: &F,
    targets: &[SearchTarget],
    options: &DiscoveryOptions,
) -> Result<Vec<String>, ScraperError> {
    let mut all_urls = Vec::new();
    let mut is_first_request = true;

    for target in targets {
        let found = discover_target(fetcher, target, options, &mut is_first_request).await?;
        tracing::info!(search = %target, found = found.len(), "discovered profile links");
        all_urls.extend(found);
    }

    let urls = dedup_urls(all_urls);
    tracing::info!(
        targets = targets.len(),
        unique_urls = urls.len(),
        "discovery complete"
    );
    Ok(urls)
}

/// Pages through one target's listings from page 1 until a page yields no
/// profile links or `options.max_pages` is reached.
async fn discover_target<F: PageFetcher>(
    fetcher: &F,
    target: &SearchTarget,
    options: &DiscoveryOptions,
    is_first_request: &mut bool,
) -> Result<Vec<String>, ScraperError> {
    let mut urls = Vec::new();

    for page_number in 1..=options.max_pages {
        if !*is_first_request && options.inter_request_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(options.inter_request_delay_ms)).await;
        }
        *is_first_request = false;

        let page_url = search_url(&options.base_url, &options.specialty, target, page_number)?;
        let html = fetcher.fetch(&page_url).await?;
        let links = extract_profile_links(&html, &options.base_url);

        if links.is_empty() {
            tracing::debug!(search = %target, page_number, "empty listing page; target exhausted");
            return Ok(urls);
        }

        tracing::debug!(search = %target, page_number, links = links.len(), "listing page");
        urls.extend(links);
    }

    tracing::warn!(
        search = %target,
        max_pages = options.max_pages,
        "page limit reached before an empty listing page; moving on"
    );
    Ok(urls)
}

/// Removes repeated URLs, keeping the first occurrence of each.
#[must_use]
pub fn dedup_urls(urls: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.into_iter()
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty() && seen.insert(url.clone()))
        .collect()
}

#[cfg(test)]
#[path = "discover_test.rs"]
mod tests;
