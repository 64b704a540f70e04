//! Listing (search-result) pages: URL construction and profile-link harvesting.
//!
//! Listing URLs look like:
//! ```text
//! https://www.sharecare.com/find-a-doctor/search?what=Dentistry&where=Austin%2C+TX&pageNum=2
//! ```
//! Profile links on a listing page are site-relative `href`s containing
//! `/doctor/`.

use std::collections::HashSet;
use std::sync::LazyLock;

use provdir_core::SearchTarget;
use reqwest::Url;
use scraper::{Html, Selector};

use crate::error::ScraperError;

/// Path fragment that identifies a provider profile link.
pub const PROFILE_PATH_MARKER: &str = "/doctor/";

static LINK: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("a[href]").unwrap_or_else(|e| panic!("invalid selector a[href]: {e}"))
});

/// Builds the URL of one listing page for `target`.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if `base_url` is not a valid URL base.
pub fn search_url(
    base_url: &str,
    specialty: &str,
    target: &SearchTarget,
    page_number: u32,
) -> Result<String, ScraperError> {
    let base = format!("{}/find-a-doctor/search", base_url.trim_end_matches('/'));
    let mut url = Url::parse(&base).map_err(|e| ScraperError::InvalidUrl {
        url: base_url.to_owned(),
        reason: e.to_string(),
    })?;

    url.query_pairs_mut()
        .append_pair("what", specialty)
        .append_pair("where", &target.to_string())
        .append_pair("pageNum", &page_number.to_string());

    Ok(url.to_string())
}

/// Returns every absolute profile URL linked from a listing page, in page
/// order and without repeats.
///
/// Relative `href`s are resolved against `base_url`. Links that cannot be
/// resolved are skipped.
#[must_use]
pub fn extract_profile_links(html: &str, base_url: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let base = Url::parse(base_url).ok();
    let mut seen = HashSet::new();

    document
        .select(&LINK)
        .filter_map(|link| link.value().attr("href"))
        .map(str::trim)
        .filter(|href| href.contains(PROFILE_PATH_MARKER))
        .filter_map(|href| resolve_href(href, base.as_ref()))
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

fn resolve_href(href: &str, base: Option<&Url>) -> Option<String> {
    match Url::parse(href) {
        Ok(url) => Some(url.to_string()),
        Err(_) => {
            let joined = base?.join(href);
            if let Err(e) = &joined {
                tracing::debug!(href, error = %e, "could not resolve profile link");
            }
            joined.ok().map(|u| u.to_string())
        }
    }
}
