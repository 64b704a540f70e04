//! The seam between page retrieval and everything that parses pages.

use std::future::Future;

use crate::error::ScraperError;

/// Retrieves the raw HTML behind a URL.
///
/// [`crate::DirectoryClient`] is the network implementation; discovery and
/// extraction only depend on this trait so they can run against canned pages.
pub trait PageFetcher {
    /// # Errors
    ///
    /// Any network failure or non-success status, as a [`ScraperError`].
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, ScraperError>> + Send;
}
