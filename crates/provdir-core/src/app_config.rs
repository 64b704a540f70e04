use std::path::PathBuf;

/// Runtime settings for a crawl, resolved from `PROVDIR_*` environment
/// variables. See [`crate::load_app_config`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub regions_path: PathBuf,
    /// Directory origin, e.g. `"https://www.sharecare.com"`. Listing URLs are
    /// built from it and relative profile links are joined onto it.
    pub base_url: String,
    /// Value of the `what=` search parameter, e.g. `"Dentistry"`.
    pub search_specialty: String,
    pub checkpoint_path: PathBuf,
    pub output_path: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Upper bound on listing pages per search target. Discovery normally
    /// stops earlier, at the first page with no profile links.
    pub max_pages: u32,
    pub inter_request_delay_ms: u64,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    /// Number of profiles extracted per ordered batch. `1` is fully sequential.
    pub extract_concurrency: usize,
}
