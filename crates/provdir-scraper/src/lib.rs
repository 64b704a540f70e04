pub mod address;
pub mod client;
pub mod discover;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod listing;
pub mod names;
mod retry;

pub use address::parse_address;
pub use client::DirectoryClient;
pub use discover::{dedup_urls, discover_profile_urls, DiscoveryOptions};
pub use error::ScraperError;
pub use extract::{extract_from_document, extract_record};
pub use fetch::PageFetcher;
pub use listing::{extract_profile_links, search_url};
pub use names::{parse_full_name, try_parse_full_name, NameAnomaly};
