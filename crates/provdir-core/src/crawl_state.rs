use serde::{Deserialize, Serialize};

/// How far a crawl has progressed: every URL before `current_index` has been
/// extracted and staged; `current_index` is the next URL to process.
///
/// The on-disk form is `{"currentIndex": N, "urls": [...]}`; the snake-case
/// key `current_index` is accepted when reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlState {
    #[serde(rename = "currentIndex", alias = "current_index")]
    pub current_index: usize,
    pub urls: Vec<String>,
}

impl CrawlState {
    /// A state positioned at the first URL.
    #[must_use]
    pub fn fresh(urls: Vec<String>) -> Self {
        Self {
            current_index: 0,
            urls,
        }
    }

    /// URLs not yet processed.
    #[must_use]
    pub fn remaining(&self) -> &[String] {
        self.urls.get(self.current_index..).unwrap_or(&[])
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current_index >= self.urls.len()
    }

    /// `true` when the index points inside or exactly at the end of the URL list.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.current_index <= self.urls.len()
    }
}
