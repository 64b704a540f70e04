pub mod app_config;
pub mod config;
pub mod crawl_state;
pub mod records;
pub mod regions;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use crawl_state::CrawlState;
pub use records::{InsuranceAcceptance, ParsedAddress, ParsedName, ProviderRecord};
pub use regions::{load_regions, targets_from_regions, SearchTarget};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read regions file {path}: {source}")]
    RegionsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse regions file: {0}")]
    RegionsFileParse(#[source] serde_yaml::Error),

    #[error("invalid regions configuration: {0}")]
    Validation(String),
}
