//! Chartsweep: a VGChartz game-sales harvester
//!
//! This crate scrapes game-sales listings from VGChartz genre by genre,
//! fanning page fetches out over a bounded worker pool that backs off on
//! HTTP 429, and appends the collected records to a spreadsheet file.

pub mod config;
pub mod model;
pub mod output;
pub mod scrape;
pub mod site;

use thiserror::Error;

/// Main error type for Chartsweep operations
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP request failed for {url}: {source}")]
    Fetch {
        url: String,
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Rate limit retries exhausted for {url} after {attempts} attempts")]
    RateLimitExceeded { url: String, attempts: u32 },

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Worker pool error: {0}")]
    Pool(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised when expected structure is absent from fetched markup
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Genre <select> not found in search form")]
    GenreSelectMissing,

    #[error("Results table not found for genre {genre}")]
    ResultsTableMissing { genre: String },
}

/// Errors raised while reading or writing the output spreadsheet
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for Chartsweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use model::{GameRecord, GenreId, PageTask};
pub use scrape::{ResultAggregator, ScrapeOutcome, TaskScheduler};
