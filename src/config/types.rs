use serde::Deserialize;

/// Main configuration structure for Chartsweep
///
/// Every field has a default so the scraper runs with no config file at all.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scraper: ScraperConfig,
    pub site: SiteConfig,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scraper: ScraperConfig::default(),
            site: SiteConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Scraper behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Number of concurrent page fetch workers
    pub workers: usize,

    /// Maximum fetch attempts per page before a 429 becomes terminal
    #[serde(rename = "retry-max-attempts")]
    pub retry_max_attempts: u32,

    /// Backoff after a 429 without a Retry-After header (seconds)
    #[serde(rename = "retry-backoff-secs")]
    pub retry_backoff_secs: u64,

    /// Upper bound of the random pre-request delay (milliseconds)
    #[serde(rename = "request-jitter-ms")]
    pub request_jitter_ms: u64,

    /// User agent sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            // Small on purpose: more workers trip the site's rate limit
            workers: 2,
            retry_max_attempts: 5,
            retry_backoff_secs: 30,
            request_jitter_ms: 2000,
            user_agent: format!("chartsweep/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL of the site being scraped
    #[serde(rename = "base-url")]
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.vgchartz.com".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the spreadsheet file records are appended to
    #[serde(rename = "spreadsheet-path")]
    pub spreadsheet_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            spreadsheet_path: "vgchartz_games.csv".to_string(),
        }
    }
}
