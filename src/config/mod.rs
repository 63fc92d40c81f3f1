//! Configuration module for Chartsweep
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. All settings have defaults, so the config file is optional.

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, OutputConfig, ScraperConfig, SiteConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default};
