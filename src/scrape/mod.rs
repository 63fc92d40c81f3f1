//! Scraping pipeline: fetch, parse, schedule, aggregate
//!
//! This module contains the core of the harvester:
//! - HTTP fetching with bounded retry on 429
//! - Genre discovery from the search form
//! - Result counting and page-count computation
//! - Record extraction from results pages
//! - Concurrent scheduling over a bounded worker pool

mod aggregator;
mod counter;
mod fetcher;
mod genres;
mod parser;
mod scheduler;

pub use aggregator::ResultAggregator;
pub use counter::{count_pages, pages_for, parse_result_count};
pub use fetcher::{build_http_client, fetch_page, RetryPolicy};
pub use genres::{discover_genres, parse_genre_options};
pub use parser::parse_records;
pub use scheduler::{ScrapeOutcome, TaskScheduler};
