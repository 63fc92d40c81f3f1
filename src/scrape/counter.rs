//! Result counting and page-count computation
//!
//! The site reports a genre's total result count as free text inside a table
//! header, e.g. "Results: (8,872)". That total divided by the fixed page
//! size (rounded up) gives the number of page tasks to schedule.

use crate::scrape::fetcher::{fetch_page, RetryPolicy};
use crate::site::{self, RESULTS_PER_PAGE};
use crate::{GenreId, SweepError};
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::OnceLock;
use url::Url;

fn result_count_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Results:\s*\(([\d,]+)\)").expect("result count pattern"))
}

/// Extracts the total result count from a results page
///
/// Scans `<th>` elements for the "Results: (N)" text and strips the comma
/// grouping. Returns None when the text is absent or malformed.
pub fn parse_result_count(html: &str) -> Option<u64> {
    let document = Html::parse_document(html);
    let th_sel = Selector::parse("th").ok()?;

    for th in document.select(&th_sel) {
        let text: String = th.text().collect();
        if let Some(captures) = result_count_re().captures(&text) {
            let digits = captures[1].replace(',', "");
            if let Ok(total) = digits.parse::<u64>() {
                return Some(total);
            }
        }
    }

    None
}

/// Number of result pages needed to cover `total` results
pub fn pages_for(total: u64) -> u32 {
    total.div_ceil(RESULTS_PER_PAGE as u64) as u32
}

/// Fetches page 1 of a genre and computes its page count
///
/// A missing or malformed result count is treated as zero results: the
/// genre is skipped with a warning rather than failing the run.
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `base` - Base URL of the site
/// * `genre` - The genre to count
/// * `retry` - Retry and throttling policy
pub async fn count_pages(
    client: &Client,
    base: &Url,
    genre: &GenreId,
    retry: &RetryPolicy,
) -> Result<u32, SweepError> {
    let url = site::results_url(base, genre, 1)?;
    let html = fetch_page(client, &url, retry).await?;

    match parse_result_count(&html) {
        Some(total) => {
            let pages = pages_for(total);
            tracing::info!(
                "Genre {}: {} results, {} pages at {} per page",
                genre,
                total,
                pages,
                RESULTS_PER_PAGE
            );
            Ok(pages)
        }
        None => {
            tracing::warn!("Could not determine result count for genre {}, skipping", genre);
            Ok(0)
        }
    }
}
