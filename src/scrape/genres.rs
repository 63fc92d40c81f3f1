//! Genre discovery from the site's search form
//!
//! The set of valid genres is not hardcoded anywhere; it is read from the
//! `<select name="genre">` element of the search form once per run and
//! treated as read-only afterwards.

use crate::scrape::fetcher::{fetch_page, RetryPolicy};
use crate::site;
use crate::{GenreId, ParseError, SweepError};
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

/// Parses the genre options out of the search form markup
///
/// The blank first option (the "any genre" placeholder) is skipped.
///
/// # Returns
///
/// * `Ok(Vec<GenreId>)` - Genres in the order the form lists them
/// * `Err(ParseError::GenreSelectMissing)` - Expected form structure absent
pub fn parse_genre_options(html: &str) -> Result<Vec<GenreId>, ParseError> {
    let document = Html::parse_document(html);

    let select_sel = Selector::parse(r#"select[name="genre"]"#)
        .map_err(|_| ParseError::GenreSelectMissing)?;
    let option_sel = Selector::parse("option").map_err(|_| ParseError::GenreSelectMissing)?;

    let select = document
        .select(&select_sel)
        .next()
        .ok_or(ParseError::GenreSelectMissing)?;

    let mut genres = Vec::new();
    for option in select.select(&option_sel) {
        let value = option.value().attr("value").unwrap_or("").trim();
        if !value.is_empty() {
            genres.push(GenreId::new(value));
        }
    }

    Ok(genres)
}

/// Fetches the search form and discovers the set of valid genres
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `base` - Base URL of the site
/// * `retry` - Retry and throttling policy
pub async fn discover_genres(
    client: &Client,
    base: &Url,
    retry: &RetryPolicy,
) -> Result<Vec<GenreId>, SweepError> {
    let url = site::search_form_url(base)?;
    let html = fetch_page(client, &url, retry).await?;

    let genres = parse_genre_options(&html)?;
    tracing::info!("Discovered {} genres", genres.len());

    Ok(genres)
}
