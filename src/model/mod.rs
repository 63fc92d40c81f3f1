//! Core data types for scraped game-sales data
//!
//! The genre set is discovered at runtime, so [`GenreId`] is an opaque
//! newtype over the site's own option values rather than an enum.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque genre identifier, as listed in the site's search form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenreId(String);

impl GenreId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GenreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GenreId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One unit of scraping work: a single result page of a single genre
///
/// Page indices are 1-based, matching the site's `page` query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTask {
    pub genre: GenreId,
    pub page: u32,
}

impl PageTask {
    pub fn new(genre: GenreId, page: u32) -> Self {
        Self { genre, page }
    }
}

/// One row of scraped game data: a game's sales listing within one genre
///
/// Sales figures are in millions of units, as reported by the site.
/// There is no identity key; the same game may appear under several genres
/// and duplicates are deliberately not removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(rename = "Console")]
    pub console: String,

    #[serde(rename = "Game Name")]
    pub name: String,

    #[serde(rename = "Publisher")]
    pub publisher: String,

    #[serde(rename = "Total Shipped")]
    pub total_shipped: Option<f64>,

    #[serde(rename = "Total Sales")]
    pub total_sales: Option<f64>,

    #[serde(rename = "Release Date")]
    pub release_date: Option<String>,

    #[serde(rename = "Last Update")]
    pub last_update: Option<String>,

    #[serde(rename = "Genre")]
    pub genre: GenreId,
}

impl GameRecord {
    /// Spreadsheet column headers, in serialization order
    pub const HEADERS: [&'static str; 8] = [
        "Console",
        "Game Name",
        "Publisher",
        "Total Shipped",
        "Total Sales",
        "Release Date",
        "Last Update",
        "Genre",
    ];
}
