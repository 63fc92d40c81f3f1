//! Record extraction from a results page
//!
//! Site-specific markup quirks live here:
//! - the results table is identified by a "Pos" header cell
//! - the console name comes from a small icon's alt attribute, not from
//!   visible text (the boxart image uses alt "Boxart Missing" as a
//!   placeholder and must be skipped)
//! - the game name cell carries a trailing "Read the review" annotation
//!   that has to be stripped
//!
//! A missing or unparseable field degrades to a null value for that field;
//! only a page without the results table at all is an error.

use crate::{GameRecord, GenreId, ParseError};
use scraper::{ElementRef, Html, Selector};

/// Minimum cells per row for the column layout the results URL requests
const MIN_CELLS: usize = 9;

/// Cell indices that may carry the console icon
const CONSOLE_CELLS: [usize; 2] = [2, 3];

/// Extracts one [`GameRecord`] per game row from a results page
///
/// # Arguments
///
/// * `html` - The results page markup
/// * `genre` - The genre this page belongs to
///
/// # Returns
///
/// * `Ok(Vec<GameRecord>)` - Parsed records, possibly empty
/// * `Err(ParseError::ResultsTableMissing)` - No results table in the page
pub fn parse_records(html: &str, genre: &GenreId) -> Result<Vec<GameRecord>, ParseError> {
    let document = Html::parse_document(html);

    let table = find_results_table(&document).ok_or_else(|| ParseError::ResultsTableMissing {
        genre: genre.to_string(),
    })?;

    let tr_sel = selector("tr");
    let td_sel = selector("td");

    let mut records = Vec::new();

    // First row is the header
    for row in table.select(&tr_sel).skip(1) {
        let cells: Vec<ElementRef> = row.select(&td_sel).collect();
        if cells.len() < MIN_CELLS {
            continue;
        }

        let name = cell_text(&cells[2]).replace("Read the review", "").trim().to_string();

        records.push(GameRecord {
            console: console_name(&cells),
            name,
            publisher: cell_text(&cells[4]),
            total_shipped: parse_sales_figure(&cell_text(&cells[5])),
            total_sales: parse_sales_figure(&cell_text(&cells[6])),
            release_date: clean_field(&cell_text(&cells[7])),
            last_update: clean_field(&cell_text(&cells[8])),
            genre: genre.clone(),
        });
    }

    Ok(records)
}

/// Finds the table whose header row contains the "Pos" column
fn find_results_table(document: &Html) -> Option<ElementRef<'_>> {
    let table_sel = selector("table");
    let th_sel = selector("th");

    document.select(&table_sel).find(|table| {
        table
            .select(&th_sel)
            .any(|th| th.text().collect::<String>().contains("Pos"))
    })
}

/// Derives the console name from the icon image's alt attribute
///
/// Checks the candidate cells in order and skips the boxart placeholder.
/// Falls back to "Unknown" when no usable icon is present.
fn console_name(cells: &[ElementRef]) -> String {
    let img_sel = selector("img");

    for &idx in &CONSOLE_CELLS {
        if let Some(cell) = cells.get(idx) {
            for img in cell.select(&img_sel) {
                if let Some(alt) = img.value().attr("alt") {
                    let alt = alt.trim();
                    if !alt.is_empty() && alt != "Boxart Missing" {
                        return alt.to_string();
                    }
                }
            }
        }
    }

    "Unknown".to_string()
}

/// Collects a cell's text content with whitespace collapsed
fn cell_text(cell: &ElementRef) -> String {
    let raw: String = cell.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parses a sales figure like "3.60m" into millions of units
///
/// "N/A", empty text, and anything non-numeric become None.
pub(crate) fn parse_sales_figure(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("n/a") {
        return None;
    }

    let digits = text
        .trim_end_matches(['m', 'M'])
        .replace(',', "");

    digits.parse::<f64>().ok()
}

/// Normalizes a free-text field, mapping empty and "N/A" to None
fn clean_field(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("n/a") {
        None
    } else {
        Some(text.to_string())
    }
}

/// Parses a static selector known to be valid
fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}
