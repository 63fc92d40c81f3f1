//! Site adapter for VGChartz URLs
//!
//! The exact query shape of the results endpoint is a black-box contract
//! with the site's current markup. It is isolated here so that a layout
//! change on their side only requires edits to this module.

use crate::model::GenreId;
use url::Url;

/// Fixed page size used for every results request
pub const RESULTS_PER_PAGE: u32 = 200;

/// Path of the search form and results endpoint
const GAMES_PATH: &str = "/games/games.php";

/// URL of the search form page, used for genre discovery
pub fn search_form_url(base: &Url) -> Result<Url, url::ParseError> {
    base.join(GAMES_PATH)
}

/// URL of one results page for one genre
///
/// The long `show*` parameter block selects which columns the site renders;
/// the results table parser depends on this exact column selection.
pub fn results_url(base: &Url, genre: &GenreId, page: u32) -> Result<Url, url::ParseError> {
    let mut url = base.join(GAMES_PATH)?;

    url.query_pairs_mut()
        .append_pair("name", "")
        .append_pair("keyword", "")
        .append_pair("console", "")
        .append_pair("region", "All")
        .append_pair("developer", "")
        .append_pair("publisher", "")
        .append_pair("goty_year", "")
        .append_pair("genre", genre.as_str())
        .append_pair("boxart", "Both")
        .append_pair("banner", "Both")
        .append_pair("ownership", "Both")
        .append_pair("showmultiplat", "No")
        .append_pair("results", &RESULTS_PER_PAGE.to_string())
        .append_pair("order", "Popular")
        .append_pair("showtotalsales", "0")
        .append_pair("showtotalsales", "1")
        .append_pair("showpublisher", "0")
        .append_pair("showpublisher", "1")
        .append_pair("showvgchartzscore", "0")
        .append_pair("shownasales", "0")
        .append_pair("showdeveloper", "0")
        .append_pair("showcriticscore", "0")
        .append_pair("showpalsales", "0")
        .append_pair("showreleasedate", "0")
        .append_pair("showreleasedate", "1")
        .append_pair("showuserscore", "0")
        .append_pair("showjapansales", "0")
        .append_pair("showlastupdate", "0")
        .append_pair("showlastupdate", "1")
        .append_pair("showothersales", "0")
        .append_pair("showshipped", "0")
        .append_pair("showshipped", "1")
        .append_pair("page", &page.to_string());

    Ok(url)
}
