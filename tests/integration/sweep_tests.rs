//! End-to-end sweep tests against a mock site

use chartsweep::model::{GameRecord, GenreId};
use chartsweep::output::{count_rows, persist};
use chartsweep::scrape::{discover_genres, RetryPolicy, TaskScheduler};
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

const GAMES_PATH: &str = "/games/games.php";

/// Matches the search form request, which carries no query string
struct NoQueryParams;

impl Match for NoQueryParams {
    fn matches(&self, request: &Request) -> bool {
        request.url.query().map_or(true, |q| q.is_empty())
    }
}

fn test_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        backoff: Duration::ZERO,
        jitter: Duration::ZERO,
    }
}

fn test_client() -> reqwest::Client {
    chartsweep::scrape::build_http_client(&chartsweep::config::ScraperConfig::default()).unwrap()
}

fn scheduler_for(server: &MockServer) -> TaskScheduler {
    let base = Url::parse(&server.uri()).unwrap();
    TaskScheduler::new(test_client(), base, test_policy(), 2)
}

/// Builds a search form page listing the given genres
fn form_page(genres: &[&str]) -> String {
    let options: String = genres
        .iter()
        .map(|g| format!(r#"<option value="{}">{}</option>"#, g, g))
        .collect();

    format!(
        r#"<html><body><form>
        <select name="genre"><option value="">All</option>{}</select>
        </form></body></html>"#,
        options
    )
}

/// Builds one game row with the column layout the scraper requests
fn game_row(pos: u32, name: &str, console: &str, shipped: &str) -> String {
    format!(
        r#"<tr>
        <td>{pos}</td>
        <td><img src="box.jpg" alt="Boxart Missing"></td>
        <td><a href="/game/{pos}">{name}</a> Read the review</td>
        <td><img src="icon.png" alt="{console}"></td>
        <td>Some Publisher</td>
        <td>{shipped}</td>
        <td>N/A</td>
        <td>01st Jan 20</td>
        <td>05th Feb 21</td>
        </tr>"#
    )
}

/// Builds a results page with the "Results: (N)" header and the given rows
fn results_page(total: u64, rows: &[String]) -> String {
    format!(
        r#"<html><body>
        <table><tr><th>Results: ({})</th></tr></table>
        <table>
            <tr><th>Pos</th><th></th><th>Game</th><th></th><th>Publisher</th>
                <th>Total Shipped</th><th>Total Sales</th><th>Release Date</th><th>Last Update</th></tr>
            {}
        </table>
        </body></html>"#,
        group_digits(total),
        rows.join("\n")
    )
}

/// Comma-groups an integer the way the site renders counts
fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

async fn mount_results_page(server: &MockServer, genre: &str, page: u32, body: String) {
    Mock::given(method("GET"))
        .and(path(GAMES_PATH))
        .and(query_param("genre", genre))
        .and(query_param("page", page.to_string()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_discover_genres_from_form() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(GAMES_PATH))
        .and(NoQueryParams)
        .respond_with(
            ResponseTemplate::new(200).set_body_string(form_page(&["Action", "Sports", "Puzzle"])),
        )
        .mount(&server)
        .await;

    let base = Url::parse(&server.uri()).unwrap();
    let genres = discover_genres(&test_client(), &base, &test_policy())
        .await
        .unwrap();

    assert_eq!(
        genres,
        vec![
            GenreId::new("Action"),
            GenreId::new("Sports"),
            GenreId::new("Puzzle"),
        ]
    );
}

#[tokio::test]
async fn test_full_sweep_collects_all_pages() {
    let server = MockServer::start().await;

    // 250 results -> 2 pages at 200 per page
    let page1 = results_page(
        250,
        &[
            game_row(1, "Game One", "PS4", "4.00m"),
            game_row(2, "Game Two", "XOne", "2.50m"),
        ],
    );
    let page2 = results_page(250, &[game_row(201, "Game Three", "NS", "0.75m")]);

    mount_results_page(&server, "Action", 1, page1).await;
    mount_results_page(&server, "Action", 2, page2).await;

    let outcome = scheduler_for(&server)
        .run(&[GenreId::new("Action")])
        .await
        .unwrap();

    assert_eq!(outcome.pages_scheduled, 2);
    assert_eq!(outcome.pages_failed, 0);
    assert_eq!(outcome.genres_skipped, 0);
    assert_eq!(outcome.records.len(), 3);

    let names: Vec<&str> = outcome.records.iter().map(|r| r.name.as_str()).collect();
    assert!(names.contains(&"Game One"));
    assert!(names.contains(&"Game Three"));

    // Fields survived the trip through the page markup
    let game_one = outcome
        .records
        .iter()
        .find(|r| r.name == "Game One")
        .unwrap();
    assert_eq!(game_one.console, "PS4");
    assert_eq!(game_one.total_shipped, Some(4.0));
    assert_eq!(game_one.total_sales, None);
    assert_eq!(game_one.genre, GenreId::new("Action"));
}

#[tokio::test]
async fn test_rate_limited_page_is_retried_without_duplication() {
    let server = MockServer::start().await;

    let page = results_page(100, &[game_row(1, "Resilient Game", "PC", "1.00m")]);

    // The first request gets rate limited, every later one succeeds
    Mock::given(method("GET"))
        .and(path(GAMES_PATH))
        .and(query_param("genre", "Action"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    mount_results_page(&server, "Action", 1, page).await;

    let outcome = scheduler_for(&server)
        .run(&[GenreId::new("Action")])
        .await
        .unwrap();

    assert_eq!(outcome.pages_failed, 0);
    // Included exactly once despite the retry
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].name, "Resilient Game");
}

#[tokio::test]
async fn test_failed_page_is_skipped_but_run_completes() {
    let server = MockServer::start().await;

    let page1 = results_page(400, &[game_row(1, "Good Page Game", "PS5", "3.00m")]);

    mount_results_page(&server, "Shooter", 1, page1).await;

    // Page 2 fails permanently with a server error
    Mock::given(method("GET"))
        .and(path(GAMES_PATH))
        .and(query_param("genre", "Shooter"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let outcome = scheduler_for(&server)
        .run(&[GenreId::new("Shooter")])
        .await
        .unwrap();

    assert_eq!(outcome.pages_scheduled, 2);
    assert_eq!(outcome.pages_failed, 1);
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].name, "Good Page Game");
}

#[tokio::test]
async fn test_genre_without_results_is_skipped() {
    let server = MockServer::start().await;

    // Page 1 exists but carries no "Results: (N)" header
    let body = r#"<html><body><table><tr><th>Pos</th></tr></table></body></html>"#;
    mount_results_page(&server, "Obscure", 1, body.to_string()).await;

    let outcome = scheduler_for(&server)
        .run(&[GenreId::new("Obscure")])
        .await
        .unwrap();

    assert_eq!(outcome.genres_skipped, 1);
    assert_eq!(outcome.pages_scheduled, 0);
    assert!(outcome.records.is_empty());
}

#[tokio::test]
async fn test_sweep_results_persist_and_append() {
    let server = MockServer::start().await;

    let page = results_page(
        2,
        &[
            game_row(1, "First Game", "PS4", "2.00m"),
            game_row(2, "Second Game", "PC", "N/A"),
        ],
    );
    mount_results_page(&server, "Racing", 1, page).await;

    let scheduler = scheduler_for(&server);
    let dir = tempfile::TempDir::new().unwrap();
    let out_path = dir.path().join("vgchartz_games.csv");

    // First run creates the file
    let outcome = scheduler.run(&[GenreId::new("Racing")]).await.unwrap();
    let first = persist(&outcome.records, &out_path).unwrap();
    assert_eq!(first.appended, 2);
    assert_eq!(first.total_rows, 2);

    // Second run appends without touching the existing rows
    let outcome = scheduler.run(&[GenreId::new("Racing")]).await.unwrap();
    let second = persist(&outcome.records, &out_path).unwrap();
    assert_eq!(second.appended, 2);
    assert_eq!(second.total_rows, 4);
    assert_eq!(count_rows(&out_path).unwrap(), 4);

    // Rows deserialize back into records
    let mut reader = csv::Reader::from_path(&out_path).unwrap();
    let rows: Vec<GameRecord> = reader.deserialize().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].name, "First Game");
    assert_eq!(rows[1].total_shipped, None);
    assert_eq!(rows[3].genre, GenreId::new("Racing"));
}
