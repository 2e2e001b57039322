//! Integration tests for the harvest pipeline
//!
//! These tests use wiremock to serve fake listing pages and drive the full
//! fetch -> parse -> dedup -> append cycle end-to-end against a temporary
//! export directory. The sheet sink stays disabled throughout; its client
//! is exercised by its own unit tests.

use quote_harvest::catalog::Category;
use quote_harvest::config::Settings;
use quote_harvest::crawler::Pipeline;
use quote_harvest::output::SheetSink;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds one quote container div the way the listing pages do: quote text
/// and attribution share the quoteText element, separated by a horizontal bar
fn quote_div(text: &str, author: &str, tags: &str, likes: &str) -> String {
    format!(
        "<div class=\"quote\">\
           <div class=\"quoteText\">\u{201C}{text}\u{201D}\n  \u{2015}\n  \
             <span class=\"authorOrTitle\">{author}</span>\
           </div>\
           <div class=\"greyText\">{tags}</div>\
           <div class=\"right\">{likes}</div>\
         </div>"
    )
}

/// Builds a listing page from containers plus an optional next link
fn listing_page(quotes: &[String], next_href: Option<&str>) -> String {
    let next = next_href
        .map(|href| format!(r#"<a class="next_page" href="{href}">Next</a>"#))
        .unwrap_or_default();
    format!(
        "<html><body>{}{}</body></html>",
        quotes.concat(),
        next
    )
}

/// Test settings: no politeness delay, export into the given directory
fn test_settings(export_dir: &TempDir) -> Settings {
    let mut settings = Settings::default();
    settings.scrape.delay_min_ms = 0;
    settings.scrape.delay_max_ms = 0;
    settings.output.export_dir = export_dir.path().to_string_lossy().into_owned();
    settings
}

/// A catalog entry pointing at the mock server
fn test_category(ordinal: u32, name: &'static str, server: &MockServer, start_path: &str) -> Category {
    let url: &'static str = Box::leak(format!("{}{}", server.uri(), start_path).into_boxed_str());
    Category { ordinal, name, url }
}

/// Reads a category CSV back as (header, rows)
fn read_csv(export_dir: &TempDir, stem: &str) -> (Vec<String>, Vec<Vec<String>>) {
    let path = export_dir.path().join(format!("{stem}.csv"));
    let mut reader = csv::Reader::from_path(&path).expect("CSV file should exist");
    let header = reader
        .headers()
        .unwrap()
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    (header, rows)
}

async fn run_pipeline(
    settings: Settings,
    categories: &[&Category],
    page_limit: u32,
) -> quote_harvest::crawler::HarvestSummary {
    let mut pipeline = Pipeline::new(settings, SheetSink::Disabled).expect("pipeline builds");
    pipeline
        .run(categories, page_limit)
        .await
        .expect("run succeeds")
}

#[tokio::test]
async fn test_full_harvest_across_pages() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let page1 = listing_page(
        &[
            quote_div("the stars are made of patience", "Ann Author", "tags: stars, patience", "12 likes"),
            quote_div("rivers remember every stone they pass", "Bo Writer", "rivers", "1,234 likes"),
        ],
        Some("/quotes/tag/love?page=2"),
    );
    let page2 = listing_page(
        &[quote_div("morning light forgives the night", "Cy Poet", "", "7 likes")],
        None,
    );

    // Mount the page-2 mock first: mocks match in mount order, and the
    // plain path matcher would otherwise swallow the ?page=2 request
    Mock::given(method("GET"))
        .and(path("/quotes/tag/love"))
        .and(wiremock::matchers::query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page2))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/quotes/tag/love"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page1))
        .mount(&server)
        .await;

    let category = test_category(1, "Love Quotes", &server, "/quotes/tag/love");
    let summary = run_pipeline(test_settings(&dir), &[&category], 0).await;

    assert_eq!(summary.total_new(), 3);
    assert_eq!(summary.categories[0].pages_fetched, 2);
    assert!(!summary.categories[0].fetch_failed);

    let (header, rows) = read_csv(&dir, "Love");
    assert_eq!(
        header,
        vec!["SNO", "THUMB", "CATEGORY", "AUTHOR", "QUOTE", "TRANSLATE", "TAGS", "LIKES", "IMAGE", "TOTAL"]
    );
    assert_eq!(rows.len(), 3);

    // Serials are contiguous from 1 in document/pagination order
    let serials: Vec<&str> = rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(serials, vec!["1", "2", "3"]);
    assert_eq!(rows[0][4], "the stars are made of patience");
    assert_eq!(rows[0][2], "Love Quotes");
    assert_eq!(rows[1][7], "1234");
    assert_eq!(rows[2][4], "morning light forgives the night");
}

#[tokio::test]
async fn test_page_limit_stops_pagination() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let page1 = listing_page(
        &[quote_div("the stars are made of patience", "A", "", "1 likes")],
        Some("/quotes/tag/love?page=2"),
    );

    // Page 2 would fail the test if it were ever requested
    Mock::given(method("GET"))
        .and(path("/quotes/tag/love"))
        .and(wiremock::matchers::query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/quotes/tag/love"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page1))
        .mount(&server)
        .await;

    let category = test_category(1, "Love Quotes", &server, "/quotes/tag/love");
    let summary = run_pipeline(test_settings(&dir), &[&category], 1).await;

    assert_eq!(summary.categories[0].pages_fetched, 1);
    assert_eq!(summary.total_new(), 1);
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let page = listing_page(
        &[
            quote_div("the stars are made of patience", "A", "", "3 likes"),
            quote_div("rivers remember every stone they pass", "B", "", "4 likes"),
        ],
        None,
    );
    Mock::given(method("GET"))
        .and(path("/quotes/tag/love"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&server)
        .await;

    let category = test_category(1, "Love Quotes", &server, "/quotes/tag/love");

    let first = run_pipeline(test_settings(&dir), &[&category], 0).await;
    assert_eq!(first.total_new(), 2);

    // Unchanged remote, pre-populated sink: nothing new, serials unchanged
    let second = run_pipeline(test_settings(&dir), &[&category], 0).await;
    assert_eq!(second.total_new(), 0);

    let (_, rows) = read_csv(&dir, "Love");
    assert_eq!(rows.len(), 2);
    let serials: Vec<&str> = rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(serials, vec!["1", "2"]);
}

#[tokio::test]
async fn test_cross_category_duplicates_suppressed() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let shared = quote_div("the stars are made of patience", "A", "", "3 likes");
    let unique = quote_div("rivers remember every stone they pass", "B", "", "4 likes");

    Mock::given(method("GET"))
        .and(path("/quotes/tag/love"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[shared.clone()], None)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/quotes/tag/life"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_page(&[shared.clone(), unique.clone()], None)),
        )
        .mount(&server)
        .await;

    let love = test_category(1, "Love Quotes", &server, "/quotes/tag/love");
    let life = test_category(2, "Life Quotes", &server, "/quotes/tag/life");
    let summary = run_pipeline(test_settings(&dir), &[&love, &life], 0).await;

    assert_eq!(summary.categories[0].new_quotes, 1);
    assert_eq!(summary.categories[1].new_quotes, 1);

    let (_, life_rows) = read_csv(&dir, "Life");
    assert_eq!(life_rows.len(), 1);
    assert_eq!(life_rows[0][4], "rivers remember every stone they pass");
    assert_eq!(life_rows[0][0], "1");
}

#[tokio::test]
async fn test_fetch_failure_keeps_partial_results() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let page1 = listing_page(
        &[quote_div("the stars are made of patience", "A", "", "3 likes")],
        Some("/quotes/tag/love?page=2"),
    );
    Mock::given(method("GET"))
        .and(path("/quotes/tag/love"))
        .and(wiremock::matchers::query_param("page", "2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/quotes/tag/love"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page1))
        .mount(&server)
        .await;

    let category = test_category(1, "Love Quotes", &server, "/quotes/tag/love");
    let summary = run_pipeline(test_settings(&dir), &[&category], 0).await;

    let outcome = &summary.categories[0];
    assert!(outcome.fetch_failed);
    assert_eq!(outcome.new_quotes, 1);

    // The page-1 row survived the page-2 failure
    let (_, rows) = read_csv(&dir, "Love");
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn test_seeding_continues_serials_from_existing_csv() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    // Pre-populate the sink: highest SNO is 5, one quote matches the page
    std::fs::write(
        dir.path().join("Love.csv"),
        "SNO,THUMB,CATEGORY,AUTHOR,QUOTE,TRANSLATE,TAGS,LIKES,IMAGE,TOTAL\n\
         4,,Love Quotes,A,an old quote from a prior run,,,1,,29\n\
         5,,Love Quotes,A,the stars are made of patience,,,3,,30\n",
    )
    .unwrap();

    let page = listing_page(
        &[
            quote_div("the stars are made of patience", "A", "", "3 likes"),
            quote_div("rivers remember every stone they pass", "B", "", "4 likes"),
        ],
        None,
    );
    Mock::given(method("GET"))
        .and(path("/quotes/tag/love"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&server)
        .await;

    let category = test_category(1, "Love Quotes", &server, "/quotes/tag/love");
    let summary = run_pipeline(test_settings(&dir), &[&category], 0).await;

    assert_eq!(summary.total_new(), 1);

    let (_, rows) = read_csv(&dir, "Love");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2][0], "6"); // continues past the seeded watermark
    assert_eq!(rows[2][4], "rivers remember every stone they pass");
}

#[tokio::test]
async fn test_mixed_page_admits_exactly_the_novel_quote() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    // Prior state: one persisted quote, last serial 2
    std::fs::write(
        dir.path().join("Love.csv"),
        "SNO,THUMB,CATEGORY,AUTHOR,QUOTE,TRANSLATE,TAGS,LIKES,IMAGE,TOTAL\n\
         2,,Love Quotes,A,the stars are made of patience,,,3,,30\n",
    )
    .unwrap();

    // One too-short container, one duplicate, one novel quote
    let page = listing_page(
        &[
            quote_div("ok", "A", "", "1 likes"),
            quote_div("the stars are made of patience", "A", "", "3 likes"),
            quote_div("rivers remember every stone they pass", "B", "", "1,234 likes"),
        ],
        None,
    );
    Mock::given(method("GET"))
        .and(path("/quotes/tag/love"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&server)
        .await;

    let category = test_category(1, "Love Quotes", &server, "/quotes/tag/love");
    let summary = run_pipeline(test_settings(&dir), &[&category], 1).await;

    assert_eq!(summary.total_new(), 1);

    let (_, rows) = read_csv(&dir, "Love");
    assert_eq!(rows.len(), 2);
    let new_row = &rows[1];
    assert_eq!(new_row[0], "3"); // prior last serial + 1
    assert_eq!(new_row[4], "rivers remember every stone they pass");
    assert_eq!(new_row[7], "1234");
}

#[tokio::test]
async fn test_doubled_label_categories_share_one_file() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/quotes/tag/inspirational"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(
            &[quote_div("the stars are made of patience", "A", "", "1 likes")],
            None,
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/quotes/tag/inspirational-quotes"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(
            &[quote_div("rivers remember every stone they pass", "B", "", "1 likes")],
            None,
        )))
        .mount(&server)
        .await;

    let plain = test_category(3, "Inspirational Quotes", &server, "/quotes/tag/inspirational");
    let doubled = test_category(
        6,
        "Inspirational Quotes Quotes",
        &server,
        "/quotes/tag/inspirational-quotes",
    );
    let summary = run_pipeline(test_settings(&dir), &[&plain, &doubled], 0).await;

    assert_eq!(summary.total_new(), 2);

    // Both categories normalize to the same stem and share a serial space
    let (_, rows) = read_csv(&dir, "Inspirational");
    assert_eq!(rows.len(), 2);
    let serials: Vec<&str> = rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(serials, vec!["1", "2"]);
}
