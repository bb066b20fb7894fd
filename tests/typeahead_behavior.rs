//! Behavior-driven tests for the typeahead
//!
//! These tests drive the widget the way a page does (keystrokes, clicks,
//! submit) and check what the user would see.

use std::sync::Arc;
use std::time::Duration;

use tickerlens_core::{
    http_client::{HttpResponse, StaticHttpClient},
    DirectoryLoader, DirectoryLocation, HttpApiSource, LookupWidget, SuggestionEngine, SymbolIndex,
    WidgetConfig,
};

const BASE: &str = "https://lens.example.test";

const DIRECTORY: &str = r#"{
    "0": {"cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc."},
    "1": {"cik_str": 1018724, "ticker": "AMZN", "title": "AMAZON COM INC"},
    "2": {"cik_str": 1418121, "ticker": "APLE", "title": "Apple Hospitality REIT, Inc."},
    "3": {"cik_str": 789019, "ticker": "MSFT", "title": "MICROSOFT CORP"},
    "4": {"cik_str": 1652044, "ticker": "GOOGL", "title": "Alphabet Inc."}
}"#;

fn index() -> Arc<SymbolIndex> {
    let records = SymbolIndex::parse_directory(DIRECTORY).expect("fixture directory is valid");
    Arc::new(SymbolIndex::new(records))
}

fn panel_client() -> StaticHttpClient {
    StaticHttpClient::new()
        .route(format!("{BASE}/api/sec"), HttpResponse::ok_json(r#"{"filings":[]}"#))
        .route(format!("{BASE}/api/news"), HttpResponse::ok_json(r#"{"news":[]}"#))
}

fn widget() -> LookupWidget {
    let source = HttpApiSource::new(Arc::new(panel_client()), BASE);
    LookupWidget::new(index(), Arc::new(source), &WidgetConfig::default())
}

// =============================================================================
// Typeahead: Matching
// =============================================================================

#[test]
fn when_user_types_a_name_prefix_matching_companies_are_suggested_in_directory_order() {
    // Given: The directory fixture
    let engine = SuggestionEngine::new(index());

    // When: The user types "apple" in lower case
    let list = engine.suggest("apple");

    // Then: Both Apple companies appear, in directory order
    assert_eq!(
        list.labels(),
        vec!["AAPL — Apple Inc.", "APLE — Apple Hospitality REIT, Inc."]
    );
}

#[test]
fn when_user_types_a_symbol_prefix_every_result_matches_the_prefix() {
    // Given: The directory fixture
    let engine = SuggestionEngine::new(index());

    // When: The user types "a"
    let list = engine.suggest("a");

    // Then: Every suggestion starts with "A" by symbol or by name
    assert!(!list.is_empty());
    assert!(list.len() <= 10);
    for record in list.records() {
        assert!(
            record.symbol.as_str().starts_with('A') || record.name.to_uppercase().starts_with('A'),
            "{record:?} does not match"
        );
    }
}

#[tokio::test]
async fn when_directory_is_unreachable_suggestions_stay_empty() {
    // Given: A directory URL that answers 404
    let loader = DirectoryLoader::new(Arc::new(StaticHttpClient::new()));
    let index = loader
        .load_or_empty(&DirectoryLocation::Url(format!(
            "{BASE}/static/data/company_tickers.json"
        )))
        .await;

    // When: The user types anything
    let list = SuggestionEngine::new(Arc::new(index)).suggest("AAPL");

    // Then: No suggestions, no error
    assert!(list.is_empty());
}

// =============================================================================
// Typeahead: Debounce
// =============================================================================

#[tokio::test(start_paused = true)]
async fn when_user_types_quickly_suggestions_reflect_only_the_final_input() {
    // Given: A widget with the default 150 ms window
    let mut widget = widget();

    // When: Three keystrokes land 50 ms apart, then the user pauses
    widget.input("m");
    tokio::time::sleep(Duration::from_millis(50)).await;
    widget.input("ms");
    tokio::time::sleep(Duration::from_millis(50)).await;
    widget.input("msf");
    assert!(!widget.view().suggestions_open, "nothing shows before the pause");
    tokio::time::sleep(Duration::from_millis(200)).await;

    // Then: The list matches the last input only
    let view = widget.view();
    assert!(view.suggestions_open);
    assert_eq!(view.suggestions, vec!["MSFT — MICROSOFT CORP"]);
}

#[tokio::test(start_paused = true)]
async fn when_input_is_cleared_the_suggestion_panel_hides() {
    // Given: An open suggestion panel
    let mut widget = widget();
    widget.input("goo");
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(widget.view().suggestions_open);

    // When: The user deletes the text
    widget.input("");
    tokio::time::sleep(Duration::from_millis(200)).await;

    // Then: The panel is hidden
    let view = widget.view();
    assert!(!view.suggestions_open);
    assert!(view.suggestions.is_empty());
}

// =============================================================================
// Typeahead: Commit
// =============================================================================

#[tokio::test]
async fn when_user_clicks_a_suggestion_the_search_commits_that_symbol() {
    // Given: Suggestions for "apple"
    let mut widget = widget();
    widget.input("apple");
    widget.suggest_now();

    // When: The user clicks the second suggestion
    let run = widget.select(1).expect("second suggestion exists");
    run.await.expect("run completes");

    // Then: The identity line names the clicked company and the panel is closed
    let view = widget.view();
    assert_eq!(
        view.identity.as_deref(),
        Some("Apple Hospitality REIT, Inc. (APLE)")
    );
    assert!(!view.suggestions_open);
}

#[tokio::test]
async fn when_user_submits_free_text_the_raw_uppercased_query_is_searched() {
    // Given: A symbol that is not in the directory
    let mut widget = widget();
    widget.input("  brk-b ");

    // When: The user submits the form
    let run = widget.submit().expect("non-blank input commits");
    run.await.expect("run completes");

    // Then: The raw query is echoed and the chart is bound to it
    let view = widget.view();
    assert_eq!(view.identity.as_deref(), Some("BRK-B"));
    assert_eq!(
        view.chart.map(|chart| chart.config.symbol),
        Some(String::from("BRK-B"))
    );
}

#[tokio::test]
async fn when_user_clicks_outside_the_panel_closes_without_searching() {
    // Given: Open suggestions
    let mut widget = widget();
    widget.input("ms");
    widget.suggest_now();

    // When: The user clicks elsewhere on the page
    widget.click_outside();

    // Then: Nothing was committed
    let view = widget.view();
    assert!(!view.suggestions_open);
    assert!(!view.search_active);
    assert_eq!(view.input, "ms");
}
