mod support;

use support::{PageScript, ScriptedApi, page, page_of};
use uuid::Uuid;
use wms_catalog_export::ExportError;
use wms_catalog_export::api::{AccessToken, PageLimits, fetch_all_products};

fn codes(products: &[wms_catalog_export::model::Product]) -> Vec<String> {
    products.iter().map(|product| product.code.to_string()).collect()
}

fn fetch(api: &ScriptedApi, limits: PageLimits) -> wms_catalog_export::api::FetchOutcome {
    fetch_all_products(api, &AccessToken::new("token"), &Uuid::nil(), &limits)
}

#[test]
fn follows_has_next_until_last_page() {
    let api = ScriptedApi::new(vec![
        PageScript::Page(page_of(&["A", "B"], true)),
        PageScript::Page(page_of(&["C"], true)),
        PageScript::Page(page_of(&["D", "E"], false)),
    ]);

    let outcome = fetch(&api, PageLimits::default());

    assert_eq!(api.requested_pages(), vec![1, 2, 3]);
    assert_eq!(codes(&outcome.products), vec!["A", "B", "C", "D", "E"]);
    assert_eq!(outcome.pages_fetched, 3);
    assert!(outcome.error.is_none());
}

#[test]
fn requests_use_configured_page_size() {
    let api = ScriptedApi::new(vec![PageScript::Page(page_of(&["A"], false))]);

    fetch(&api, PageLimits::default());
    fetch(
        &api,
        PageLimits {
            page_size: 25,
            max_pages: 10,
        },
    );

    assert_eq!(*api.requests.borrow(), vec![(1, 500), (1, 25)]);
}

#[test]
fn failed_page_keeps_earlier_products_and_stops() {
    let api = ScriptedApi::new(vec![
        PageScript::Page(page_of(&["A", "B"], true)),
        PageScript::Status(500),
        PageScript::Page(page_of(&["C"], false)),
    ]);

    let outcome = fetch(&api, PageLimits::default());

    assert_eq!(api.requested_pages(), vec![1, 2]);
    assert_eq!(codes(&outcome.products), vec!["A", "B"]);
    assert_eq!(outcome.pages_fetched, 1);
    assert!(matches!(
        outcome.error,
        Some(ExportError::PageRejected {
            page: 2,
            status: 500
        })
    ));
}

#[test]
fn empty_page_ends_pagination_even_with_has_next() {
    let api = ScriptedApi::new(vec![
        PageScript::Page(page_of(&["A"], true)),
        PageScript::Page(page(serde_json::json!({"items": [], "hasNext": true}))),
        PageScript::Page(page_of(&["B"], false)),
    ]);

    let outcome = fetch(&api, PageLimits::default());

    assert_eq!(api.requested_pages(), vec![1, 2]);
    assert_eq!(codes(&outcome.products), vec!["A"]);
    assert!(outcome.error.is_none());
}

#[test]
fn missing_has_next_is_treated_as_last_page() {
    let api = ScriptedApi::new(vec![
        PageScript::Page(page(serde_json::json!({"items": [{"codigo": "A"}]}))),
        PageScript::Page(page_of(&["B"], false)),
    ]);

    let outcome = fetch(&api, PageLimits::default());

    assert_eq!(api.requested_pages(), vec![1]);
    assert_eq!(codes(&outcome.products), vec!["A"]);
}

#[test]
fn page_bound_stops_a_server_that_always_has_more() {
    let api = ScriptedApi::new(vec![
        PageScript::Page(page_of(&["A"], true)),
        PageScript::Page(page_of(&["B"], true)),
        PageScript::Page(page_of(&["C"], true)),
    ]);

    let outcome = fetch(
        &api,
        PageLimits {
            page_size: 500,
            max_pages: 2,
        },
    );

    assert_eq!(api.requested_pages(), vec![1, 2]);
    assert_eq!(codes(&outcome.products), vec!["A", "B"]);
    assert!(matches!(
        outcome.error,
        Some(ExportError::PageLimitReached { max_pages: 2 })
    ));
}

#[test]
fn last_page_at_the_bound_is_not_an_error() {
    let api = ScriptedApi::new(vec![
        PageScript::Page(page_of(&["A"], true)),
        PageScript::Page(page_of(&["B"], false)),
    ]);

    let outcome = fetch(
        &api,
        PageLimits {
            page_size: 500,
            max_pages: 2,
        },
    );

    assert_eq!(codes(&outcome.products), vec!["A", "B"]);
    assert!(outcome.error.is_none());
}

#[test]
fn malformed_entries_do_not_end_pagination() {
    let api = ScriptedApi::new(vec![
        PageScript::Page(page_of(&["A"], true)),
        PageScript::Page(page(serde_json::json!({"items": [null, 7], "hasNext": true}))),
        PageScript::Page(page_of(&["B"], false)),
    ]);

    let outcome = fetch(&api, PageLimits::default());

    assert_eq!(api.requested_pages(), vec![1, 2, 3]);
    assert_eq!(codes(&outcome.products), vec!["A", "B"]);
    assert!(outcome.error.is_none());
}
