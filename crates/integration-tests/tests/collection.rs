//! Integration tests for collection management.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p longbox-server)
//!
//! Run with: cargo test -p longbox-integration-tests -- --ignored
//!
//! Each test signs up a fresh account, so collections never interfere.

use longbox_integration_tests::{base_url, client, signup, unique_email};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

/// A syntactically valid 17-digit UPC with a distinguishing suffix.
fn test_upc(suffix: u32) -> String {
    format!("759606202003{suffix:05}")
}

/// Test helper: add a comic with minimal metadata.
async fn add_comic(client: &Client, token: &str, upc: &str, series: &str) {
    let resp = client
        .post(format!("{}/api/collection", base_url()))
        .bearer_auth(token)
        .json(&json!({
            "upc": upc,
            "name": "Test Issue",
            "seriesName": series,
            "issueNumber": "1",
        }))
        .send()
        .await
        .expect("Failed to add comic");

    assert_eq!(resp.status(), StatusCode::OK);
}

/// Test helper: fetch the collection as a JSON array.
async fn get_collection(client: &Client, token: &str) -> Vec<Value> {
    let resp = client
        .get(format!("{}/api/collection", base_url()))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to get collection");

    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("Failed to parse collection")
}

// ============================================================================
// Add & List Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_add_and_list() {
    let client = client();
    let token = signup(&client, &unique_email("add"), "hunter22").await;

    add_comic(&client, &token, &test_upc(1), "Amazing Spider-Man").await;

    let comics = get_collection(&client, &token).await;
    assert_eq!(comics.len(), 1);
    assert_eq!(
        comics[0].get("upc").and_then(Value::as_str),
        Some(test_upc(1).as_str())
    );
    assert_eq!(comics[0].get("starred").and_then(Value::as_bool), Some(false));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_add_duplicate_is_noop() {
    let client = client();
    let token = signup(&client, &unique_email("dup"), "hunter22").await;

    add_comic(&client, &token, &test_upc(2), "First Add").await;
    add_comic(&client, &token, &test_upc(2), "Second Add").await;

    let comics = get_collection(&client, &token).await;
    assert_eq!(comics.len(), 1);
    // First write wins; duplicate adds never overwrite
    assert_eq!(
        comics[0].get("seriesName").and_then(Value::as_str),
        Some("First Add")
    );
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_add_without_upc_rejected() {
    let client = client();
    let token = signup(&client, &unique_email("noupc"), "hunter22").await;

    let resp = client
        .post(format!("{}/api/collection", base_url()))
        .bearer_auth(&token)
        .json(&json!({ "name": "No UPC here" }))
        .send()
        .await
        .expect("Failed to send add");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Star & Reorder Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_star_moves_comic_first() {
    let client = client();
    let token = signup(&client, &unique_email("star"), "hunter22").await;

    add_comic(&client, &token, &test_upc(10), "Series A").await;
    add_comic(&client, &token, &test_upc(11), "Series B").await;

    let resp = client
        .patch(format!("{}/api/collection/{}/star", base_url(), test_upc(11)))
        .bearer_auth(&token)
        .json(&json!({ "starred": true }))
        .send()
        .await
        .expect("Failed to star comic");

    assert_eq!(resp.status(), StatusCode::OK);

    let comics = get_collection(&client, &token).await;
    assert_eq!(
        comics[0].get("upc").and_then(Value::as_str),
        Some(test_upc(11).as_str())
    );
    assert_eq!(comics[0].get("starred").and_then(Value::as_bool), Some(true));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_star_unknown_upc_is_404() {
    let client = client();
    let token = signup(&client, &unique_email("star404"), "hunter22").await;

    let resp = client
        .patch(format!("{}/api/collection/{}/star", base_url(), test_upc(99)))
        .bearer_auth(&token)
        .json(&json!({ "starred": true }))
        .send()
        .await
        .expect("Failed to send star");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(
        body.get("error").and_then(Value::as_str),
        Some("Comic not found")
    );
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_reorder_applies_new_order() {
    let client = client();
    let token = signup(&client, &unique_email("reorder"), "hunter22").await;

    add_comic(&client, &token, &test_upc(20), "Series A").await;
    add_comic(&client, &token, &test_upc(21), "Series B").await;

    let resp = client
        .put(format!("{}/api/collection/reorder", base_url()))
        .bearer_auth(&token)
        .json(&json!([
            { "upc": test_upc(21), "sortOrder": 0 },
            { "upc": test_upc(20), "sortOrder": 1 },
        ]))
        .send()
        .await
        .expect("Failed to reorder");

    assert_eq!(resp.status(), StatusCode::OK);

    let comics = get_collection(&client, &token).await;
    assert_eq!(
        comics[0].get("upc").and_then(Value::as_str),
        Some(test_upc(21).as_str())
    );
    assert_eq!(
        comics[1].get("upc").and_then(Value::as_str),
        Some(test_upc(20).as_str())
    );
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_reorder_with_unknown_upc_rolls_back() {
    let client = client();
    let token = signup(&client, &unique_email("rollback"), "hunter22").await;

    add_comic(&client, &token, &test_upc(25), "Series A").await;
    add_comic(&client, &token, &test_upc(26), "Series B").await;

    let before = get_collection(&client, &token).await;

    // Second entry names a UPC not in the collection: the whole batch fails
    let resp = client
        .put(format!("{}/api/collection/reorder", base_url()))
        .bearer_auth(&token)
        .json(&json!([
            { "upc": test_upc(26), "sortOrder": 0 },
            { "upc": test_upc(99), "sortOrder": 1 },
        ]))
        .send()
        .await
        .expect("Failed to reorder");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // The first entry's update must not be visible either
    let after = get_collection(&client, &token).await;
    let order = |comics: &[Value]| -> Vec<String> {
        comics
            .iter()
            .filter_map(|c| c.get("upc").and_then(Value::as_str))
            .map(str::to_owned)
            .collect()
    };
    assert_eq!(order(&after), order(&before));
}

// ============================================================================
// Export & Import Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_export_csv_headers_and_content() {
    let client = client();
    let token = signup(&client, &unique_email("export"), "hunter22").await;

    add_comic(&client, &token, &test_upc(30), "Exported Series").await;

    let resp = client
        .get(format!("{}/api/collection/export", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to export");

    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/csv"));

    let body = resp.text().await.expect("Failed to read CSV");
    assert!(body.starts_with('#'));
    assert!(body.contains("UPC,Name,Series"));
    assert!(body.contains("Exported Series"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_import_counts_imported_and_skipped() {
    let client = client();
    let token = signup(&client, &unique_email("import"), "hunter22").await;

    add_comic(&client, &token, &test_upc(40), "Already There").await;

    let resp = client
        .post(format!("{}/api/collection/import", base_url()))
        .bearer_auth(&token)
        .json(&json!([
            { "upc": test_upc(40), "seriesName": "Duplicate" },
            { "upc": test_upc(41), "seriesName": "Fresh" },
            { "seriesName": "No UPC, silently dropped" },
        ]))
        .send()
        .await
        .expect("Failed to import");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body.get("imported").and_then(Value::as_u64), Some(1));
    assert_eq!(body.get("skipped").and_then(Value::as_u64), Some(1));

    let comics = get_collection(&client, &token).await;
    assert_eq!(comics.len(), 2);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_export_reimports_into_fresh_account() {
    let client = client();
    let exporter = signup(&client, &unique_email("csvout"), "hunter22").await;

    add_comic(&client, &exporter, &test_upc(45), "Saga").await;
    add_comic(&client, &exporter, &test_upc(46), "Monstress").await;

    let csv = client
        .get(format!("{}/api/collection/export", base_url()))
        .bearer_auth(&exporter)
        .send()
        .await
        .expect("Failed to export")
        .text()
        .await
        .expect("Failed to read CSV");

    // Post the exported file unchanged into a brand new account
    let importer = signup(&client, &unique_email("csvin"), "hunter22").await;
    let resp = client
        .post(format!("{}/api/collection/import", base_url()))
        .bearer_auth(&importer)
        .header("content-type", "text/csv")
        .body(csv)
        .send()
        .await
        .expect("Failed to import CSV");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body.get("imported").and_then(Value::as_u64), Some(2));
    assert_eq!(body.get("skipped").and_then(Value::as_u64), Some(0));

    assert_eq!(get_collection(&client, &importer).await.len(), 2);
}

// ============================================================================
// Delete Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_delete_one_and_all() {
    let client = client();
    let token = signup(&client, &unique_email("delete"), "hunter22").await;

    add_comic(&client, &token, &test_upc(50), "Series A").await;
    add_comic(&client, &token, &test_upc(51), "Series B").await;

    let resp = client
        .delete(format!("{}/api/collection/{}", base_url(), test_upc(50)))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to delete comic");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(get_collection(&client, &token).await.len(), 1);

    // Deleting an absent UPC still reports success
    let resp = client
        .delete(format!("{}/api/collection/{}", base_url(), test_upc(50)))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to delete comic");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .delete(format!("{}/api/collection", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to clear collection");

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(get_collection(&client, &token).await.is_empty());
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_collection_requires_auth() {
    let client = client();

    let resp = client
        .get(format!("{}/api/collection", base_url()))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
