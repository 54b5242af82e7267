//! Integration tests for Longbox.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply migrations
//! cargo run -p longbox-cli -- migrate
//!
//! # Start the server
//! cargo run -p longbox-server
//!
//! # Run integration tests
//! cargo test -p longbox-integration-tests -- --ignored
//! ```
//!
//! The server under test is located via `LONGBOX_BASE_URL`
//! (default `http://localhost:3001`).

use reqwest::Client;
use serde_json::{Value, json};

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("LONGBOX_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Plain HTTP client; authentication travels as a bearer header per request.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// Unique email per test run so signups never collide.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{prefix}-{nanos}@example.com")
}

/// Sign up a fresh account and return its bearer token.
///
/// # Panics
///
/// Panics if the server is unreachable or signup does not return a token.
pub async fn signup(client: &Client, email: &str, password: &str) -> String {
    let resp = client
        .post(format!("{}/api/auth/signup", base_url()))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to sign up");

    assert!(
        resp.status().is_success(),
        "Signup failed with status {}",
        resp.status()
    );

    let body: Value = resp.json().await.expect("Failed to parse signup response");
    body.get("token")
        .and_then(Value::as_str)
        .expect("Signup response missing token")
        .to_string()
}
