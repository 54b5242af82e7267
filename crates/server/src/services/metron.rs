//! Metron comic catalog client.
//!
//! Resolves a validated UPC to comic metadata via the Metron REST API.
//! This adapter is strict: any upstream failure propagates as an error the
//! route maps to a 500. Contrast with [`super::barcode`], which is lenient
//! by design.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

use longbox_core::Upc;

use crate::config::MetronConfig;
use crate::models::ComicMetadata;

/// Metron API base URL.
const BASE_URL: &str = "https://metron.cloud/api";

/// Errors that can occur when querying the Metron catalog.
#[derive(Debug, Error)]
pub enum MetronError {
    /// HTTP request failed (unreachable host, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("Metron API error: {status}")]
    Api { status: u16 },

    /// Failed to parse the response body.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Metron catalog API client.
#[derive(Clone)]
pub struct MetronClient {
    client: reqwest::Client,
    base_url: String,
    username: String,
    password: SecretString,
}

impl MetronClient {
    /// Create a new Metron client from configuration.
    #[must_use]
    pub fn new(config: &MetronConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: BASE_URL.to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }

    /// Override the base URL (tests point this at a local mock).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Look up an issue by UPC.
    ///
    /// Returns `Ok(None)` when the catalog has no issue for this code.
    ///
    /// # Errors
    ///
    /// Returns `MetronError::Api` for a non-success response and
    /// `MetronError::Http` for transport failures.
    pub async fn search_by_upc(&self, upc: &Upc) -> Result<Option<ComicMetadata>, MetronError> {
        let url = format!("{}/issue/?upc={}", self.base_url, upc.as_str());

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MetronError::Api {
                status: status.as_u16(),
            });
        }

        let list: IssueListResponse = response
            .json()
            .await
            .map_err(|e| MetronError::Parse(e.to_string()))?;

        if list.count == 0 {
            return Ok(None);
        }

        let issue = list
            .results
            .into_iter()
            .next()
            .ok_or_else(|| MetronError::Parse("non-zero count with empty results".to_string()))?;

        Ok(Some(ComicMetadata::new(
            upc,
            issue.issue,
            issue.number,
            issue.series.name,
            issue.series.volume,
            issue.series.year_began,
            issue.image,
        )))
    }
}

/// Paginated issue list from `/api/issue/`.
#[derive(Debug, Deserialize)]
struct IssueListResponse {
    count: i64,
    results: Vec<IssueResult>,
}

/// One issue result; Metron returns more fields than we map.
#[derive(Debug, Deserialize)]
struct IssueResult {
    series: SeriesResult,
    /// Issue number within the series, e.g. "1".
    number: String,
    /// Full issue name, e.g. "The Amazing Spider-Man (2022) #1".
    issue: String,
    image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SeriesResult {
    name: String,
    volume: i32,
    year_began: i32,
}
