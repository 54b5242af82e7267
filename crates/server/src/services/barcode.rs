//! Barcode recognition service client.
//!
//! Forwards an uploaded image to the external recognition service and
//! returns the extracted UPC. This adapter is deliberately lenient: any
//! failure (non-success status, timeout, unreachable host) is logged and
//! collapsed to `None`, so callers treat "nothing detected" and "service
//! down" the same way. Do not unify this with the strict Metron adapter;
//! scan flows depend on `None` being the only failure signal.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

/// Upload timeout; the in-flight request is aborted after this.
const SCAN_TIMEOUT: Duration = Duration::from_secs(15);

/// A successful scan result from the recognition service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// The extracted UPC, unvalidated (callers run it through `Upc::parse`).
    pub upc: String,
    /// Image-format hint reported by the service, e.g. "jpg".
    #[serde(default)]
    pub extension: Option<String>,
}

/// Barcode recognition service client.
#[derive(Clone)]
pub struct BarcodeClient {
    client: reqwest::Client,
    base_url: String,
}

impl BarcodeClient {
    /// Create a new client for the recognition service at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Send image bytes to the recognition service.
    ///
    /// Returns `None` when no barcode was detected or the service could
    /// not be reached; errors never propagate from here.
    pub async fn scan(&self, image: Vec<u8>) -> Option<ScanResult> {
        let part = Part::bytes(image)
            .file_name("image.jpg")
            .mime_str("image/jpeg")
            .ok()?;
        let form = Form::new().part("image", part);

        let response = self
            .client
            .post(format!("{}/scan", self.base_url))
            .timeout(SCAN_TIMEOUT)
            .multipart(form)
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "barcode service unreachable");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "barcode service returned error");
            return None;
        }

        match response.json::<ScanResult>().await {
            Ok(result) => {
                tracing::info!(upc = %result.upc, "barcode scanned");
                Some(result)
            }
            Err(e) => {
                tracing::warn!(error = %e, "barcode service returned invalid body");
                None
            }
        }
    }
}
