//! Image upload route.
//!
//! Accepts a multipart image and forwards it to the external barcode
//! recognition service. The recognition adapter is lenient, so the only
//! failure signal from it is `None`, which this route reports as 404.

use axum::{
    Json,
    extract::{Multipart, State},
};

use crate::error::{AppError, Result};
use crate::services::barcode::ScanResult;
use crate::state::AppState;

/// Scan an uploaded image for a comic barcode.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScanResult>> {
    let mut image: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("image") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read image: {e}")))?;
            image = Some(bytes.to_vec());
            break;
        }
    }

    let image = image.ok_or_else(|| AppError::Validation("Image file required".to_string()))?;

    let scan = state
        .barcode()
        .scan(image)
        .await
        .ok_or_else(|| AppError::NotFound("No barcode detected".to_string()))?;

    Ok(Json(scan))
}
