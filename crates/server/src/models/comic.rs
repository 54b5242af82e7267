//! Comic domain types.
//!
//! Three shapes for the same underlying record:
//!
//! - [`ComicMetadata`] - a catalog lookup result, always fully populated
//! - [`Comic`] - a stored row from `user_comics`; most fields are nullable
//!   because add/import accept partial records
//! - [`ComicRecord`] - a client-supplied record for add/import; everything
//!   except the UPC is optional

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use longbox_core::Upc;

/// Comic metadata resolved from the catalog for a validated UPC.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComicMetadata {
    pub upc: String,
    /// Full issue name, e.g. "The Amazing Spider-Man (2022) #1".
    pub name: String,
    pub issue_number: String,
    pub series_name: String,
    pub series_volume: i32,
    pub series_year: i32,
    pub cover_image: Option<String>,
    /// Printing, from the 17th UPC digit.
    pub printing: String,
    /// Variant number, from the 16th UPC digit.
    pub variant_number: String,
}

/// A comic saved in a user's collection.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comic {
    pub upc: String,
    pub name: Option<String>,
    pub issue_number: Option<String>,
    pub series_name: Option<String>,
    pub series_volume: Option<i32>,
    pub series_year: Option<i32>,
    pub cover_image: Option<String>,
    pub printing: Option<String>,
    pub variant_number: Option<String>,
    pub starred: bool,
    pub sort_order: i32,
    pub added_at: DateTime<Utc>,
}

/// A client-supplied comic record for add and import.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ComicRecord {
    pub upc: Option<String>,
    pub name: Option<String>,
    pub issue_number: Option<String>,
    pub series_name: Option<String>,
    pub series_volume: Option<i32>,
    pub series_year: Option<i32>,
    pub cover_image: Option<String>,
    pub printing: Option<String>,
    pub variant_number: Option<String>,
    pub starred: Option<bool>,
}

impl ComicRecord {
    /// The record's UPC, if present and non-empty.
    #[must_use]
    pub fn upc(&self) -> Option<&str> {
        self.upc.as_deref().filter(|s| !s.is_empty())
    }
}

impl ComicMetadata {
    /// Build metadata for a validated UPC, deriving the variant and
    /// printing digits from the code itself.
    #[must_use]
    pub fn new(
        upc: &Upc,
        name: String,
        issue_number: String,
        series_name: String,
        series_volume: i32,
        series_year: i32,
        cover_image: Option<String>,
    ) -> Self {
        Self {
            upc: upc.as_str().to_owned(),
            name,
            issue_number,
            series_name,
            series_volume,
            series_year,
            cover_image,
            printing: upc.printing().to_string(),
            variant_number: upc.variant_number().to_string(),
        }
    }
}
