//! CSV export and import for collections.
//!
//! The export format is a leading instructional comment line, a fixed
//! 11-column header, then one row per comic sorted by (series, issue),
//! with RFC-4180-style field escaping. `parse` accepts the same format
//! back, so an exported file can be re-imported as-is.

use crate::models::{Comic, ComicRecord};

/// Instructional comment emitted as the first line of every export.
const COMMENT_LINE: &str =
    "# This file can be imported to restore your collection. Do not edit the header row.";

/// Fixed column header.
const HEADER: &str = "UPC,Name,Series,Volume,Year,Issue,Printing,Variant,Starred,Cover Image,Added";

/// Render a collection as CSV, sorted by (series name, issue number).
#[must_use]
pub fn render(comics: &[Comic]) -> String {
    let mut sorted: Vec<&Comic> = comics.iter().collect();
    sorted.sort_by(|a, b| {
        (a.series_name.as_deref(), a.issue_number.as_deref())
            .cmp(&(b.series_name.as_deref(), b.issue_number.as_deref()))
    });

    let mut out = String::new();
    out.push_str(COMMENT_LINE);
    out.push('\n');
    out.push_str(HEADER);
    out.push('\n');

    for comic in sorted {
        let fields = [
            comic.upc.clone(),
            comic.name.clone().unwrap_or_default(),
            comic.series_name.clone().unwrap_or_default(),
            comic.series_volume.map(|v| v.to_string()).unwrap_or_default(),
            comic.series_year.map(|y| y.to_string()).unwrap_or_default(),
            comic.issue_number.clone().unwrap_or_default(),
            comic.printing.clone().unwrap_or_default(),
            comic.variant_number.clone().unwrap_or_default(),
            comic.starred.to_string(),
            comic.cover_image.clone().unwrap_or_default(),
            comic.added_at.to_rfc3339(),
        ];

        let row: Vec<String> = fields.iter().map(|f| escape(f)).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

/// Parse an exported CSV back into comic records.
///
/// Comment lines and the header are skipped; short rows are padded with
/// empty fields. The `Added` column is ignored: `added_at` is assigned
/// fresh on insert and never imported.
#[must_use]
pub fn parse(input: &str) -> Vec<ComicRecord> {
    rows(input)
        .into_iter()
        .filter(|row| {
            // Skip the header and comment rows
            !matches!(row.first().map(String::as_str), Some("UPC") | None)
                && !row
                    .first()
                    .is_some_and(|f| f.starts_with('#'))
        })
        .map(|mut row| {
            row.resize(11, String::new());
            ComicRecord {
                upc: non_empty(&row[0]),
                name: non_empty(&row[1]),
                series_name: non_empty(&row[2]),
                series_volume: row[3].parse().ok(),
                series_year: row[4].parse().ok(),
                issue_number: non_empty(&row[5]),
                printing: non_empty(&row[6]),
                variant_number: non_empty(&row[7]),
                starred: match row[8].as_str() {
                    "true" => Some(true),
                    "false" => Some(false),
                    _ => None,
                },
                cover_image: non_empty(&row[9]),
            }
        })
        .collect()
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_owned())
    }
}

/// Escape one field: quote-wrap on comma/quote/newline, double internal quotes.
fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

/// Split CSV text into rows of unescaped fields.
///
/// Quoted fields may contain commas, doubled quotes, and newlines.
fn rows(input: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => row.push(std::mem::take(&mut field)),
                '\r' => {}
                '\n' => {
                    row.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut row));
                }
                _ => field.push(c),
            }
        }
    }

    // Final row without trailing newline
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows.retain(|r| !(r.len() == 1 && r[0].is_empty()));
    rows
}
