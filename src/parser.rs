//! Response validation and normalization.
//!
//! Turns a raw top-headlines body into an [`ArticleListing`], or a
//! [`Error::MalformedResponse`] when the top-level shape is wrong (for
//! example the upstream error envelope `{"status":"error",...}` instead of
//! a listing). A legitimate empty page — `articles: []` with
//! `totalResults: 0` — is success, not an error.
//!
//! Per-article normalization is lenient: missing or empty fields get the
//! defined fallbacks, and a single unparseable timestamp never fails the
//! page. Parsing is pure and idempotent.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::Error;
use crate::models::{Article, ArticleListing};

/// Fallback headline for articles the source left untitled.
pub const FALLBACK_TITLE: &str = "Untitled News";

/// Fallback body text for articles without a description.
pub const FALLBACK_DESCRIPTION: &str = "No description available.";

/// Placeholder shown when the source supplies no image.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://via.placeholder.com/150?text=No+Image+Available";

/// Inert link target for articles without a story URL.
pub const INERT_ANCHOR: &str = "#";

/// Raw listing as the API serializes it. Field names follow the upstream
/// JSON schema, hence camelCase renames.
#[derive(Debug, Deserialize)]
struct RawListing {
    articles: Vec<RawArticle>,
    #[serde(rename = "totalResults")]
    total_results: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    url_to_image: Option<String>,
    published_at: Option<String>,
}

/// Parse and normalize one page of headlines.
///
/// # Errors
///
/// [`Error::MalformedResponse`] when the body is not an object containing
/// an `articles` collection and a `totalResults` integer.
pub fn parse_listing(body: &str) -> Result<ArticleListing, Error> {
    let raw: RawListing = serde_json::from_str(body)
        .map_err(|e| Error::MalformedResponse(format!("expected article listing: {e}")))?;

    let articles = raw.articles.into_iter().map(normalize_article).collect();
    Ok(ArticleListing {
        articles,
        total_results: raw.total_results,
    })
}

fn normalize_article(raw: RawArticle) -> Article {
    Article {
        title: text_or(raw.title, FALLBACK_TITLE),
        description: text_or(raw.description, FALLBACK_DESCRIPTION),
        image_url: text_or(raw.url_to_image, PLACEHOLDER_IMAGE_URL),
        source_url: text_or(raw.url, INERT_ANCHOR),
        published_at: raw.published_at.as_deref().and_then(parse_timestamp),
    }
}

/// Treat absent and blank values the same way the display layer would: as
/// missing, replaced by the fallback.
fn text_or(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(s) if !s.trim().is_empty() => s,
        _ => fallback.to_string(),
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
