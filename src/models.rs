//! Data models for headline listings.
//!
//! This module defines the normalized article shapes handed to the display
//! layer:
//! - [`Article`]: one normalized headline entry
//! - [`ArticleListing`]: one page of articles plus the upstream total count
//!
//! Raw API shapes live in the parser; everything here is already normalized
//! (fallback text applied, placeholder image substituted) and immutable once
//! constructed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single normalized news article.
///
/// Produced by the response parser from a raw API entry. Missing fields have
/// already been replaced with the defined fallbacks, so the display layer
/// never needs to handle absent titles or descriptions.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Article {
    /// The article headline. Never empty; `"Untitled News"` when the source
    /// omitted one.
    pub title: String,
    /// Short description or summary. Never empty; `"No description
    /// available."` when the source omitted one.
    pub description: String,
    /// URL of the article image, or the fixed placeholder when absent.
    pub image_url: String,
    /// Link to the full story, or an inert `"#"` anchor when absent.
    pub source_url: String,
    /// Publication timestamp, when the source supplied a parseable one.
    pub published_at: Option<DateTime<Utc>>,
}

/// One page of article results plus the total count claimed by upstream.
///
/// `total_results` is the API's claim of total matches across all pages. It
/// is independent of `articles.len()`: a page may be shorter than the
/// requested page size even when more pages remain.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArticleListing {
    /// Articles on this page, in upstream order.
    pub articles: Vec<Article>,
    /// Total matches claimed by the API across all pages.
    pub total_results: u64,
}
