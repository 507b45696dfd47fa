//! Request construction for the top-headlines endpoint.
//!
//! A pure translation of `(filters, page, page_size, credential)` into a
//! fully-formed request URL. The credential is checked here, before any
//! network activity, so a missing API key surfaces as a configuration
//! failure rather than a transport one.
//!
//! # Query parameters
//!
//! Exactly five are emitted, nothing else:
//! `country`, `category`, `pageSize`, `page`, `apiKey`.

use url::Url;

use crate::error::Error;
use crate::filters::FilterState;

/// Production top-headlines endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://newsapi.org/v2/top-headlines";

/// Page size used when the caller does not choose one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Upstream cap on articles per page.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Build the request URL for one page of headlines.
///
/// # Errors
///
/// - [`Error::Configuration`] when `credential` is empty (checked first).
/// - [`Error::Validation`] when `page` is 0 or `page_size` is outside
///   `1..=MAX_PAGE_SIZE`.
pub fn build_request(
    endpoint: &Url,
    filters: &FilterState,
    page: u32,
    page_size: u32,
    credential: &str,
) -> Result<Url, Error> {
    if credential.trim().is_empty() {
        return Err(Error::Configuration(
            "API key is missing; set NEWS_API_KEY or pass --api-key".into(),
        ));
    }
    if page < 1 {
        return Err(Error::Validation("page must be at least 1".into()));
    }
    if page_size < 1 || page_size > MAX_PAGE_SIZE {
        return Err(Error::Validation(format!(
            "pageSize must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
        )));
    }

    let mut url = endpoint.clone();
    url.query_pairs_mut()
        .clear()
        .append_pair("country", filters.country())
        .append_pair("category", filters.category().as_str())
        .append_pair("pageSize", &page_size.to_string())
        .append_pair("page", &page.to_string())
        .append_pair("apiKey", credential);
    Ok(url)
}
