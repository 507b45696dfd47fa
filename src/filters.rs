//! Country and category filters for headline requests.
//!
//! The upstream API accepts a fixed set of topic categories and a two-letter
//! country code. Both are validated here before any fetch state is touched:
//! a rejected mutation leaves the current filters (and the current page)
//! exactly as they were.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The fixed set of topic categories the upstream API understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    Business,
    Entertainment,
    Health,
    Science,
    Sports,
    Technology,
}

impl Category {
    /// All selectable categories, in display order.
    pub const ALL: [Category; 7] = [
        Category::General,
        Category::Business,
        Category::Entertainment,
        Category::Health,
        Category::Science,
        Category::Sports,
        Category::Technology,
    ];

    /// The lowercase form used in query parameters and route segments.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Business => "business",
            Category::Entertainment => "entertainment",
            Category::Health => "health",
            Category::Science => "science",
            Category::Sports => "sports",
            Category::Technology => "technology",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "general" => Ok(Category::General),
            "business" => Ok(Category::Business),
            "entertainment" => Ok(Category::Entertainment),
            "health" => Ok(Category::Health),
            "science" => Ok(Category::Science),
            "sports" => Ok(Category::Sports),
            "technology" => Ok(Category::Technology),
            other => Err(Error::Validation(format!(
                "unknown category '{other}' (expected one of: general, business, \
                 entertainment, health, science, sports, technology)"
            ))),
        }
    }
}

/// The current country/category selection.
///
/// Mutated only through the validated setters; invalid input is rejected
/// with [`Error::Validation`] and leaves the state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    country: String,
    category: Category,
}

impl Default for FilterState {
    /// Initial selection: United States, general news.
    fn default() -> Self {
        FilterState {
            country: "us".to_string(),
            category: Category::General,
        }
    }
}

impl FilterState {
    /// Build a filter state from raw user input, validating both fields.
    pub fn new(country: &str, category: &str) -> Result<Self, Error> {
        Ok(FilterState {
            country: validate_country(country)?,
            category: category.parse()?,
        })
    }

    /// The two-letter country code, lowercase.
    pub fn country(&self) -> &str {
        &self.country
    }

    /// The selected topic category.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Replace the country code. Rejects anything that is not exactly two
    /// ASCII letters; the stored code is lowercased.
    pub fn set_country(&mut self, code: &str) -> Result<(), Error> {
        self.country = validate_country(code)?;
        Ok(())
    }

    /// Replace the category. Rejects names outside the fixed set.
    pub fn set_category(&mut self, name: &str) -> Result<(), Error> {
        self.category = name.parse()?;
        Ok(())
    }
}

fn validate_country(code: &str) -> Result<String, Error> {
    let code = code.trim();
    if code.is_empty() {
        return Err(Error::Validation("country code must not be empty".into()));
    }
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(Error::Validation(format!(
            "country code '{code}' must be exactly two ASCII letters"
        )));
    }
    Ok(code.to_ascii_lowercase())
}
