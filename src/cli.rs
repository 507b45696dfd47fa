//! Command-line interface definitions for the headlines reader.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The API key can be provided via flag or the `NEWS_API_KEY` environment
//! variable; its absence is reported as a configuration failure at fetch
//! time, never silently replaced by a built-in key.

use clap::Parser;

/// Command-line arguments for the headlines reader.
///
/// # Examples
///
/// ```sh
/// # Front page: US general headlines
/// know_headlines
///
/// # UK sports, second page, 20 per page
/// know_headlines --country gb --category sports --page 2 --page-size 20
///
/// # Walk three pages forward from the starting page
/// know_headlines --pages 3
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Two-letter country code to filter by
    #[arg(short = 'c', long, default_value = "us")]
    pub country: String,

    /// Topic category: general, business, entertainment, health, science,
    /// sports, or technology
    #[arg(short = 't', long, default_value = "general")]
    pub category: String,

    /// Page to start from (1-based)
    #[arg(short, long, default_value_t = 1)]
    pub page: u32,

    /// Articles per page (1-100)
    #[arg(long, default_value_t = 10)]
    pub page_size: u32,

    /// Number of consecutive pages to display, advancing until the last
    /// page is reached
    #[arg(long, default_value_t = 1)]
    pub pages: u32,

    /// API key for the headlines service
    #[arg(long, env = "NEWS_API_KEY")]
    pub api_key: Option<String>,
}
