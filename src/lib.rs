//! # Know Headlines
//!
//! Fetches paginated top-headline listings from a remote news API, applies
//! user-selected country/category filters, and exposes results plus
//! pagination metadata to a display layer.
//!
//! The core is the fetch/pagination/filter state machine:
//!
//! - [`request`]: pure request construction (the credential is checked
//!   before any network activity)
//! - [`parser`]: response validation and per-article normalization
//! - [`feed`]: the fetch lifecycle owning [`feed::FetchState`], with
//!   monotonic request ids and the latest-request-wins commit rule
//! - [`filters`]: validated country/category selection; any mutation resets
//!   the page to 1
//! - [`pagination`]: bounds-checked next/previous page arithmetic
//!
//! Presentation is deliberately thin: [`render`] formats read-only snapshots
//! for a terminal, and the binary in `main.rs` is just a driver. Neither
//! holds state of its own.
//!
//! ## Usage
//!
//! ```no_run
//! use know_headlines::feed::HeadlinesFeed;
//! use know_headlines::pagination::PageMove;
//!
//! # async fn run() {
//! let feed = HeadlinesFeed::new(std::env::var("NEWS_API_KEY").ok());
//! feed.begin_fetch().await;
//! feed.set_category("sports").await.unwrap();
//! if let PageMove::Boundary = feed.next_page().await {
//!     println!("no more pages");
//! }
//! # }
//! ```

pub mod cli;
pub mod error;
pub mod feed;
pub mod filters;
pub mod models;
pub mod pagination;
pub mod parser;
pub mod render;
pub mod request;

pub use error::{Error, FailureReason};
pub use feed::{FetchState, HeadlinesFeed};
pub use filters::{Category, FilterState};
pub use models::{Article, ArticleListing};
pub use pagination::PageMove;
