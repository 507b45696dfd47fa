//! Know — Top Headlines, in the terminal.
//!
//! A thin driver over the [`know_headlines`] library: parse CLI arguments,
//! build the feed, fetch, and print. All state lives in the feed; this
//! binary only consumes read-only snapshots and invokes the mutators.

use clap::Parser;
use std::error::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use know_headlines::cli::Cli;
use know_headlines::feed::HeadlinesFeed;
use know_headlines::filters::FilterState;
use know_headlines::pagination::PageMove;
use know_headlines::render;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(?args.country, ?args.category, page = args.page, page_size = args.page_size, "Parsed CLI arguments");

    let filters = FilterState::new(&args.country, &args.category)?;
    info!(country = %filters.country(), category = %filters.category(), page = args.page, "Fetching headlines");

    let feed = HeadlinesFeed::new(args.api_key.clone())
        .with_filters(filters)
        .with_page(args.page)
        .with_page_size(args.page_size);

    println!("Know — Top Headlines\n");

    feed.begin_fetch().await;
    print!("{}", render::render_page(&feed.state(), feed.total_pages()));

    // Walk forward through the remaining requested pages; the feed rejects
    // navigation past the last page.
    for _ in 1..args.pages {
        match feed.next_page().await {
            PageMove::Moved(page) => {
                debug!(page, "advanced to next page");
                println!();
                print!("{}", render::render_page(&feed.state(), feed.total_pages()));
            }
            PageMove::Boundary => {
                warn!(page = feed.page(), "reached the last page");
                println!("\nNo more pages.");
                break;
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, "Done");
    Ok(())
}
