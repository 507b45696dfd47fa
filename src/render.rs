//! Terminal rendering of feed snapshots.
//!
//! Thin, stateless formatting of [`FetchState`] for the CLI front end. The
//! display truncation lengths (70-character titles, 88-character
//! descriptions) match the card layout of the original web client.

use crate::feed::FetchState;
use crate::models::Article;

/// Maximum displayed title length before ellipsis.
pub const TITLE_DISPLAY_LEN: usize = 70;

/// Maximum displayed description length before ellipsis.
pub const DESCRIPTION_DISPLAY_LEN: usize = 88;

/// Truncate `text` to `max` characters, appending `"..."` when shortened.
pub fn truncate_ellipsis(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

/// Format one article as a short terminal block.
pub fn render_article(article: &Article) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "  {}\n",
        truncate_ellipsis(&article.title, TITLE_DISPLAY_LEN)
    ));
    out.push_str(&format!(
        "    {}\n",
        truncate_ellipsis(&article.description, DESCRIPTION_DISPLAY_LEN)
    ));
    if let Some(published_at) = article.published_at {
        out.push_str(&format!("    {}\n", published_at.to_rfc3339()));
    }
    out.push_str(&format!("    {}\n", article.source_url));
    out
}

/// Format a full snapshot: status line, articles, and the page footer.
pub fn render_page(state: &FetchState, total_pages: Option<u64>) -> String {
    match state {
        FetchState::Idle => "No headlines fetched yet.\n".to_string(),
        FetchState::Loading { .. } => "Loading...\n".to_string(),
        FetchState::Success { listing, page } => {
            let mut out = String::new();
            if listing.articles.is_empty() {
                out.push_str("No matching headlines.\n");
            }
            for article in &listing.articles {
                out.push_str(&render_article(article));
                out.push('\n');
            }
            match total_pages {
                Some(total) => out.push_str(&format!("Page {page} of {total}\n")),
                None => out.push_str(&format!("Page {page}\n")),
            }
            out
        }
        FetchState::Failure {
            reason,
            message,
            page,
        } => {
            format!("Error ({reason}) on page {page}: {message}\n")
        }
    }
}
