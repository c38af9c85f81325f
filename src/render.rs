//! Plain-text rendering of results for the terminal.

use std::fmt::Write as _;

use scholar_search::{PLACEHOLDER_IMAGE, SearchResult};

/// Shown when a search ran but nothing survived filtering.
pub const NO_RESULTS: &str = "No results found. Try a different search term.";

/// Render results as numbered cards.
pub fn render_results(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return format!("{NO_RESULTS}\n");
    }
    let mut out = String::new();
    for (index, result) in results.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {}", index + 1, result.title);
        let _ = writeln!(out, "     {}", result.link);
        if !result.snippet.trim().is_empty() {
            let _ = writeln!(out, "     {}", one_line(&result.snippet));
        }
        if result.image != PLACEHOLDER_IMAGE {
            let _ = writeln!(out, "     image: {}", result.image);
        }
        out.push('\n');
    }
    out
}

/// Collapse runs of whitespace so provider snippets stay on one line.
fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
