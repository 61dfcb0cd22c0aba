// src/links/mod.rs
// =============================================================================
// This module turns an HTML page into the list of same-site URLs it links to.
//
// Submodules:
// - extract: finds raw href values with a regular expression
// - resolve: keeps only links on our host and makes them absolute
// - dedupe: removes repeated URLs while keeping discovery order
//
// discover_links() below chains the three together; it is what the crawler
// calls for every page it fetches.
// =============================================================================

mod dedupe;
mod extract;
mod resolve;

pub use dedupe::dedupe;
pub use extract::extract_links;
pub use resolve::{resolve, Host, HostPolicy};

use crate::error::Result;

// Extracts, resolves and deduplicates the links of one page
//
// Parameters:
//   body: the page HTML
//   host: the host we are mapping
//   policy: how links are matched against the host
//
// Returns: absolute same-site URLs in the order they first appear,
//          or the first UrlParse error hit while resolving
pub fn discover_links(body: &str, host: &Host, policy: HostPolicy) -> Result<Vec<String>> {
    let mut links = Vec::new();

    for raw in extract_links(body) {
        if let Some(url) = resolve(raw, host, policy)? {
            links.push(url.to_string());
        }
    }

    Ok(dedupe(links))
}
