// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Level-by-level crawling starting from a seed URL
// - Same-host restriction (we never crawl other sites)
// - Configurable depth limit
// - Each page fetched at most once per run
// - Optional bounded parallel fetching (--parallel)
//
// Rust concepts:
// - Traits: Fetch abstracts "download a page" so tests need no network
// - Async programming: page downloads are network I/O
// - Collections: HashSet for visited URLs, Vec for discovery order
// =============================================================================

mod fetch;
mod traverse;

// Re-export the crawling API
pub use fetch::{Fetch, HttpFetcher};
pub use traverse::{map_site, CrawlConfig, CrawlReport};
