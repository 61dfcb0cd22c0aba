// src/links/extract.rs
// =============================================================================
// This module pulls raw href values out of an HTML body.
//
// We deliberately do NOT build a DOM here. A single regular expression scans
// the body once and captures the double-quoted value of every `<a ... href=`
// tag, in the order the tags appear. That is fast and predictable, and it is
// all a sitemap generator needs.
//
// What is NOT matched:
// - anchors without an href
// - single-quoted or unquoted href values
//
// Rust concepts:
// - LazyLock: a value built once, on first use, then shared read-only
// - Lifetimes: the returned &str slices borrow from the body
// =============================================================================

use regex::Regex;
use std::sync::LazyLock;

// `.*?` is non-greedy, so the value stops at the first closing quote.
static LINK_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a[^>]+href="(.*?)"[^>]*>"#).expect("hardcoded regex pattern is valid")
});

// Extracts every href value from anchor tags in `body`
//
// Parameters:
//   body: the HTML text of a page
//
// Returns: the raw href values, in source order, duplicates included
//
// Example:
//   body = r#"<a href="/docs">Docs</a>"#
//   result = ["/docs"]
pub fn extract_links(body: &str) -> Vec<&str> {
    LINK_TAG_REGEX
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}
