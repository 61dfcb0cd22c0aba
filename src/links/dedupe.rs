// src/links/dedupe.rs
// Order-preserving deduplication of URL strings.

use std::collections::HashSet;

// Keeps the first occurrence of every URL, in the original order.
//
// URLs are compared as plain strings, so "https://a.com/x" and
// "https://a.com/x/" are two different entries.
pub fn dedupe(urls: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(urls.len());
    urls.into_iter()
        .filter(|url| seen.insert(url.clone()))
        .collect()
}
