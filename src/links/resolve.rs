// src/links/resolve.rs
// =============================================================================
// This module decides whether a raw href belongs to the site we are mapping,
// and if it does, turns it into an absolute URL.
//
// Rules, checked in order:
// 1. The link mentions our host  -> parse it as an absolute URL, keep it
// 2. The link starts with "/"    -> glue "https://" + host in front of it
// 3. Anything else               -> skip it (external, mailto:, "#top", ...)
//
// Rule 1 is a plain substring check by default (HostPolicy::Contains). It is
// loose on purpose: it is what the tool has always done. HostPolicy::Exact
// (--strict-host) parses the link and compares its authority instead.
//
// Skipping is not an error. Only a link that claims to be absolute but
// cannot be parsed (e.g. a bad port) produces MapError::UrlParse.
//
// Rust concepts:
// - Newtype structs: Host wraps a String so it can't be mixed up with a URL
// - Result<Option<T>>: three outcomes (keep / skip / fail) in one type
// =============================================================================

use crate::error::{MapError, Result};
use std::fmt;
use url::Url;

/// The authority (domain, plus the port when one is given) of the seed URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host(String);

impl Host {
    /// Builds the host from the seed URL.
    pub fn from_url(url: &Url) -> Result<Self> {
        authority(url)
            .map(Host)
            .ok_or_else(|| MapError::Config(format!("seed URL has no host: {}", url)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How strictly a link is matched against the target host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostPolicy {
    /// The link text contains the host anywhere.
    #[default]
    Contains,
    /// The parsed link's authority equals the host.
    Exact,
}

impl HostPolicy {
    // Decides whether an already-resolved URL is on our site, i.e. whether
    // the crawler may fetch it.
    pub fn admits(self, url: &str, host: &Host) -> bool {
        match self {
            HostPolicy::Contains => url.contains(host.as_str()),
            HostPolicy::Exact => Url::parse(url)
                .ok()
                .and_then(|parsed| authority(&parsed))
                .is_some_and(|found| found == host.as_str()),
        }
    }
}

// Resolves a raw href against the target host
//
// Parameters:
//   raw: the href value exactly as it appeared in the page
//   host: the host we are mapping
//   policy: how the host check is done
//
// Returns:
//   Ok(Some(url)) - the link is on our site
//   Ok(None)      - the link is not ours (or not a web link), skip it
//   Err(..)       - the link looked absolute but is not a valid URL
//
// Examples (host = "example.com"):
//   "/about"                 -> Some("https://example.com/about")
//   "https://example.com/x"  -> Some("https://example.com/x")
//   "https://other.com/x"    -> None
//   ""                       -> None
pub fn resolve(raw: &str, host: &Host, policy: HostPolicy) -> Result<Option<Url>> {
    if raw.is_empty() {
        return Ok(None);
    }

    // Protocol-relative links ("//example.com/x") inherit https.
    let candidate = match raw.strip_prefix("//") {
        Some(rest) => format!("https://{}", rest),
        None => raw.to_string(),
    };

    if let Some(url) = resolve_absolute(&candidate, host, policy)? {
        return Ok(web_only(url));
    }

    if raw.starts_with('/') && !raw.starts_with("//") {
        let absolute = format!("https://{}{}", host, raw);
        let url = Url::parse(&absolute).map_err(|source| MapError::UrlParse {
            url: absolute.clone(),
            source,
        })?;
        return Ok(Some(url));
    }

    Ok(None)
}

// Rule 1. A candidate that turns out to be relative is not an error here,
// it just falls through to the root-relative rule.
fn resolve_absolute(candidate: &str, host: &Host, policy: HostPolicy) -> Result<Option<Url>> {
    if policy == HostPolicy::Contains && !candidate.contains(host.as_str()) {
        return Ok(None);
    }

    let url = match Url::parse(candidate) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => return Ok(None),
        // A broken link to some other site is just another external link.
        Err(_) if !candidate.contains(host.as_str()) => return Ok(None),
        Err(source) => {
            return Err(MapError::UrlParse {
                url: candidate.to_string(),
                source,
            })
        }
    };

    match policy {
        HostPolicy::Contains => Ok(Some(url)),
        HostPolicy::Exact => {
            let same_host = authority(&url).is_some_and(|found| found == host.as_str());
            Ok(same_host.then_some(url))
        }
    }
}

// mailto:, javascript:, ftp: ... never go into a sitemap
fn web_only(url: Url) -> Option<Url> {
    matches!(url.scheme(), "http" | "https").then_some(url)
}

// "example.com" or "example.com:8080". Default ports are already dropped
// by the url crate, so https://example.com:443/ yields "example.com".
fn authority(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Result<Option<Url>>?
//    - Ok(Some(url)): keep this link
//    - Ok(None): not our link, quietly skip it
//    - Err(..): the page contains a broken absolute URL
//
// 2. What does .then_some() do?
//    - bool::then_some(x) returns Some(x) if the bool is true, None otherwise
//
// 3. Why check raw.is_empty() first?
//    - An empty href is common (<a href="">) and has nothing to resolve
//    - Returning early keeps the rest of the function simple
// -----------------------------------------------------------------------------
