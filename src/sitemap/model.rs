// src/sitemap/model.rs
// =============================================================================
// This module holds the sitemap data model and turns it into XML.
//
// The document format is fixed by the sitemaps.org protocol:
//
//   <?xml version="1.0" encoding="UTF-8"?>
//   <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//     <url>
//       <loc>https://example.com/a</loc>
//     </url>
//   </urlset>
//
// We describe that shape with plain structs and let serde + quick-xml write
// it. Optional fields (lastmod, changefreq, priority) are left out of the
// XML entirely when they are not set.
//
// Rust concepts:
// - #[serde(rename = ...)]: map Rust names to XML element names
// - "@xmlns": quick-xml writes fields starting with @ as attributes
// - skip_serializing_if: omit None fields
// =============================================================================

use crate::error::{MapError, Result};
use serde::{Serialize, Serializer};
use std::str::FromStr;

pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// How often the page at a location is expected to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFreq::Always => "always",
            ChangeFreq::Hourly => "hourly",
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
            ChangeFreq::Never => "never",
        }
    }
}

impl FromStr for ChangeFreq {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "always" => Ok(ChangeFreq::Always),
            "hourly" => Ok(ChangeFreq::Hourly),
            "daily" => Ok(ChangeFreq::Daily),
            "weekly" => Ok(ChangeFreq::Weekly),
            "monthly" => Ok(ChangeFreq::Monthly),
            "yearly" => Ok(ChangeFreq::Yearly),
            "never" => Ok(ChangeFreq::Never),
            other => Err(format!(
                "unknown change frequency '{}' (expected always, hourly, daily, weekly, monthly, yearly or never)",
                other
            )),
        }
    }
}

// Written as bare text so the element reads <changefreq>daily</changefreq>.
impl Serialize for ChangeFreq {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One `<url>` entry. Only `loc` is mandatory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapEntry {
    pub loc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastmod: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changefreq: Option<ChangeFreq>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<f32>,
}

impl SitemapEntry {
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            lastmod: None,
            changefreq: None,
            priority: None,
        }
    }

    pub fn with_changefreq(mut self, changefreq: Option<ChangeFreq>) -> Self {
        self.changefreq = changefreq;
        self
    }

    pub fn with_priority(mut self, priority: Option<f32>) -> Self {
        self.priority = priority;
        self
    }
}

/// A complete `<urlset>` document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename = "urlset")]
pub struct Sitemap {
    #[serde(rename = "@xmlns")]
    xmlns: String,
    #[serde(rename = "url")]
    urls: Vec<SitemapEntry>,
}

impl Default for Sitemap {
    fn default() -> Self {
        Self::new()
    }
}

impl Sitemap {
    /// An empty sitemap with the protocol namespace set.
    pub fn new() -> Self {
        Self {
            xmlns: SITEMAP_NAMESPACE.to_string(),
            urls: Vec::new(),
        }
    }

    /// Appends an entry with only the location set.
    pub fn add_url(&mut self, loc: impl Into<String>) {
        self.add_entry(SitemapEntry::new(loc));
    }

    pub fn add_entry(&mut self, entry: SitemapEntry) {
        self.urls.push(entry);
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[SitemapEntry] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    // Serializes the sitemap to a complete XML document
    //
    // Parameters:
    //   minify: true = one line, false = indented by two spaces
    //
    // Returns: the document text, ending with a newline
    pub fn to_xml(&self, minify: bool) -> Result<String> {
        let mut body = String::new();
        let mut serializer = quick_xml::se::Serializer::new(&mut body);
        if !minify {
            serializer.indent(' ', 2);
        }
        self.serialize(serializer)
            .map_err(|e| MapError::Serialization(e.to_string()))?;

        let separator = if minify { "" } else { "\n" };
        Ok(format!("{}{}{}\n", XML_DECLARATION, separator, body))
    }
}
