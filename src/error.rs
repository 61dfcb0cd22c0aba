// src/error.rs
// =============================================================================
// Error types shared by the crawl, link and sitemap modules.
//
// Every fallible operation in the library part of the tool returns
// `error::Result<T>`. The binary (main.rs) decides what is fatal: by default
// everything is, but in --keep-going mode page-level errors found while
// traversing are recorded and skipped instead.
//
// Rust concepts:
// - thiserror: derives Display and std::error::Error for our enum
// - #[source]: keeps the underlying error so it shows up in error chains
// - Box<dyn Error>: lets any fetcher report its own transport error type
// =============================================================================

use thiserror::Error;

/// Error type any fetch implementation can hand back as a source.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid URL '{url}': {source}")]
    UrlParse {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("could not read response body from {url}: {source}")]
    BodyRead {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("could not serialize sitemap: {0}")]
    Serialization(String),

    #[error("could not write {path}: {source}")]
    FileWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl MapError {
    /// True for errors that only concern a single crawled page
    /// (fetching it, reading it, or a broken link inside it).
    pub fn is_page_level(&self) -> bool {
        matches!(
            self,
            MapError::Transport { .. } | MapError::BodyRead { .. } | MapError::UrlParse { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, MapError>;
