// src/crawl/fetch.rs
// =============================================================================
// This module downloads pages.
//
// The crawler only needs one capability: "give me the body of this URL".
// That capability is the `Fetch` trait. The real implementation,
// `HttpFetcher`, wraps a reqwest Client; tests plug in an in-memory fake.
//
// Notes:
// - One Client is built up front and reused (connection pooling)
// - Every request has a timeout, so a hung server can't block us forever
// - The HTTP status is not checked: a 404 page still has a navigation bar
//   full of perfectly good links
//
// Rust concepts:
// - Traits: describe a capability without fixing the implementation
// - async fn in traits: the trait method returns a future
// =============================================================================

use crate::error::{MapError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Something that can fetch the body of a URL.
pub trait Fetch {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Fetches pages over HTTP(S) with reqwest.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("sitemapit/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| MapError::Config(format!("could not build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| MapError::Transport {
                url: url.to_string(),
                source: e.into(),
            })?;

        debug!("{} -> HTTP {}", url, response.status().as_u16());

        response.text().await.map_err(|e| MapError::BodyRead {
            url: url.to_string(),
            source: e.into(),
        })
    }
}
