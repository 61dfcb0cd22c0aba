// src/crawl/traverse.rs
// =============================================================================
// This module implements depth-bounded, level-by-level site traversal.
//
// How it works:
// 1. Fetch the seed page and collect its same-site links: that is level 0
// 2. For each level 1..=depth, fetch every URL of the previous level that
//    is on our host and hasn't been fetched yet, and collect their links
// 3. Concatenate all levels and deduplicate once, keeping discovery order
//
// A depth of 0 or 1 means "just the seed page": level 0 is the answer.
//
// Loop safety:
// - The depth bound guarantees termination
// - A single visited set spans all levels, so pages that link to each
//   other are still fetched at most once per run
//
// Errors:
// - The seed fetch is always fatal
// - On deeper pages, a failed fetch is fatal unless keep_going is set,
//   in which case the page is logged, recorded in `skipped` and left out
//   of the resulting URL list
//
// Rust concepts:
// - Generics: traverse() works with any Fetch implementation
// - Streams: .buffered(n) runs up to n fetches at once but yields results
//   in input order, so the output does not depend on network timing
// =============================================================================

use super::fetch::Fetch;
use crate::error::Result;
use crate::links::{dedupe, discover_links, Host, HostPolicy};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Settings for one crawl.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub depth: usize,
    pub parallel: usize,
    pub timeout: Duration,
    pub host_policy: HostPolicy,
    pub keep_going: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            depth: 1,
            parallel: 1,
            timeout: Duration::from_secs(10),
            host_policy: HostPolicy::Contains,
            keep_going: false,
        }
    }
}

impl CrawlConfig {
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_parallel(mut self, parallel: usize) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_host_policy(mut self, policy: HostPolicy) -> Self {
        self.host_policy = policy;
        self
    }

    pub fn with_keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }
}

/// A page that could not be crawled in keep-going mode.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SkippedPage {
    pub url: String,
    pub reason: String,
}

/// Result of a crawl.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    /// Every discovered URL, deduplicated, in discovery order
    pub urls: Vec<String>,
    /// Number of pages fetched, seed included
    pub pages_fetched: usize,
    pub skipped: Vec<SkippedPage>,
}

// Crawls a website starting from the seed URL
//
// Parameters:
//   fetcher: how pages are downloaded
//   seed: the starting page
//   config: depth, parallelism, host policy, error policy
//
// Returns: the crawl report, or the first fatal error
pub async fn map_site<F: Fetch>(fetcher: &F, seed: &Url, config: &CrawlConfig) -> Result<CrawlReport> {
    let host = Host::from_url(seed)?;
    info!("Mapping {} (host {}, depth {})", seed, host, config.depth);

    let body = fetcher.fetch(seed.as_str()).await?;
    let seed_links = discover_links(&body, &host, config.host_policy)?;
    debug!("Seed page has {} same-site link(s)", seed_links.len());

    let already_fetched = HashSet::from([seed.to_string()]);
    let mut report = traverse(fetcher, seed_links, &host, config, already_fetched).await?;
    report.pages_fetched += 1;

    Ok(report)
}

// Expands already-discovered seed links level by level
//
// Parameters:
//   fetcher: how pages are downloaded
//   seed_links: level 0, the links found on the seed page
//   host: the host we are mapping
//   config: depth, parallelism, host policy, error policy
//   already_fetched: pages that must not be fetched again (usually the seed)
//
// Returns: levels 0..=depth merged and deduplicated, minus skipped pages,
//          along with how many pages this traversal fetched
pub async fn traverse<F: Fetch>(
    fetcher: &F,
    seed_links: Vec<String>,
    host: &Host,
    config: &CrawlConfig,
    already_fetched: HashSet<String>,
) -> Result<CrawlReport> {
    let mut traversal = Traversal::new(fetcher, host, config, already_fetched);
    let urls = traversal.run(seed_links).await?;

    Ok(CrawlReport {
        urls,
        pages_fetched: traversal.pages_fetched,
        skipped: traversal.skipped,
    })
}

struct Traversal<'a, F> {
    fetcher: &'a F,
    host: &'a Host,
    config: &'a CrawlConfig,
    visited: HashSet<String>,
    pages_fetched: usize,
    skipped: Vec<SkippedPage>,
}

impl<'a, F: Fetch> Traversal<'a, F> {
    fn new(fetcher: &'a F, host: &'a Host, config: &'a CrawlConfig, visited: HashSet<String>) -> Self {
        Self {
            fetcher,
            host,
            config,
            visited,
            pages_fetched: 0,
            skipped: Vec::new(),
        }
    }

    async fn run(&mut self, seed_links: Vec<String>) -> Result<Vec<String>> {
        if self.config.depth <= 1 {
            return Ok(dedupe(seed_links));
        }

        let mut levels = vec![seed_links];

        for depth in 1..=self.config.depth {
            let next = self.expand(&levels[depth - 1], depth).await?;
            let exhausted = next.is_empty();
            levels.push(next);

            if exhausted {
                debug!("Nothing left to crawl after depth {}", depth);
                break;
            }
        }

        // A page that failed to load is not listed in the sitemap.
        let failed: HashSet<&str> = self.skipped.iter().map(|page| page.url.as_str()).collect();
        let urls = levels
            .concat()
            .into_iter()
            .filter(|url| !failed.contains(url.as_str()))
            .collect();

        Ok(dedupe(urls))
    }

    // Fetches the not-yet-visited pages of one level and returns the links
    // found on them.
    async fn expand(&mut self, previous: &[String], depth: usize) -> Result<Vec<String>> {
        let fetcher = self.fetcher;
        let host = self.host;
        let policy = self.config.host_policy;
        let visited = &mut self.visited;

        let targets: Vec<String> = previous
            .iter()
            .filter(|url| policy.admits(url.as_str(), host))
            .filter(|url| visited.insert(url.to_string()))
            .cloned()
            .collect();

        info!("Depth {}: fetching {} page(s)", depth, targets.len());

        let pages: Vec<(String, Result<Vec<String>>)> = stream::iter(targets)
            .map(move |url| async move {
                let links = match fetcher.fetch(&url).await {
                    Ok(body) => discover_links(&body, host, policy),
                    Err(e) => Err(e),
                };
                (url, links)
            })
            .buffered(self.config.parallel.max(1))
            .collect()
            .await;

        let mut found = Vec::new();

        for (url, links) in pages {
            match links {
                Ok(links) => {
                    self.pages_fetched += 1;
                    debug!("[depth {}] {} -> {} link(s)", depth, url, links.len());
                    found.extend(links);
                }
                Err(e) if self.config.keep_going && e.is_page_level() => {
                    warn!("Skipping {}: {}", url, e);
                    self.skipped.push(SkippedPage {
                        url,
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok(found)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why crawl level by level instead of with a queue?
//    - The depth of every URL is simply the index of the level it was found in
//    - The final order (level 0 first, then level 1, ...) is easy to reason about
//
// 2. What does .buffered(n) do?
//    - It polls up to n futures at the same time
//    - Unlike buffer_unordered(n), results come out in the order they went in
//    - With n = 1 this is a plain sequential loop
//
// 3. Why `let visited = &mut self.visited;` before the iterator chain?
//    - The closures borrow individual fields, not the whole `self`
//    - That lets one closure read the host while another updates the set
//
// 4. What is a `match` guard (`Err(e) if ...`)?
//    - The arm only matches when the condition is true
//    - Otherwise matching continues with the next arm (here: return the error)
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MapError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // In-memory site: URL -> body. Unknown URLs fail like a refused connection.
    #[derive(Default)]
    struct FakeSite {
        pages: HashMap<String, String>,
        fetched: Mutex<Vec<String>>,
    }

    impl FakeSite {
        fn page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), body.to_string());
            self
        }

        fn fetched(&self) -> Vec<String> {
            self.fetched.lock().unwrap().clone()
        }

        fn fetch_count(&self, url: &str) -> usize {
            self.fetched().iter().filter(|u| u.as_str() == url).count()
        }
    }

    impl Fetch for FakeSite {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.fetched.lock().unwrap().push(url.to_string());
            self.pages.get(url).cloned().ok_or_else(|| MapError::Transport {
                url: url.to_string(),
                source: "connection refused".into(),
            })
        }
    }

    fn seed() -> Url {
        Url::parse("https://example.com/").unwrap()
    }

    fn anchors(paths: &[&str]) -> String {
        paths
            .iter()
            .map(|p| format!(r#"<a href="{}">link</a>"#, p))
            .collect()
    }

    #[tokio::test]
    async fn test_depth_one_fetches_only_the_seed() {
        let site = FakeSite::default()
            .page("https://example.com/", &anchors(&["/p1", "/p2", "/p1"]))
            .page("https://example.com/p1", &anchors(&["/deep"]));

        let report = map_site(&site, &seed(), &CrawlConfig::default()).await.unwrap();

        assert_eq!(site.fetched(), vec!["https://example.com/"]);
        assert_eq!(report.pages_fetched, 1);
        assert_eq!(
            report.urls,
            vec!["https://example.com/p1", "https://example.com/p2"]
        );
    }

    #[tokio::test]
    async fn test_depth_zero_behaves_like_depth_one() {
        let site = FakeSite::default().page("https://example.com/", &anchors(&["/p1"]));
        let config = CrawlConfig::default().with_depth(0);

        let report = map_site(&site, &seed(), &config).await.unwrap();

        assert_eq!(site.fetched().len(), 1);
        assert_eq!(report.urls, vec!["https://example.com/p1"]);
    }

    #[tokio::test]
    async fn test_depth_two_fetches_each_page_once() {
        let site = FakeSite::default()
            .page("https://example.com/", &anchors(&["/p1", "/p2"]))
            .page("https://example.com/p1", &anchors(&["/p2", "/p3"]))
            .page("https://example.com/p2", &anchors(&["/p1", "/p4"]))
            .page("https://example.com/p3", "")
            .page("https://example.com/p4", "");
        let config = CrawlConfig::default().with_depth(2);

        let report = map_site(&site, &seed(), &config).await.unwrap();

        assert_eq!(site.fetch_count("https://example.com/p1"), 1);
        assert_eq!(site.fetch_count("https://example.com/p2"), 1);
        assert_eq!(
            report.urls,
            vec![
                "https://example.com/p1",
                "https://example.com/p2",
                "https://example.com/p3",
                "https://example.com/p4",
            ]
        );
    }

    #[tokio::test]
    async fn test_links_back_to_seed_are_not_refetched() {
        let site = FakeSite::default()
            .page("https://example.com/", &anchors(&["/", "/p1"]))
            .page("https://example.com/p1", &anchors(&["/", "/p1"]));
        let config = CrawlConfig::default().with_depth(5);

        let report = map_site(&site, &seed(), &config).await.unwrap();

        assert_eq!(site.fetch_count("https://example.com/"), 1);
        assert_eq!(site.fetch_count("https://example.com/p1"), 1);
        assert_eq!(report.pages_fetched, 2);
        assert_eq!(
            report.urls,
            vec!["https://example.com/", "https://example.com/p1"]
        );
    }

    #[tokio::test]
    async fn test_depth_bound_stops_chain() {
        // "/1" -> "/2" -> "/3" -> "/4"; depth 2 fetches /1 and /2 only.
        let site = FakeSite::default()
            .page("https://example.com/", &anchors(&["/1"]))
            .page("https://example.com/1", &anchors(&["/2"]))
            .page("https://example.com/2", &anchors(&["/3"]))
            .page("https://example.com/3", &anchors(&["/4"]));
        let config = CrawlConfig::default().with_depth(2);

        let report = map_site(&site, &seed(), &config).await.unwrap();

        assert_eq!(site.fetch_count("https://example.com/3"), 0);
        assert_eq!(
            report.urls,
            vec![
                "https://example.com/1",
                "https://example.com/2",
                "https://example.com/3",
            ]
        );
    }

    #[tokio::test]
    async fn test_seed_failure_is_fatal() {
        let site = FakeSite::default();
        let config = CrawlConfig::default().with_keep_going(true);

        let result = map_site(&site, &seed(), &config).await;

        assert!(matches!(result, Err(MapError::Transport { .. })));
    }

    #[tokio::test]
    async fn test_page_failure_is_fatal_by_default() {
        let site = FakeSite::default().page("https://example.com/", &anchors(&["/gone", "/ok"]));
        let config = CrawlConfig::default().with_depth(2);

        let result = map_site(&site, &seed(), &config).await;

        match result {
            Err(MapError::Transport { url, .. }) => assert_eq!(url, "https://example.com/gone"),
            other => panic!("expected transport error, got {:?}", other.map(|r| r.urls)),
        }
    }

    #[tokio::test]
    async fn test_keep_going_skips_failed_pages() {
        let site = FakeSite::default()
            .page("https://example.com/", &anchors(&["/gone", "/ok"]))
            .page("https://example.com/ok", &anchors(&["/more"]))
            .page("https://example.com/more", "");
        let config = CrawlConfig::default().with_depth(2).with_keep_going(true);

        let report = map_site(&site, &seed(), &config).await.unwrap();

        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].url, "https://example.com/gone");
        assert_eq!(
            report.urls,
            vec!["https://example.com/ok", "https://example.com/more"]
        );
        assert_eq!(report.pages_fetched, 3);
    }

    #[tokio::test]
    async fn test_parallel_keeps_discovery_order() {
        let mut site = FakeSite::default().page(
            "https://example.com/",
            &anchors(&["/a", "/b", "/c", "/d"]),
        );
        for name in ["a", "b", "c", "d"] {
            site = site
                .page(
                    &format!("https://example.com/{}", name),
                    &anchors(&[&format!("/{}/child", name)]),
                )
                .page(&format!("https://example.com/{}/child", name), "");
        }
        let config = CrawlConfig::default().with_depth(2).with_parallel(4);

        let report = map_site(&site, &seed(), &config).await.unwrap();

        assert_eq!(
            report.urls,
            vec![
                "https://example.com/a",
                "https://example.com/b",
                "https://example.com/c",
                "https://example.com/d",
                "https://example.com/a/child",
                "https://example.com/b/child",
                "https://example.com/c/child",
                "https://example.com/d/child",
            ]
        );
    }

    #[tokio::test]
    async fn test_traverse_from_given_level() {
        let site = FakeSite::default()
            .page("https://example.com/p1", &anchors(&["/p3"]))
            .page("https://example.com/p3", "");
        let host = Host::from_url(&seed()).unwrap();
        let config = CrawlConfig::default().with_depth(2);

        let report = traverse(
            &site,
            vec!["https://example.com/p1".to_string(), "https://example.com/p1".to_string()],
            &host,
            &config,
            HashSet::new(),
        )
        .await
        .unwrap();

        assert_eq!(report.urls, vec!["https://example.com/p1", "https://example.com/p3"]);
        assert_eq!(report.pages_fetched, 2);
        assert_eq!(site.fetch_count("https://example.com/p1"), 1);
    }

    #[tokio::test]
    async fn test_strict_host_policy_does_not_fetch_lookalikes() {
        let site = FakeSite::default()
            .page(
                "https://example.com/",
                &anchors(&["https://other.com/?ref=example.com", "/p1"]),
            )
            .page("https://example.com/p1", "");
        let config = CrawlConfig::default()
            .with_depth(2)
            .with_host_policy(HostPolicy::Exact);

        let report = map_site(&site, &seed(), &config).await.unwrap();

        assert_eq!(report.urls, vec!["https://example.com/p1"]);
        assert_eq!(site.fetch_count("https://other.com/?ref=example.com"), 0);
    }
}
