// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging
// 3. Crawl the site starting from the seed URL
// 4. Build the sitemap and write it out
// 5. Exit with proper code (0 = success, 1 = pages skipped, 2 = error)
//
// Rust concepts used:
// - async/await: Because page downloads are network I/O
// - Result<T, E>: For error handling (T = success type, E = error type)
// - Generics: generate() accepts any page fetcher, so tests need no network
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;           // src/cli.rs - command-line parsing
mod crawl;         // src/crawl/ - fetching pages and depth-bounded traversal
mod error;         // src/error.rs - shared error type
mod links;         // src/links/ - link extraction, resolution, dedup
mod sitemap;       // src/sitemap/ - XML model and output

use clap::Parser;  // Parser trait enables the parse() method
use cli::Cli;
use crawl::{CrawlConfig, CrawlReport, Fetch, HttpFetcher};
use sitemap::{ChangeFreq, Sitemap, SitemapEntry};
use tracing_subscriber::EnvFilter;
use url::Url;

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::{Context, Result};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole error chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = sitemap written, every page crawled
//   Ok(1) = sitemap written, but some pages were skipped (--keep-going)
//   Err   = fatal error (main turns it into exit code 2)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    cli.validate()?;

    let seed = Url::parse(&cli.url).map_err(|source| error::MapError::UrlParse {
        url: cli.url.clone(),
        source,
    })?;
    let config = cli.crawl_config();
    let target = cli.output_target();

    // Progress goes to stderr when the sitemap itself goes to stdout
    let progress = |line: String| {
        if target.is_stdout() || cli.json {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    };

    progress(format!("🔍 Mapping website: {}", seed));
    progress(format!("📊 Max depth: {}", config.depth));

    let fetcher = HttpFetcher::new(config.timeout)?;
    let (sitemap, report) = generate(&fetcher, &seed, &config, cli.changefreq, cli.priority).await?;

    let xml = sitemap.to_xml(cli.minify)?;
    sitemap::write_sitemap(&xml, &target, cli.write_mode())
        .with_context(|| format!("writing sitemap to {}", cli.output))?;

    progress(format!(
        "📄 Crawled {} page(s), found {} URL(s)",
        report.pages_fetched,
        sitemap.len()
    ));
    if sitemap.is_empty() {
        progress("⚠️  No same-site links found on the seed page".to_string());
    }
    if !target.is_stdout() {
        progress(format!("✅ Sitemap written to {}", cli.output));
    }

    if cli.json {
        print_json(&seed, &config, &report)?;
    }

    if report.skipped.is_empty() {
        Ok(0)
    } else {
        print_skipped(&report);
        Ok(1)
    }
}

// Initializes tracing. RUST_LOG wins if it is set; otherwise we log
// warnings, or everything from our crate with --verbose.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "sitemapit=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Crawls the site and builds the sitemap from what was found
//
// Parameters:
//   fetcher: how pages are downloaded
//   seed: the starting URL
//   config: crawl settings
//   changefreq / priority: optional values stamped on every entry
//
// Returns: the sitemap (one entry per URL, discovery order) and the report
async fn generate<F: Fetch>(
    fetcher: &F,
    seed: &Url,
    config: &CrawlConfig,
    changefreq: Option<ChangeFreq>,
    priority: Option<f32>,
) -> error::Result<(Sitemap, CrawlReport)> {
    let report = crawl::map_site(fetcher, seed, config).await?;

    let mut sitemap = Sitemap::new();
    for url in &report.urls {
        if changefreq.is_none() && priority.is_none() {
            sitemap.add_url(url.as_str());
        } else {
            sitemap.add_entry(
                SitemapEntry::new(url.as_str())
                    .with_changefreq(changefreq)
                    .with_priority(priority),
            );
        }
    }

    Ok((sitemap, report))
}

fn print_json(seed: &Url, config: &CrawlConfig, report: &CrawlReport) -> Result<()> {
    let host = links::Host::from_url(seed)?;
    let json_output = serde_json::to_string_pretty(&serde_json::json!({
        "seed": seed.as_str(),
        "host": host.as_str(),
        "depth": config.depth,
        "pages_fetched": report.pages_fetched,
        "urls": report.urls,
        "skipped": report.skipped,
    }))?;
    println!("{}", json_output);
    Ok(())
}

fn print_skipped(report: &CrawlReport) {
    eprintln!("\n⚠️  Skipped {} page(s):", report.skipped.len());
    for page in &report.skipped {
        eprintln!("   {} ({})", page.url, page.reason);
    }
}
