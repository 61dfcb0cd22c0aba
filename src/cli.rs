// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Usage:
//   sitemapit <URL> [--depth N] [--parallel N] [--output PATH] [...]
//
// Everything here is plain data; main.rs turns it into a CrawlConfig and
// output settings.
//
// Rust concepts:
// - Derive macros: #[derive(Parser)] generates the argument parser
// - Doc comments (///) on fields become the --help text
// =============================================================================

use crate::crawl::CrawlConfig;
use crate::error::{MapError, Result};
use crate::links::HostPolicy;
use crate::sitemap::{ChangeFreq, OutputTarget, WriteMode};
use clap::Parser;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "sitemapit",
    version,
    about = "Crawl a website and generate a sitemap.xml",
    long_about = "sitemapit fetches a seed page, follows links on the same host up to a \
                  fixed depth, and writes every URL it found as a sitemaps.org XML sitemap."
)]
pub struct Cli {
    /// Seed URL to start crawling from (e.g., https://example.com)
    pub url: String,

    /// Maximum depth of link-following recursion
    ///
    /// Depth 1 = only the links found on the seed page
    /// Depth N > 1 = follow same-host links for N levels
    #[arg(long, default_value_t = 1)]
    pub depth: usize,

    /// Number of pages fetched at the same time within one level
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub parallel: u16,

    /// Output file path, or "-" for stdout
    ///
    /// An existing file is appended to unless --overwrite is given
    #[arg(long, default_value = "./sitemap.xml")]
    pub output: String,

    /// Truncate the output file instead of appending to it
    #[arg(long)]
    pub overwrite: bool,

    /// Write the XML on a single line
    #[arg(long)]
    pub minify: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Only accept links whose host matches exactly
    /// (default: any link that mentions the host)
    #[arg(long)]
    pub strict_host: bool,

    /// Skip pages that fail to load instead of aborting the run
    #[arg(long)]
    pub keep_going: bool,

    /// <changefreq> value written for every URL
    /// (always, hourly, daily, weekly, monthly, yearly, never)
    #[arg(long)]
    pub changefreq: Option<ChangeFreq>,

    /// <priority> value (0.0 - 1.0) written for every URL
    #[arg(long)]
    pub priority: Option<f32>,

    /// Print a JSON crawl report to stdout
    #[arg(long)]
    pub json: bool,

    /// Show debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn crawl_config(&self) -> CrawlConfig {
        let host_policy = if self.strict_host {
            HostPolicy::Exact
        } else {
            HostPolicy::Contains
        };

        CrawlConfig::default()
            .with_depth(self.depth)
            .with_parallel(usize::from(self.parallel))
            .with_timeout(Duration::from_secs(self.timeout))
            .with_host_policy(host_policy)
            .with_keep_going(self.keep_going)
    }

    pub fn output_target(&self) -> OutputTarget {
        OutputTarget::parse(&self.output)
    }

    pub fn write_mode(&self) -> WriteMode {
        if self.overwrite {
            WriteMode::Overwrite
        } else {
            WriteMode::Append
        }
    }

    /// Checks combinations clap can't express on its own.
    pub fn validate(&self) -> Result<()> {
        if let Some(priority) = self.priority {
            if !(0.0..=1.0).contains(&priority) {
                return Err(MapError::Config(format!(
                    "priority must be between 0.0 and 1.0, got {}",
                    priority
                )));
            }
        }

        if self.json && self.output_target().is_stdout() {
            return Err(MapError::Config(
                "--json cannot be combined with --output -".to_string(),
            ));
        }

        Ok(())
    }
}
