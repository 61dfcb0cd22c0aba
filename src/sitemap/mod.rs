// src/sitemap/mod.rs
// =============================================================================
// This module builds the sitemap document and writes it out.
//
// Submodules:
// - model: Sitemap / SitemapEntry structs and XML serialization
// - output: writing the document to a file (append or overwrite) or stdout
// =============================================================================

mod model;
mod output;

pub use model::{ChangeFreq, Sitemap, SitemapEntry};
pub use output::{write_sitemap, OutputTarget, WriteMode};
