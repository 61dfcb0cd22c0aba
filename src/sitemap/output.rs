// src/sitemap/output.rs
// =============================================================================
// This module writes the finished XML document to its destination.
//
// Destinations:
// - a file path (the default is ./sitemap.xml)
// - "-" for standard output
//
// File modes:
// - Append (default): the file is created if missing, otherwise the new
//   document is added after whatever is already there. Running the tool
//   twice therefore leaves two XML documents in the file.
// - Overwrite (--overwrite): the file is truncated first.
// =============================================================================

use crate::error::{MapError, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// "-" means stdout, anything else is a file path.
    pub fn parse(value: &str) -> Self {
        if value == "-" {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(PathBuf::from(value))
        }
    }

    pub fn is_stdout(&self) -> bool {
        matches!(self, OutputTarget::Stdout)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    #[default]
    Append,
    Overwrite,
}

// Writes the document to the target
//
// Parameters:
//   xml: the serialized sitemap
//   target: stdout or a file path
//   mode: append to or overwrite an existing file (ignored for stdout)
pub fn write_sitemap(xml: &str, target: &OutputTarget, mode: WriteMode) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(xml.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(|source| MapError::FileWrite {
                    path: "<stdout>".to_string(),
                    source,
                })
        }
        OutputTarget::File(path) => {
            let file_error = |source| MapError::FileWrite {
                path: path.display().to_string(),
                source,
            };

            let mut options = OpenOptions::new();
            options.create(true);
            match mode {
                WriteMode::Append => options.append(true),
                WriteMode::Overwrite => options.write(true).truncate(true),
            };

            debug!("Writing {} bytes to {} ({:?})", xml.len(), path.display(), mode);

            let mut file = options.open(path).map_err(file_error)?;
            file.write_all(xml.as_bytes()).map_err(file_error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const DOC: &str = "<urlset></urlset>\n";

    #[test]
    fn test_parse_target() {
        assert_eq!(OutputTarget::parse("-"), OutputTarget::Stdout);
        assert_eq!(
            OutputTarget::parse("./sitemap.xml"),
            OutputTarget::File(PathBuf::from("./sitemap.xml"))
        );
        assert!(OutputTarget::parse("-").is_stdout());
    }

    #[test]
    fn test_creates_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sitemap.xml");

        write_sitemap(DOC, &OutputTarget::File(path.clone()), WriteMode::Append).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), DOC);
    }

    #[test]
    fn test_two_runs_append_two_documents() {
        let dir = tempdir().unwrap();
        let target = OutputTarget::File(dir.path().join("sitemap.xml"));

        write_sitemap(DOC, &target, WriteMode::Append).unwrap();
        write_sitemap(DOC, &target, WriteMode::Append).unwrap();

        let content = fs::read_to_string(dir.path().join("sitemap.xml")).unwrap();
        assert_eq!(content, format!("{}{}", DOC, DOC));
        assert_eq!(content.matches("<urlset>").count(), 2);
    }

    #[test]
    fn test_overwrite_replaces_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sitemap.xml");
        fs::write(&path, "old content that is longer than the new one").unwrap();

        let target = OutputTarget::File(path.clone());
        write_sitemap(DOC, &target, WriteMode::Overwrite).unwrap();
        write_sitemap(DOC, &target, WriteMode::Overwrite).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), DOC);
    }

    #[test]
    fn test_missing_directory_is_a_write_error() {
        let dir = tempdir().unwrap();
        let target = OutputTarget::File(dir.path().join("no/such/dir/sitemap.xml"));

        let result = write_sitemap(DOC, &target, WriteMode::Append);

        assert!(matches!(result, Err(MapError::FileWrite { .. })));
    }
}
