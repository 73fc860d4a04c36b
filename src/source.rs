//! Asynchronous content sources for the parsers
//!
//! The parsers never touch the filesystem or network themselves; they
//! pull raw text or bytes through the [`TextSource`] trait. This keeps
//! one parse free of I/O assumptions and lets tests feed fixtures from
//! memory.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::{Error, Result};

/// Asynchronous provider of raw text and byte content for a path
///
/// Implementations must be `Send + Sync` so that one source can serve
/// several concurrent load calls. Retry and timeout policy, if any,
/// belongs to the implementation; the parsers treat every failure as
/// fatal to the enclosing parse.
#[async_trait]
pub trait TextSource: Send + Sync + std::fmt::Debug {
    /// Fetch the full text content of `path`
    async fn fetch_text(&self, path: &str) -> Result<String>;

    /// Fetch the full binary content of `path`
    async fn fetch_bytes(&self, path: &str) -> Result<Vec<u8>>;
}

/// Filesystem-backed source rooted at a base directory
///
/// Paths handed to the parsers are resolved relative to the root with
/// `/`-separated segments.
///
/// # Example
///
/// ```no_run
/// use meshload::source::{FileSource, TextSource};
///
/// # async fn example() -> meshload::Result<()> {
/// let source = FileSource::new("assets");
/// let obj = source.fetch_text("models/cube.obj").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    /// Create a source rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn full_path(&self, path: &str) -> PathBuf {
        let mut full = self.root.clone();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            full.push(segment);
        }
        full
    }
}

#[async_trait]
impl TextSource for FileSource {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        let full = self.full_path(path);
        tracing::trace!(path, file = %full.display(), "reading text file");
        Ok(tokio::fs::read_to_string(full).await?)
    }

    async fn fetch_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.full_path(path);
        tracing::trace!(path, file = %full.display(), "reading binary file");
        Ok(tokio::fs::read(full).await?)
    }
}

/// In-memory source for tests and embedded assets
///
/// # Example
///
/// ```
/// use meshload::source::MemorySource;
///
/// let source = MemorySource::new()
///     .with_text("cube.obj", "v 0 0 0\n")
///     .with_bytes("cube.stl", vec![0u8; 84]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text entry, builder style
    pub fn with_text(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.entries.insert(path.into(), text.into().into_bytes());
        self
    }

    /// Add a binary entry, builder style
    pub fn with_bytes(mut self, path: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.entries.insert(path.into(), bytes);
        self
    }
}

#[async_trait]
impl TextSource for MemorySource {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        let bytes = self
            .entries
            .get(path)
            .ok_or_else(|| Error::fetch(path, "no such entry"))?;
        String::from_utf8(bytes.clone()).map_err(|e| Error::fetch(path, e.to_string()))
    }

    async fn fetch_bytes(&self, path: &str) -> Result<Vec<u8>> {
        self.entries
            .get(path)
            .cloned()
            .ok_or_else(|| Error::fetch(path, "no such entry"))
    }
}
