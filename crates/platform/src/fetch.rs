//! Blocking fetch backends. The session calls these from worker threads.

use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
};

use anyhow::Result;

/// Source of file contents addressed by the URL/path strings the parser produces.
pub trait Fetcher: Send + Sync + 'static {
    /// `Ok(None)` when the resource does not exist; `Err` for any other failure.
    fn fetch(&self, url: &str) -> Result<Option<Vec<u8>>>;
}

/// Reads from the local file system, optionally below a root directory.
#[derive(Clone, Debug, Default)]
pub struct FsFetcher {
    root: Option<PathBuf>,
}

impl FsFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn path_for(&self, url: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(url),
            None => Path::new(url).to_path_buf(),
        }
    }
}

impl Fetcher for FsFetcher {
    fn fetch(&self, url: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(url);
        match std::fs::read(&path) {
            Ok(bytes) => {
                log::debug!("Read {} bytes from {}", bytes.len(), path.display());
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(anyhow::Error::new(e).context(format!("Failed to read {}", path.display()))),
        }
    }
}

/// In-memory files, keyed by exact URL.
#[derive(Clone, Debug, Default)]
pub struct MemoryFetcher {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(url, contents);
        self
    }

    pub fn insert(&mut self, url: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.files.insert(url.into(), contents.into());
    }
}

impl Fetcher for MemoryFetcher {
    fn fetch(&self, url: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.files.get(url).cloned())
    }
}
