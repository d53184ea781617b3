//! # Directory Builder
//!
//! Chooses where the blob comes from and whether the name index is built up
//! front. Without a source the builder loads the embedded blob.
//!
//! | Option        | Default   | Description                                   |
//! |---------------|-----------|-----------------------------------------------|
//! | source        | embedded  | `static_bytes`, `bytes` or `path` (mmap)      |
//! | eager_names   | false     | Build the name index in `open()`               |
//!
//! Eager name indexing moves the one-time build cost from the first name
//! lookup to startup, which suits servers that want flat lookup latency.

use std::path::PathBuf;

use eyre::Result;

use crate::directory::Directory;
use crate::storage::Blob;

enum Source {
    Embedded,
    Static(&'static [u8]),
    Bytes(Vec<u8>),
    Path(PathBuf),
}

pub struct DirectoryBuilder {
    source: Source,
    eager_names: bool,
}

impl Default for DirectoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryBuilder {
    pub fn new() -> Self {
        Self {
            source: Source::Embedded,
            eager_names: false,
        }
    }

    pub fn static_bytes(mut self, bytes: &'static [u8]) -> Self {
        self.source = Source::Static(bytes);
        self
    }

    pub fn bytes(mut self, bytes: Vec<u8>) -> Self {
        self.source = Source::Bytes(bytes);
        self
    }

    /// Loads the blob from a file through a read-only memory map.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Source::Path(path.into());
        self
    }

    pub fn eager_names(mut self, eager: bool) -> Self {
        self.eager_names = eager;
        self
    }

    pub fn open(self) -> Result<Directory> {
        let directory = match self.source {
            Source::Embedded => Directory::embedded()?,
            Source::Static(bytes) => Directory::load(Blob::Static(bytes))?,
            Source::Bytes(bytes) => Directory::load(Blob::from(bytes))?,
            Source::Path(path) => Directory::load(Blob::map(path)?)?,
        };
        if self.eager_names {
            directory.names();
        }
        Ok(directory)
    }
}
