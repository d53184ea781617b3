//! # Blob Sources
//!
//! A directory blob can live in three places:
//!
//! - **Static**: bundled into the binary with `include_bytes!`
//! - **Owned**: a byte buffer handed over by the caller
//! - **Mapped**: a file on disk, mapped read-only with `memmap2`
//!
//! All three expose the same `&[u8]`; the store never copies the payload.
//!
//! ## Mapped Files
//!
//! The mapping is read-only and lives as long as the directory. The file must
//! not be truncated or rewritten in place while mapped; the blob writer
//! replaces files by renaming a fully written temporary over them, which
//! leaves existing mappings of the old inode intact.

use std::fs::File;
use std::path::Path;

use eyre::{Result, WrapErr};
use memmap2::Mmap;

pub enum Blob {
    Static(&'static [u8]),
    Owned(Box<[u8]>),
    Mapped(Mmap),
}

impl Blob {
    pub fn map<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .wrap_err_with(|| format!("failed to open airport blob '{}'", path.display()))?;

        let len = file
            .metadata()
            .wrap_err_with(|| format!("failed to stat airport blob '{}'", path.display()))?
            .len();
        if len == 0 {
            // zero-length mappings are rejected on some platforms
            return Ok(Blob::Owned(Box::default()));
        }

        // SAFETY: the map is read-only and the file is only ever replaced by
        // rename, never modified in place, while a directory holds it.
        let mmap = unsafe { Mmap::map(&file) }
            .wrap_err_with(|| format!("failed to mmap airport blob '{}'", path.display()))?;

        Ok(Blob::Mapped(mmap))
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Blob::Static(bytes) => bytes,
            Blob::Owned(bytes) => bytes,
            Blob::Mapped(mmap) => mmap,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Blob::Static(_) => "static",
            Blob::Owned(_) => "owned",
            Blob::Mapped(_) => "mapped",
        }
    }
}

impl std::fmt::Debug for Blob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blob")
            .field("kind", &self.kind())
            .field("len", &self.len())
            .finish()
    }
}

impl From<Vec<u8>> for Blob {
    fn from(bytes: Vec<u8>) -> Self {
        Blob::Owned(bytes.into_boxed_slice())
    }
}

impl From<&'static [u8]> for Blob {
    fn from(bytes: &'static [u8]) -> Self {
        Blob::Static(bytes)
    }
}
