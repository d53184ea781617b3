//! # Airport Directory
//!
//! The public entry point. A `Directory` is built once by the host process,
//! usually from the blob bundled into the binary, and shared by reference
//! (`&Directory` or `Arc<Directory>`) with every caller.
//!
//! ```text
//! get / get2 / lookup(key)
//!   │
//!   ├─ Store::find(key)            exact, case-sensitive code
//!   │     └─ miss: NameIndex::resolve(key)   built on first use
//!   │                 └─ miss: not found (warn)
//!   │
//!   └─ RecordCache::fetch(handle)  decode once, then shared Arc<Airport>
//! ```
//!
//! ## Construction
//!
//! ```ignore
//! let directory = Directory::embedded()?;             // bundled blob
//! let directory = Directory::open("airports.bin")?;   // memory-mapped file
//! let directory = Directory::builder()
//!     .path("airports.bin")
//!     .eager_names(true)
//!     .open()?;
//! ```
//!
//! A corrupt blob fails construction; the host is expected to abort startup.
//! An empty blob is valid and yields a directory where every lookup misses.
//!
//! ## Thread Safety
//!
//! `Directory` is `Send + Sync`. Lookups take at most one shard lock of the
//! record cache, briefly. The name index is built exactly once behind a
//! `OnceLock`; concurrent first callers wait for that build to finish.

mod builder;


pub use builder::DirectoryBuilder;

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use eyre::{Result, WrapErr};

use crate::cache::RecordCache;
use crate::names::NameIndex;
use crate::records::{Airport, AirportKind};
use crate::storage::{Blob, Store};

static EMBEDDED_BLOB: &[u8] = include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/airports.bin"));

/// Point-in-time counters, mostly useful in tests and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryStats {
    pub records: usize,
    pub materialized: usize,
    pub decodes: u64,
    /// `None` until the name index has been built.
    pub name_keys: Option<usize>,
    pub blob_bytes: usize,
    pub index_capacity: usize,
    pub index_max_probe: usize,
}

pub struct Directory {
    store: Store,
    cache: RecordCache,
    names: OnceLock<NameIndex>,
    empty: Arc<Airport>,
}

impl Directory {
    pub fn builder() -> DirectoryBuilder {
        DirectoryBuilder::new()
    }

    /// Loads the blob bundled into this binary.
    pub fn embedded() -> Result<Self> {
        Self::load(Blob::Static(EMBEDDED_BLOB))
    }

    pub fn from_static(bytes: &'static [u8]) -> Result<Self> {
        Self::load(Blob::Static(bytes))
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Self::load(Blob::from(bytes))
    }

    /// Memory-maps a blob file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load(Blob::map(path)?)
    }

    pub(crate) fn load(blob: Blob) -> Result<Self> {
        let start = Instant::now();
        let source = blob.kind();
        let store = Store::load(blob).wrap_err("corrupt airport directory blob")?;
        let cache = RecordCache::new(store.len());

        tracing::debug!(
            source,
            records = store.len(),
            bytes = store.blob().len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "airport directory loaded"
        );

        Ok(Self {
            store,
            cache,
            names: OnceLock::new(),
            empty: Arc::new(Airport::default()),
        })
    }

    /// Returns the airport for a code or name, or the zero-value record.
    pub fn get(&self, code_or_name: &str) -> Arc<Airport> {
        self.lookup(code_or_name)
            .unwrap_or_else(|| Arc::clone(&self.empty))
    }

    /// Like [`get`](Self::get) with an explicit found flag.
    pub fn get2(&self, code_or_name: &str) -> (Arc<Airport>, bool) {
        match self.lookup(code_or_name) {
            Some(airport) => (airport, true),
            None => (Arc::clone(&self.empty), false),
        }
    }

    pub fn lookup(&self, code_or_name: &str) -> Option<Arc<Airport>> {
        let handle = self.find_handle(code_or_name)?;
        self.cache.fetch(&self.store, handle)
    }

    /// Resolves a code or free-text name to the canonical code.
    pub fn resolve_to_code(&self, text: &str) -> Option<&str> {
        self.find_handle(text).map(|handle| self.store.code(handle))
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.store.find(code).is_some()
    }

    /// All codes, or only those of large airports. Reads kinds in place
    /// without materializing records.
    pub fn codes(&self, only_large: bool) -> BTreeSet<&str> {
        let large = AirportKind::LargeAirport.tag();
        self.store
            .handles()
            .filter(|&handle| {
                !only_large
                    || self
                        .store
                        .view(handle)
                        .map(|view| view.kind_tag() == large)
                        .unwrap_or(false)
            })
            .map(|handle| self.store.code(handle))
            .collect()
    }

    /// The name index, building it on first call.
    pub fn names(&self) -> &NameIndex {
        self.names.get_or_init(|| NameIndex::build(&self.store))
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn stats(&self) -> DirectoryStats {
        DirectoryStats {
            records: self.store.len(),
            materialized: self.cache.materialized_count(),
            decodes: self.cache.decode_count(),
            name_keys: self.names.get().map(NameIndex::len),
            blob_bytes: self.store.blob().len(),
            index_capacity: self.store.index().capacity(),
            index_max_probe: self.store.index().max_probe(),
        }
    }

    fn find_handle(&self, key: &str) -> Option<u32> {
        if let Some(handle) = self.store.find(key) {
            return Some(handle);
        }
        let handle = self.names().resolve(key);
        if handle.is_none() {
            tracing::warn!(key, "airport not found");
        }
        handle
    }
}

impl std::fmt::Debug for Directory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Directory")
            .field("stats", &self.stats())
            .finish()
    }
}
