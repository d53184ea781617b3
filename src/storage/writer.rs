//! # Blob Writer
//!
//! Serializes airport records into the blob format read by [`Store`]. This is
//! the last step of dataset generation: whatever produced the records
//! (downloading and enriching the public airport list) happens elsewhere.
//!
//! Records are written in the order they are pushed, and that order is
//! visible at runtime: the name index is built by scanning records in blob
//! order, so on a token collision the record pushed last wins.
//!
//! ## Usage
//!
//! ```ignore
//! let mut writer = BlobWriter::new();
//! for airport in &airports {
//!     writer.push(airport)?;
//! }
//! writer.write_to("data/airports.bin")?;
//! ```
//!
//! [`Store`]: crate::storage::Store

use std::io::Write;
use std::path::Path;

use eyre::{ensure, Result, WrapErr};
use hashbrown::HashSet;
use tempfile::NamedTempFile;
use zerocopy::IntoBytes;

use crate::config::MAX_RECORD_COUNT;
use crate::encoding::put_varint;
use crate::records::{encode_record, Airport};
use crate::storage::headers::BlobHeader;

#[derive(Debug, Default)]
pub struct BlobWriter {
    payload: Vec<u8>,
    scratch: Vec<u8>,
    codes: HashSet<String>,
    record_count: u32,
}

impl BlobWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one record. Empty and repeated codes are rejected.
    pub fn push(&mut self, airport: &Airport) -> Result<()> {
        ensure!(!airport.code.is_empty(), "airport without a code: {:?}", airport.name);
        ensure!(
            !self.codes.contains(airport.code.as_str()),
            "duplicate airport code {:?}",
            airport.code
        );
        ensure!(
            self.record_count < MAX_RECORD_COUNT,
            "blob is full ({} records)",
            MAX_RECORD_COUNT
        );

        self.scratch.clear();
        encode_record(airport, &mut self.scratch)?;
        put_varint(&mut self.payload, self.scratch.len() as u64);
        self.payload.extend_from_slice(&self.scratch);

        self.codes.insert(airport.code.clone());
        self.record_count += 1;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.record_count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    /// Returns the complete blob: header followed by payload.
    pub fn finish(self) -> Vec<u8> {
        let header = BlobHeader::new(self.record_count, &self.payload);
        let mut out = Vec::with_capacity(header.as_bytes().len() + self.payload.len());
        out.extend_from_slice(header.as_bytes());
        out.extend_from_slice(&self.payload);
        out
    }

    /// Writes the blob to `path`, replacing any existing file atomically.
    ///
    /// The bytes go to a uniquely named temporary file in the same directory,
    /// which is synced and then renamed over `path`. On failure the temporary
    /// file is removed.
    pub fn write_to<P: AsRef<Path>>(self, path: P) -> Result<()> {
        let path = path.as_ref();
        let record_count = self.record_count;
        let bytes = self.finish();

        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(parent)
            .wrap_err_with(|| format!("failed to create temporary file in '{}'", parent.display()))?;
        tmp.write_all(&bytes)
            .and_then(|_| tmp.as_file().sync_all())
            .wrap_err_with(|| format!("failed to write '{}'", tmp.path().display()))?;

        tmp.persist(path)
            .map_err(|e| e.error)
            .wrap_err_with(|| format!("failed to replace '{}'", path.display()))?;

        tracing::debug!(
            path = %path.display(),
            records = record_count,
            bytes = bytes.len(),
            "airport blob written"
        );
        Ok(())
    }
}

/// Serializes `airports` into a blob in iteration order.
pub fn encode_blob<'a, I>(airports: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a Airport>,
{
    let mut writer = BlobWriter::new();
    for airport in airports {
        writer.push(airport)?;
    }
    Ok(writer.finish())
}
