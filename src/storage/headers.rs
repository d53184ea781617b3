//! # Blob Header
//!
//! Every directory blob starts with a fixed 32-byte header, read in place
//! through zerocopy:
//!
//! ```text
//! +----------------+---------+--------------+-------------+-------------+----------+
//! | magic [u8; 8]  | version | record_count | payload_len | payload_crc | reserved |
//! | "IATADIR\0"    | u32 LE  | u32 LE       | u64 LE      | u32 LE      | [u8; 4]  |
//! +----------------+---------+--------------+-------------+-------------+----------+
//! ```
//!
//! The payload that follows is `record_count` frames of
//! `varint(len) + record bytes`. `payload_crc` is CRC-32/ISCSI over the whole
//! payload; a mismatch means the embedded data is corrupt.
//!
//! The header struct is `Unaligned`, so it can be read straight out of an
//! `include_bytes!` array or a memory map with no copying.

use crc::{Crc, CRC_32_ISCSI};
use eyre::{ensure, Result};
use zerocopy::little_endian::{U32, U64};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::config::{BLOB_HEADER_SIZE, BLOB_MAGIC, BLOB_VERSION};

pub const PAYLOAD_CRC: Crc<u32> = Crc::<u32>::new(&CRC_32_ISCSI);

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct BlobHeader {
    magic: [u8; 8],
    version: U32,
    record_count: U32,
    payload_len: U64,
    payload_crc: U32,
    reserved: [u8; 4],
}

const _: () = assert!(std::mem::size_of::<BlobHeader>() == BLOB_HEADER_SIZE);

impl BlobHeader {
    pub fn new(record_count: u32, payload: &[u8]) -> Self {
        Self {
            magic: *BLOB_MAGIC,
            version: U32::new(BLOB_VERSION),
            record_count: U32::new(record_count),
            payload_len: U64::new(payload.len() as u64),
            payload_crc: U32::new(PAYLOAD_CRC.checksum(payload)),
            reserved: [0u8; 4],
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<&Self> {
        ensure!(
            bytes.len() >= BLOB_HEADER_SIZE,
            "blob too small for header: {} < {}",
            bytes.len(),
            BLOB_HEADER_SIZE
        );

        let header = Self::ref_from_bytes(&bytes[..BLOB_HEADER_SIZE])
            .map_err(|e| eyre::eyre!("failed to parse BlobHeader: {:?}", e))?;

        ensure!(&header.magic == BLOB_MAGIC, "invalid magic bytes in airport blob");
        ensure!(
            header.version.get() == BLOB_VERSION,
            "unsupported blob version: {} (expected {})",
            header.version.get(),
            BLOB_VERSION
        );

        Ok(header)
    }

    header_getters! {
        version: u32,
        record_count: u32,
        payload_len: u64,
        payload_crc: u32,
    }

    /// Checks `payload` against the recorded length and checksum.
    pub fn verify_payload(&self, payload: &[u8]) -> Result<()> {
        ensure!(
            payload.len() as u64 == self.payload_len(),
            "payload length mismatch: header says {}, blob has {}",
            self.payload_len(),
            payload.len()
        );
        let actual = PAYLOAD_CRC.checksum(payload);
        ensure!(
            actual == self.payload_crc(),
            "payload checksum mismatch: expected {:#010x}, got {:#010x}",
            self.payload_crc(),
            actual
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes(record_count: u32, payload: &[u8]) -> Vec<u8> {
        BlobHeader::new(record_count, payload).as_bytes().to_vec()
    }

    #[test]
    fn header_reads_back_what_was_written() {
        let payload = b"some payload";
        let bytes = header_bytes(3, payload);
        let header = BlobHeader::from_bytes(&bytes).unwrap();

        assert_eq!(header.version(), BLOB_VERSION);
        assert_eq!(header.record_count(), 3);
        assert_eq!(header.payload_len(), payload.len() as u64);
        header.verify_payload(payload).unwrap();
    }

    #[test]
    fn header_rejects_bad_magic() {
        let mut bytes = header_bytes(0, b"");
        bytes[0] = b'X';
        let err = BlobHeader::from_bytes(&bytes).unwrap_err();
        assert!(err.to_string().contains("magic"));
    }

    #[test]
    fn header_rejects_other_versions() {
        let mut bytes = header_bytes(0, b"");
        bytes[8] = 2;
        let err = BlobHeader::from_bytes(&bytes).unwrap_err();
        assert!(err.to_string().contains("unsupported blob version"));
    }

    #[test]
    fn header_rejects_short_buffer() {
        let err = BlobHeader::from_bytes(&[0u8; 10]).unwrap_err();
        assert!(err.to_string().contains("too small"));
    }

    #[test]
    fn verify_detects_flipped_payload_bit() {
        let payload = b"payload".to_vec();
        let bytes = header_bytes(1, &payload);
        let header = BlobHeader::from_bytes(&bytes).unwrap();

        let mut corrupted = payload.clone();
        corrupted[0] ^= 0x01;
        let err = header.verify_payload(&corrupted).unwrap_err();
        assert!(err.to_string().contains("checksum"));
    }
}
