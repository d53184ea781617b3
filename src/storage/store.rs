//! # Directory Store
//!
//! The store owns the blob bytes and the code index over them. It is built
//! once, in O(n), and is immutable afterwards.
//!
//! ## Load Sequence
//!
//! 1. Empty blob: valid, yields an empty store (a build without bundled data)
//! 2. Parse and validate the header (magic, version)
//! 3. Verify payload length and CRC-32
//! 4. Walk the `varint(len) + record` frames, validating each record's kind
//!    tag and string fields through a [`RecordView`] and reading its code
//! 5. Build the [`CodeIndex`] over the collected codes
//!
//! Any failure in steps 2-5 is a corrupt-blob error. Records are addressed by
//! a stable `u32` handle: their position in the blob.

use eyre::{ensure, Result, WrapErr};

use crate::config::{BLOB_HEADER_SIZE, MAX_RECORD_COUNT};
use crate::encoding::decode_varint;
use crate::records::RecordView;
use crate::storage::blob::Blob;
use crate::storage::headers::BlobHeader;
use crate::storage::index::CodeIndex;

#[derive(Debug, Clone, Copy)]
struct Span {
    start: u32,
    len: u32,
}

#[derive(Debug)]
pub struct Store {
    blob: Blob,
    codes: Vec<Box<str>>,
    spans: Vec<Span>,
    index: CodeIndex,
}

impl Store {
    pub fn load(blob: Blob) -> Result<Self> {
        let bytes = blob.as_bytes();
        if bytes.is_empty() {
            return Ok(Self {
                index: CodeIndex::build::<&str>(&[])?,
                blob,
                codes: Vec::new(),
                spans: Vec::new(),
            });
        }

        ensure!(
            bytes.len() <= u32::MAX as usize,
            "airport blob too large: {} bytes",
            bytes.len()
        );

        let header = BlobHeader::from_bytes(bytes)?;
        let record_count = header.record_count();
        ensure!(
            record_count <= MAX_RECORD_COUNT,
            "record count {} exceeds limit {}",
            record_count,
            MAX_RECORD_COUNT
        );

        let payload = &bytes[BLOB_HEADER_SIZE..];
        header.verify_payload(payload)?;

        let mut codes = Vec::with_capacity(record_count as usize);
        let mut spans = Vec::with_capacity(record_count as usize);
        let mut pos = 0usize;
        for idx in 0..record_count {
            let (len, read) = decode_varint(&payload[pos..])
                .wrap_err_with(|| format!("bad frame length for record {}", idx))?;
            let start = pos + read;
            let end = start
                .checked_add(len as usize)
                .filter(|&end| end <= payload.len())
                .ok_or_else(|| {
                    eyre::eyre!("record {} overruns payload ({} bytes at {})", idx, len, start)
                })?;

            let record = &payload[start..end];
            let view = RecordView::new(record)
                .and_then(|view| view.validate().map(|_| view))
                .wrap_err_with(|| format!("malformed record {}", idx))?;
            let code = view
                .code()
                .wrap_err_with(|| format!("malformed code in record {}", idx))?;
            ensure!(!code.is_empty(), "record {} has an empty airport code", idx);

            codes.push(Box::<str>::from(code));
            spans.push(Span {
                start: (BLOB_HEADER_SIZE + start) as u32,
                len: len as u32,
            });
            pos = end;
        }
        ensure!(
            pos == payload.len(),
            "{} trailing bytes after {} records",
            payload.len() - pos,
            record_count
        );

        let index = CodeIndex::build(&codes)?;

        Ok(Self {
            blob,
            codes,
            spans,
            index,
        })
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Exact, case-sensitive code lookup.
    pub fn find(&self, code: &str) -> Option<u32> {
        self.index.find(code, &self.codes)
    }

    pub fn code(&self, handle: u32) -> &str {
        &self.codes[handle as usize]
    }

    pub fn record_bytes(&self, handle: u32) -> &[u8] {
        let span = self.spans[handle as usize];
        let start = span.start as usize;
        &self.blob.as_bytes()[start..start + span.len as usize]
    }

    /// Zero-copy view of a record. Every record passed `RecordView::new` at
    /// load time, so this only fails if the blob changed underneath us.
    pub fn view(&self, handle: u32) -> Result<RecordView<'_>> {
        RecordView::new(self.record_bytes(handle))
    }

    pub fn handles(&self) -> impl Iterator<Item = u32> {
        0..self.codes.len() as u32
    }

    pub fn blob(&self) -> &Blob {
        &self.blob
    }

    pub fn index(&self) -> &CodeIndex {
        &self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Airport, AirportKind};
    use crate::storage::writer::BlobWriter;
    use zerocopy::IntoBytes;

    fn airport(code: &str, municipality: &str) -> Airport {
        Airport {
            code: code.into(),
            municipality: municipality.into(),
            kind: AirportKind::MediumAirport,
            ..Airport::default()
        }
    }

    fn blob_of(airports: &[Airport]) -> Vec<u8> {
        let mut writer = BlobWriter::new();
        for a in airports {
            writer.push(a).unwrap();
        }
        writer.finish()
    }

    #[test]
    fn empty_blob_loads_as_empty_store() {
        let store = Store::load(Blob::from(Vec::new())).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.find("BUD"), None);
    }

    #[test]
    fn blob_with_zero_records_loads() {
        let store = Store::load(Blob::from(blob_of(&[]))).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn records_are_addressable_by_code() {
        let bytes = blob_of(&[airport("BUD", "Budapest"), airport("VIE", "Vienna")]);
        let store = Store::load(Blob::from(bytes)).unwrap();

        assert_eq!(store.len(), 2);
        let vie = store.find("VIE").unwrap();
        assert_eq!(store.code(vie), "VIE");
        assert_eq!(store.view(vie).unwrap().municipality().unwrap(), "Vienna");
        assert_eq!(store.find("vie"), None);
    }

    #[test]
    fn rejects_corrupted_payload() {
        let mut bytes = blob_of(&[airport("BUD", "Budapest")]);
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        let err = Store::load(Blob::from(bytes)).unwrap_err();
        assert!(err.to_string().contains("checksum"));
    }

    #[test]
    fn rejects_truncated_blob() {
        let mut bytes = blob_of(&[airport("BUD", "Budapest")]);
        bytes.truncate(bytes.len() - 4);
        let err = Store::load(Blob::from(bytes)).unwrap_err();
        assert!(err.to_string().contains("length mismatch"));
    }

    #[test]
    fn rejects_record_count_beyond_payload() {
        let payload = blob_of(&[airport("BUD", "Budapest")])[BLOB_HEADER_SIZE..].to_vec();
        let mut bytes = BlobHeader::new(2, &payload).as_bytes().to_vec();
        bytes.extend_from_slice(&payload);
        assert!(Store::load(Blob::from(bytes)).is_err());
    }

    #[test]
    fn rejects_trailing_frames() {
        let payload = blob_of(&[airport("BUD", "Budapest"), airport("VIE", "Vienna")])
            [BLOB_HEADER_SIZE..]
            .to_vec();
        let mut bytes = BlobHeader::new(1, &payload).as_bytes().to_vec();
        bytes.extend_from_slice(&payload);
        let err = Store::load(Blob::from(bytes)).unwrap_err();
        assert!(err.to_string().contains("trailing"));
    }

    #[test]
    fn rejects_empty_code() {
        let mut record = Vec::new();
        crate::records::encode_record(&airport("", "Nowhere"), &mut record).unwrap();
        let mut payload = Vec::new();
        crate::encoding::put_varint(&mut payload, record.len() as u64);
        payload.extend_from_slice(&record);

        let mut bytes = BlobHeader::new(1, &payload).as_bytes().to_vec();
        bytes.extend_from_slice(&payload);
        let err = Store::load(Blob::from(bytes)).unwrap_err();
        assert!(err.to_string().contains("empty airport code"));
    }

    fn blob_with_record(record: &[u8]) -> Vec<u8> {
        let mut payload = Vec::new();
        crate::encoding::put_varint(&mut payload, record.len() as u64);
        payload.extend_from_slice(record);
        let mut bytes = BlobHeader::new(1, &payload).as_bytes().to_vec();
        bytes.extend_from_slice(&payload);
        bytes
    }

    #[test]
    fn rejects_unknown_kind_tag() {
        let mut record = Vec::new();
        crate::records::encode_record(&airport("BUD", "Budapest"), &mut record).unwrap();
        record[0] = 200;

        let err = Store::load(Blob::from(blob_with_record(&record))).unwrap_err();
        assert!(format!("{:#}", err).contains("unknown airport kind tag"));
    }

    #[test]
    fn rejects_invalid_utf8_field() {
        let bud = Airport {
            name: "Budapest".into(),
            ..airport("BUD", "Budapest")
        };
        let mut record = Vec::new();
        crate::records::encode_record(&bud, &mut record).unwrap();
        let at = record
            .windows(b"Budapest".len())
            .position(|w| w == b"Budapest")
            .unwrap();
        record[at] = 0xFF;

        let err = Store::load(Blob::from(blob_with_record(&record))).unwrap_err();
        assert!(format!("{:#}", err).contains("invalid UTF-8"));
    }

    #[test]
    fn rejects_duplicate_codes() {
        let mut payload = Vec::new();
        for _ in 0..2 {
            let mut record = Vec::new();
            crate::records::encode_record(&airport("BUD", "Budapest"), &mut record).unwrap();
            crate::encoding::put_varint(&mut payload, record.len() as u64);
            payload.extend_from_slice(&record);
        }
        let mut bytes = BlobHeader::new(2, &payload).as_bytes().to_vec();
        bytes.extend_from_slice(&payload);
        let err = Store::load(Blob::from(bytes)).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }
}
