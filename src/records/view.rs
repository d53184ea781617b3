//! # RecordView - Zero-Copy Record Access
//!
//! `RecordView` reads a serialized record in place. Construction walks the
//! string section once and remembers each field's bounds, so every accessor
//! afterwards is a slice operation.
//!
//! The store uses views at load time to pull the code out of each record, and
//! the name index uses them to read `name` and `municipality` without
//! materializing a full `Airport`.
//!
//! ## Usage
//!
//! ```ignore
//! let view = RecordView::new(bytes)?;
//! let code: &str = view.code()?;      // borrowed from `bytes`
//! let kind = view.kind()?;            // fixed offset
//! ```

use eyre::{ensure, eyre, Result, WrapErr};

use crate::config::{MAX_FIELD_LEN, RECORD_FIXED_SIZE, RECORD_STRING_COUNT};
use crate::encoding::decode_varint;
use crate::records::airport::AirportKind;

/// String fields of a record, in serialization order.
#[repr(usize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Code = 0,
    Ident,
    Name,
    Continent,
    Country,
    Region,
    Municipality,
    GpsCode,
    LocalCode,
    Home,
    Wikipedia,
    TimeZone,
}

impl Field {
    pub const ALL: [Field; RECORD_STRING_COUNT] = [
        Field::Code,
        Field::Ident,
        Field::Name,
        Field::Continent,
        Field::Country,
        Field::Region,
        Field::Municipality,
        Field::GpsCode,
        Field::LocalCode,
        Field::Home,
        Field::Wikipedia,
        Field::TimeZone,
    ];
}

const KIND_OFFSET: usize = 0;
const LAT_OFFSET: usize = 1;
const LON_OFFSET: usize = 9;

#[derive(Debug, Clone, Copy)]
pub struct RecordView<'a> {
    data: &'a [u8],
    bounds: [(u32, u32); RECORD_STRING_COUNT],
}

impl<'a> RecordView<'a> {
    pub fn new(data: &'a [u8]) -> Result<Self> {
        ensure!(
            data.len() >= RECORD_FIXED_SIZE,
            "record too small for fixed section: {} < {}",
            data.len(),
            RECORD_FIXED_SIZE
        );

        let mut bounds = [(0u32, 0u32); RECORD_STRING_COUNT];
        let mut pos = RECORD_FIXED_SIZE;
        for (idx, slot) in bounds.iter_mut().enumerate() {
            let (len, read) = decode_varint(&data[pos..])
                .wrap_err_with(|| format!("bad length prefix for field {}", idx))?;
            ensure!(
                len <= MAX_FIELD_LEN,
                "field {} length {} exceeds limit {}",
                idx,
                len,
                MAX_FIELD_LEN
            );
            let start = pos + read;
            let end = start + len as usize;
            ensure!(
                end <= data.len(),
                "field {} overruns record: {} > {}",
                idx,
                end,
                data.len()
            );
            *slot = (start as u32, end as u32);
            pos = end;
        }
        ensure!(
            pos == data.len(),
            "{} trailing bytes after record",
            data.len() - pos
        );

        Ok(Self { data, bounds })
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn kind_tag(&self) -> u8 {
        self.data[KIND_OFFSET]
    }

    pub fn kind(&self) -> Result<AirportKind> {
        let tag = self.kind_tag();
        AirportKind::from_tag(tag).ok_or_else(|| eyre!("unknown airport kind tag: {}", tag))
    }

    pub fn lat(&self) -> f64 {
        self.read_f64(LAT_OFFSET)
    }

    pub fn lon(&self) -> f64 {
        self.read_f64(LON_OFFSET)
    }

    pub fn raw(&self, field: Field) -> &'a [u8] {
        let (start, end) = self.bounds[field as usize];
        &self.data[start as usize..end as usize]
    }

    pub fn text(&self, field: Field) -> Result<&'a str> {
        std::str::from_utf8(self.raw(field))
            .map_err(|e| eyre!("invalid UTF-8 in field {:?}: {}", field, e))
    }

    pub fn code(&self) -> Result<&'a str> {
        self.text(Field::Code)
    }

    pub fn name(&self) -> Result<&'a str> {
        self.text(Field::Name)
    }

    pub fn municipality(&self) -> Result<&'a str> {
        self.text(Field::Municipality)
    }

    /// Checks everything `decode_record` checks beyond framing: the kind tag
    /// and UTF-8 of every string field.
    pub fn validate(&self) -> Result<()> {
        self.kind()?;
        for field in Field::ALL {
            self.text(field)?;
        }
        Ok(())
    }

    fn read_f64(&self, offset: usize) -> f64 {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&self.data[offset..offset + 8]);
        f64::from_le_bytes(bytes)
    }
}
