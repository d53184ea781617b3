//! # Record Codec
//!
//! `encode_record` is used by the blob writer; `decode_record` runs at lookup
//! time, at most once per record, from the materialization cache.
//!
//! Decoding is a pure function of its input: the same bytes always decode to
//! equal records, so racing decodes of one record are harmless. Bytes produced
//! by `encode_record` always decode. Anything else is rejected with an error
//! rather than a panic. `Store::load` runs the same checks through
//! `RecordView::validate`, so a loaded record always decodes.

use eyre::{ensure, Result};

use crate::config::MAX_FIELD_LEN;
use crate::encoding::put_varint;
use crate::records::airport::{resolve_zone, Airport};
use crate::records::view::{Field, RecordView};

/// Appends the serialized form of `airport` to `out`.
pub fn encode_record(airport: &Airport, out: &mut Vec<u8>) -> Result<()> {
    for (idx, field) in airport.fields().iter().enumerate() {
        ensure!(
            field.len() as u64 <= MAX_FIELD_LEN,
            "field {} of {} is {} bytes, limit is {}",
            idx,
            airport.code,
            field.len(),
            MAX_FIELD_LEN
        );
    }

    out.push(airport.kind.tag());
    out.extend_from_slice(&airport.lat.to_le_bytes());
    out.extend_from_slice(&airport.lon.to_le_bytes());
    for field in airport.fields() {
        put_varint(out, field.len() as u64);
        out.extend_from_slice(field.as_bytes());
    }
    Ok(())
}

/// Materializes a serialized record, resolving its time zone.
pub fn decode_record(bytes: &[u8]) -> Result<Airport> {
    let view = RecordView::new(bytes)?;
    let text = |field: Field| view.text(field).map(str::to_owned);

    let time_zone = text(Field::TimeZone)?;
    let location = resolve_zone(&time_zone);

    Ok(Airport {
        code: text(Field::Code)?,
        ident: text(Field::Ident)?,
        name: text(Field::Name)?,
        kind: view.kind()?,
        continent: text(Field::Continent)?,
        country: text(Field::Country)?,
        region: text(Field::Region)?,
        municipality: text(Field::Municipality)?,
        gps_code: text(Field::GpsCode)?,
        local_code: text(Field::LocalCode)?,
        home: text(Field::Home)?,
        wikipedia: text(Field::Wikipedia)?,
        time_zone,
        lat: view.lat(),
        lon: view.lon(),
        location,
    })
}
