//! # Airport Records and Their Binary Form
//!
//! This module defines the canonical airport entity and its compact binary
//! encoding. Records are stored serialized inside the directory blob and are
//! materialized one at a time, on first access.
//!
//! ## Record Binary Layout
//!
//! ```text
//! +--------+-----------+-----------+-------------------------------------------+
//! | Kind   | Latitude  | Longitude | 12 x (varint length + UTF-8 bytes)         |
//! | u8     | f64 LE    | f64 LE    | code, ident, name, continent, country,     |
//! |        |           |           | region, municipality, gps_code, local_code,|
//! |        |           |           | home, wikipedia, time_zone                 |
//! +--------+-----------+-----------+-------------------------------------------+
//! ```
//!
//! The fixed section comes first so `kind` and the coordinates are readable
//! at constant offsets. The string section is walked once by [`RecordView`],
//! which records every field's bounds so later accessors are O(1).
//!
//! ## Module Structure
//!
//! - `airport`: `Airport` entity and `AirportKind`
//! - `view`: `RecordView` for zero-copy reads of serialized records
//! - `codec`: `encode_record` / `decode_record`

pub mod airport;
pub mod codec;
pub mod view;


pub use airport::{Airport, AirportKind};
pub use codec::{decode_record, encode_record};
pub use view::{Field, RecordView};
