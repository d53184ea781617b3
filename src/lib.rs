//! # iata-directory - Embedded Airport Directory
//!
//! A read-mostly lookup service mapping an IATA code, a city name, or a
//! fragment of an airport name to a canonical airport record: code,
//! coordinates, country, and time zone. Fare clients use it to attach a time
//! zone to "local time" timestamps and to turn scraped destination labels
//! into codes.
//!
//! - **Compact**: records stay in a checksummed binary blob, embedded in the
//!   binary or memory-mapped from disk
//! - **Lazy**: a record is decoded the first time it is asked for, once
//! - **Concurrent**: one shared `Directory` serves any number of threads
//!
//! ## Quick Start
//!
//! ```ignore
//! use iata_directory::Directory;
//!
//! let directory = Directory::embedded()?;
//!
//! let (bud, found) = directory.get2("BUD");
//! assert!(found);
//! let arrival = bud.parse_local_time("2024-07-01T10:05:00", "%Y-%m-%dT%H:%M:%S")?;
//!
//! assert_eq!(directory.resolve_to_code("Budapest"), Some("BUD"));
//! let hubs = directory.codes(true);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Directory (get / get2 / codes)    │
//! ├──────────────────┬──────────────────┤
//! │  Record Cache    │   Name Index     │
//! │  (lazy decode)   │   (built once)   │
//! ├──────────────────┴──────────────────┤
//! │  Store: blob header + code index    │
//! ├─────────────────────────────────────┤
//! │  Record codec + varint encoding     │
//! └─────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`directory`]: public facade and builder
//! - [`cache`]: sharded slot arena, serialized -> materialized
//! - [`names`]: text folding and the name -> code index
//! - [`storage`]: blob sources, header, code index, writer
//! - [`records`]: `Airport` and its binary codec
//! - [`encoding`]: varints and key hashing
//! - [`config`]: compile-time constants

#[macro_use]
mod macros;

pub mod cache;
pub mod config;
pub mod directory;
pub mod encoding;
pub mod names;
pub mod records;
pub mod storage;

pub use directory::{Directory, DirectoryBuilder, DirectoryStats};
pub use records::{Airport, AirportKind};
pub use storage::{encode_blob, BlobWriter};
