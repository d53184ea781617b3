//! # Storage Layer
//!
//! The immutable half of the directory: blob bytes, their header, the record
//! frames inside, and the code index over them.
//!
//! ```text
//! Blob (static | owned | mmap)
//!   └─ BlobHeader (32 bytes, zerocopy)
//!   └─ payload: [varint len][record] [varint len][record] ...
//!
//! Store
//!   ├─ codes:  Vec<Box<str>>      handle -> code
//!   ├─ spans:  Vec<Span>          handle -> record bytes in blob
//!   └─ index:  CodeIndex          code   -> handle
//! ```
//!
//! ## Module Structure
//!
//! - `blob`: where the bytes live
//! - `headers`: blob header layout and checksum
//! - `index`: fixed-key open-addressing code index
//! - `store`: load-time validation and handle-based access
//! - `writer`: producing blobs

pub mod blob;
pub mod headers;
pub mod index;
pub mod store;
pub mod writer;

pub use blob::Blob;
pub use headers::BlobHeader;
pub use index::CodeIndex;
pub use store::Store;
pub use writer::{encode_blob, BlobWriter};
