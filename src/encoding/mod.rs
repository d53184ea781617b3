//! # Encoding Module
//!
//! Low-level encoding helpers shared by the record codec and the blob store:
//!
//! - **Varint encoding**: length prefixes for record frames and string fields
//! - **Key hashing**: the fixed hash function behind the code index

pub mod hash;
pub mod varint;

pub use hash::fnv1a;
pub use varint::{decode_varint, put_varint, varint_len};
