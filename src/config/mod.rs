//! # Directory Configuration Module
//!
//! Centralizes the compile-time configuration of the airport directory. Values
//! that depend on each other (header size and header layout, shard count and
//! slot addressing) live next to each other and are checked with `const`
//! assertions.
//!
//! Runtime options (which blob to load, whether to build the name index up
//! front) are set through [`crate::DirectoryBuilder`].
//!
//! ## Module Organization
//!
//! - [`constants`]: Blob format, index sizing, sharding and name-folding constants

pub mod constants;
pub use constants::*;
