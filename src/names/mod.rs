//! # Name Resolution
//!
//! Resolves human-entered text (city names, airport names, scraped
//! destination labels) to a directory record when it is not an exact code.
//!
//! ## Module Structure
//!
//! - `fold`: text normalization and noise-word rules
//! - `index`: the token -> record index and the lookup fallback chain

pub mod fold;
pub mod index;

pub use fold::fold;
pub use index::NameIndex;
