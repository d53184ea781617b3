//! # Internal Macros
//!
//! ## header_getters!
//!
//! Generates read accessors for zerocopy header fields stored as
//! little-endian wrapper types (`U32`, `U64`). Blob headers are only ever
//! read in place or built whole by the writer, so no setters are generated.
//!
//! ```ignore
//! impl BlobHeader {
//!     header_getters! {
//!         version: u32,
//!         payload_len: u64,
//!     }
//! }
//!
//! // Generates:
//! // pub fn version(&self) -> u32 { self.version.get() }
//! // pub fn payload_len(&self) -> u64 { self.payload_len.get() }
//! ```

macro_rules! header_getters {
    ($($field:ident : $native_ty:ty),* $(,)?) => {
        $(
            #[inline]
            pub fn $field(&self) -> $native_ty {
                self.$field.get()
            }
        )*
    };
}
