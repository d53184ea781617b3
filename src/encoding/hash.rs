//! # Code Index Hashing
//!
//! The code index hashes a small, fixed key set (three-letter IATA codes) once
//! at load time and once per lookup. FNV-1a is fixed across runs and
//! platforms, needs no per-process seed, and mixes short ASCII keys well
//! enough for a half-empty open-addressing table.

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

#[inline]
pub fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    // fold the high bits down so masking by a small capacity sees them
    hash ^ (hash >> 32)
}
