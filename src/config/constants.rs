//! # Directory Configuration Constants
//!
//! All numeric and textual configuration values for the airport directory,
//! grouped by the component that consumes them.
//!
//! ## Dependency Graph
//!
//! ```text
//! BLOB_HEADER_SIZE (32 bytes)
//!       │
//!       └─> BlobHeader layout (storage::headers), asserted at compile time
//!
//! INDEX_LOAD_FACTOR_INV (2)
//!       │
//!       └─> CodeIndex capacity = next_power_of_two(len * INDEX_LOAD_FACTOR_INV)
//!             At most half the slots are occupied, which keeps linear probe
//!             sequences short without tombstones.
//!
//! CACHE_SHARD_COUNT (64)
//!       │
//!       └─> Slot handle h lives in shard h % CACHE_SHARD_COUNT at position
//!             h / CACHE_SHARD_COUNT. Must be a power of two.
//! ```
//!
//! ## Critical Invariants
//!
//! 1. `CACHE_SHARD_COUNT` is a non-zero power of two
//! 2. `INDEX_LOAD_FACTOR_INV >= 2` (probe termination needs an empty slot)
//! 3. `MAX_RECORD_COUNT` fits below the empty-slot sentinel

// ============================================================================
// BLOB FORMAT
// ============================================================================

/// Magic bytes at the start of every directory blob.
pub const BLOB_MAGIC: &[u8; 8] = b"IATADIR\x00";

/// Current blob format version. Blobs are private to one build, so there is
/// no cross-version compatibility; any other value is rejected.
pub const BLOB_VERSION: u32 = 1;

/// Size of the fixed blob header in bytes.
pub const BLOB_HEADER_SIZE: usize = 32;

/// Upper bound on records in one blob. The worldwide IATA list is roughly
/// ten thousand entries, so this leaves ample headroom.
pub const MAX_RECORD_COUNT: u32 = 1 << 24;

// ============================================================================
// RECORD LAYOUT
// ============================================================================

/// Bytes before the first length-prefixed string: kind tag + lat + lon.
pub const RECORD_FIXED_SIZE: usize = 1 + 8 + 8;

/// Number of length-prefixed strings following the fixed section.
pub const RECORD_STRING_COUNT: usize = 12;

/// Largest single string field accepted by the decoder.
pub const MAX_FIELD_LEN: u64 = 64 * 1024;

// ============================================================================
// CODE INDEX
// ============================================================================

/// Inverse of the maximum code index load factor.
pub const INDEX_LOAD_FACTOR_INV: usize = 2;

/// Slot value marking an empty index position.
pub const INDEX_EMPTY_SLOT: u32 = u32::MAX;

/// Smallest index capacity, so an empty directory still probes correctly.
pub const INDEX_MIN_CAPACITY: usize = 8;

// ============================================================================
// SHARDING CONSTANTS
// ============================================================================

/// Number of shards in the materialization cache.
/// Higher values reduce write-back contention but add per-shard overhead.
pub const CACHE_SHARD_COUNT: usize = 64;

// ============================================================================
// NAME RESOLUTION
// ============================================================================

/// Suffix stripped from lookup input before token fallback.
pub const INTL_SUFFIX: &str = "-intl";

/// Separators used to split a folded municipality into fragments.
pub const MUNICIPALITY_SEPARATORS: &[char] = &['/', '-', ' ', ','];

/// Separators used to split lookup input into fallback tokens.
pub const LOOKUP_SEPARATORS: &[char] = &['-', ' '];

const _: () = assert!(
    CACHE_SHARD_COUNT.is_power_of_two(),
    "CACHE_SHARD_COUNT must be a power of two"
);

const _: () = assert!(
    INDEX_LOAD_FACTOR_INV >= 2,
    "code index needs at least one empty slot per probe sequence"
);

const _: () = assert!(
    MAX_RECORD_COUNT < INDEX_EMPTY_SLOT,
    "record handles must not collide with the empty-slot sentinel"
);

const _: () = assert!(
    INDEX_MIN_CAPACITY.is_power_of_two(),
    "INDEX_MIN_CAPACITY must be a power of two"
);
