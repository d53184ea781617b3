//! # Code Index
//!
//! A fixed-key hash table from IATA code to record handle, built once when a
//! blob is loaded and never modified afterwards.
//!
//! ## Layout
//!
//! ```text
//! slots: [u32; capacity]     capacity = next_pow2(len * INDEX_LOAD_FACTOR_INV)
//!        │
//!        ├─ INDEX_EMPTY_SLOT  -> probe sequence ends, key absent
//!        └─ handle            -> compare keys[handle] with the probe key
//! ```
//!
//! Keys are hashed with a fixed FNV-1a function and placed by linear probing.
//! Because the key set is known up front and nothing is ever removed, there
//! are no tombstones: a lookup stops at the first empty slot. With the table
//! at most half full, expected probe length stays close to one.
//!
//! Each slot is a 4-byte handle; the keys themselves are owned by the store,
//! so the table adds `4 * capacity` bytes on top of the key list.

use eyre::{bail, Result};

use crate::config::{INDEX_EMPTY_SLOT, INDEX_LOAD_FACTOR_INV, INDEX_MIN_CAPACITY, MAX_RECORD_COUNT};
use crate::encoding::fnv1a;

#[derive(Debug)]
pub struct CodeIndex {
    slots: Box<[u32]>,
    mask: usize,
    max_probe: usize,
}

impl CodeIndex {
    /// Builds the index over `keys`; handle `i` refers to `keys[i]`.
    ///
    /// Duplicate keys are rejected: codes are the directory's primary key.
    pub fn build<K: AsRef<str>>(keys: &[K]) -> Result<Self> {
        if keys.len() as u64 > MAX_RECORD_COUNT as u64 {
            bail!(
                "too many records for code index: {} > {}",
                keys.len(),
                MAX_RECORD_COUNT
            );
        }

        let capacity = (keys.len() * INDEX_LOAD_FACTOR_INV)
            .next_power_of_two()
            .max(INDEX_MIN_CAPACITY);
        let mask = capacity - 1;
        let mut slots = vec![INDEX_EMPTY_SLOT; capacity].into_boxed_slice();
        let mut max_probe = 0;

        for (handle, key) in keys.iter().enumerate() {
            let key = key.as_ref();
            let mut pos = Self::home(key, mask);
            let mut probe = 0;
            loop {
                let occupant = slots[pos];
                if occupant == INDEX_EMPTY_SLOT {
                    slots[pos] = handle as u32;
                    break;
                }
                if keys[occupant as usize].as_ref() == key {
                    bail!(
                        "duplicate airport code {:?} (records {} and {})",
                        key,
                        occupant,
                        handle
                    );
                }
                pos = (pos + 1) & mask;
                probe += 1;
            }
            max_probe = max_probe.max(probe);
        }

        Ok(Self {
            slots,
            mask,
            max_probe,
        })
    }

    /// Finds the handle for `key`. `keys` must be the slice the index was built from.
    pub fn find<K: AsRef<str>>(&self, key: &str, keys: &[K]) -> Option<u32> {
        let mut pos = Self::home(key, self.mask);
        for _ in 0..=self.max_probe {
            let occupant = self.slots[pos];
            if occupant == INDEX_EMPTY_SLOT {
                return None;
            }
            if keys[occupant as usize].as_ref() == key {
                return Some(occupant);
            }
            pos = (pos + 1) & self.mask;
        }
        None
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Longest displacement of any key from its home slot.
    pub fn max_probe(&self) -> usize {
        self.max_probe
    }

    #[inline]
    fn home(key: &str, mask: usize) -> usize {
        fnv1a(key.as_bytes()) as usize & mask
    }
}
