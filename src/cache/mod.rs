//! # Lazy Materialization Cache
//!
//! Every record starts out serialized inside the blob. The first lookup of a
//! record decodes it and stores the decoded `Airport` in the record's slot;
//! later lookups return the stored value without touching the codec.
//!
//! ## Slot Arena
//!
//! Slots are addressed by the store's record handle and split across
//! `CACHE_SHARD_COUNT` shards, each behind its own `parking_lot::RwLock`:
//!
//! ```text
//! RecordCache
//! ├── Shard 0:  RwLock<Vec<Slot>>   handles 0, 64, 128, ...
//! ├── Shard 1:  RwLock<Vec<Slot>>   handles 1, 65, 129, ...
//! ├── ...
//! └── Shard 63: RwLock<Vec<Slot>>
//!
//! Slot = Serialized | Materialized(Arc<Airport>)
//! ```
//!
//! ## Fetch Protocol
//!
//! 1. Shared lock on the shard; a materialized slot is cloned out and returned
//! 2. Otherwise release the lock and decode from the blob, outside any lock
//! 3. Exclusive lock on the shard only for the write-back:
//!    - slot still serialized: store the decoded record, return it
//!    - slot already materialized by a racing fetch: return that value and
//!      drop ours
//!
//! Decoding is pure, so a lost race only wastes one decode. Readers never see
//! a half-written slot because the variant is replaced under the write lock.
//!
//! ## Thread Safety
//!
//! - `RecordCache` is `Send + Sync`
//! - Decodes of different records never wait on each other
//! - Counters are relaxed atomics; they are statistics, not synchronization

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::CACHE_SHARD_COUNT as SHARD_COUNT;
use crate::records::{decode_record, Airport};
use crate::storage::Store;

#[derive(Debug, Clone)]
enum Slot {
    Serialized,
    Materialized(Arc<Airport>),
}

#[derive(Debug)]
pub struct RecordCache {
    shards: Box<[RwLock<Vec<Slot>>]>,
    len: usize,
    decodes: AtomicU64,
    materialized: AtomicUsize,
}

impl RecordCache {
    /// Creates `len` serialized slots, one per store handle.
    pub fn new(len: usize) -> Self {
        let shards = (0..SHARD_COUNT)
            .map(|shard| {
                let slots = len / SHARD_COUNT + usize::from(shard < len % SHARD_COUNT);
                RwLock::new(vec![Slot::Serialized; slots])
            })
            .collect();

        Self {
            shards,
            len,
            decodes: AtomicU64::new(0),
            materialized: AtomicUsize::new(0),
        }
    }

    #[inline]
    fn locate(handle: u32) -> (usize, usize) {
        let handle = handle as usize;
        (handle % SHARD_COUNT, handle / SHARD_COUNT)
    }

    /// Returns the record for `handle`, decoding it on first access.
    ///
    /// `None` only if the record fails to decode, which `Store::load`
    /// validation rules out; the failure is logged.
    pub fn fetch(&self, store: &Store, handle: u32) -> Option<Arc<Airport>> {
        if let Some(airport) = self.peek(handle) {
            return Some(airport);
        }

        let decoded = match decode_record(store.record_bytes(handle)) {
            Ok(airport) => Arc::new(airport),
            Err(e) => {
                tracing::error!(
                    code = store.code(handle),
                    handle,
                    error = %e,
                    "failed to decode airport record"
                );
                return None;
            }
        };
        self.decodes.fetch_add(1, Ordering::Relaxed);

        let (shard, pos) = Self::locate(handle);
        let mut slots = self.shards[shard].write();
        if let Slot::Materialized(winner) = &slots[pos] {
            return Some(Arc::clone(winner));
        }
        slots[pos] = Slot::Materialized(Arc::clone(&decoded));
        self.materialized.fetch_add(1, Ordering::Relaxed);
        Some(decoded)
    }

    /// Returns the record only if it is already materialized.
    pub fn peek(&self, handle: u32) -> Option<Arc<Airport>> {
        let (shard, pos) = Self::locate(handle);
        match &self.shards[shard].read()[pos] {
            Slot::Materialized(airport) => Some(Arc::clone(airport)),
            Slot::Serialized => None,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of successful decodes, including ones that lost a race.
    pub fn decode_count(&self) -> u64 {
        self.decodes.load(Ordering::Relaxed)
    }

    pub fn materialized_count(&self) -> usize {
        self.materialized.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::AirportKind;
    use crate::storage::{encode_blob, Blob};

    fn store_with(count: usize) -> Store {
        let airports: Vec<Airport> = (0..count)
            .map(|i| Airport {
                code: format!("A{:02}", i),
                kind: AirportKind::SmallAirport,
                time_zone: "Europe/Vienna".into(),
                ..Airport::default()
            })
            .collect();
        Store::load(Blob::from(encode_blob(&airports).unwrap())).unwrap()
    }

    #[test]
    fn slots_cover_every_handle() {
        for len in [0, 1, 63, 64, 65, 200] {
            let cache = RecordCache::new(len);
            let total: usize = cache.shards.iter().map(|s| s.read().len()).sum();
            assert_eq!(total, len, "len {}", len);
        }
    }

    #[test]
    fn first_fetch_decodes_second_does_not() {
        let store = store_with(3);
        let cache = RecordCache::new(store.len());
        let handle = store.find("A01").unwrap();

        assert!(cache.peek(handle).is_none());
        let first = cache.fetch(&store, handle).unwrap();
        assert_eq!(cache.decode_count(), 1);

        let second = cache.fetch(&store, handle).unwrap();
        assert_eq!(cache.decode_count(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.code, "A01");
        assert_eq!(cache.materialized_count(), 1);
    }

    #[test]
    fn handles_in_same_shard_stay_independent() {
        let store = store_with(SHARD_COUNT + 2);
        let cache = RecordCache::new(store.len());

        let a = cache.fetch(&store, 1).unwrap();
        let b = cache.fetch(&store, 1 + SHARD_COUNT as u32).unwrap();
        assert_eq!(a.code, "A01");
        assert_eq!(b.code, format!("A{:02}", 1 + SHARD_COUNT));
        assert_eq!(cache.materialized_count(), 2);
    }

    #[test]
    fn concurrent_fetches_settle_on_one_value() {
        let store = store_with(1);
        let cache = RecordCache::new(store.len());

        let results: Vec<Arc<Airport>> = std::thread::scope(|s| {
            let workers: Vec<_> = (0..16)
                .map(|_| s.spawn(|| cache.fetch(&store, 0).unwrap()))
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).collect()
        });

        let settled = cache.peek(0).unwrap();
        for airport in &results {
            assert_eq!(**airport, *settled);
        }
        assert_eq!(cache.materialized_count(), 1);
        assert!(cache.decode_count() >= 1 && cache.decode_count() <= 16);
    }
}
