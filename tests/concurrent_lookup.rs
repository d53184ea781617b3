//! # Concurrent Lookup Tests
//!
//! Many threads sharing one `Directory` must agree on every record, and the
//! lazy paths (record decode, name index build) must settle on one value.
//!
//! ## Test Goals
//!
//! 1. 100 threads looking up the same cold code all get equal records
//! 2. The slot ends up materialized exactly once
//! 3. Concurrent first name lookups all see the same index
//! 4. Mixed code/name traffic over `Arc<Directory>` stays consistent

mod common;

use std::sync::{Arc, Barrier};
use std::thread;

use common::{fixture_airports, fixture_directory};
use iata_directory::Airport;

const THREADS: usize = 100;

#[test]
fn hundred_threads_same_cold_code() {
    let directory = fixture_directory();
    let barrier = Barrier::new(THREADS);

    let results: Vec<(Arc<Airport>, bool)> = thread::scope(|s| {
        let workers: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    directory.get2("VIE")
                })
            })
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    let (first, _) = &results[0];
    for (airport, found) in &results {
        assert!(found);
        assert_eq!(**airport, **first);
        assert_eq!(airport.code, "VIE");
    }

    let stats = directory.stats();
    assert_eq!(stats.materialized, 1);
    assert!(stats.decodes >= 1 && stats.decodes <= THREADS as u64);

    let settled = directory.get("VIE");
    let after = directory.stats().decodes;
    assert_eq!(directory.get("VIE"), settled);
    assert_eq!(directory.stats().decodes, after);
}

#[test]
fn concurrent_first_name_lookups_agree() {
    let directory = fixture_directory();
    let barrier = Barrier::new(16);

    let codes: Vec<Option<String>> = thread::scope(|s| {
        let workers: Vec<_> = (0..16)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    directory.resolve_to_code("BUDAPEST-FERIHEGY").map(str::to_owned)
                })
            })
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    assert!(codes.iter().all(|code| code.as_deref() == Some("BUD")));
    assert!(directory.stats().name_keys.is_some());
}

#[test]
fn shared_directory_serves_mixed_traffic() {
    let directory = Arc::new(fixture_directory());
    let airports = fixture_airports();

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let directory = Arc::clone(&directory);
            let airports = airports.clone();
            thread::spawn(move || {
                for round in 0..50 {
                    let airport = &airports[(worker + round) % airports.len()];
                    let by_code = directory.get(&airport.code);
                    assert_eq!(by_code.code, airport.code);

                    let by_city = directory.resolve_to_code(&airport.municipality);
                    assert!(by_city.is_some(), "{}", airport.municipality);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let stats = directory.stats();
    assert_eq!(stats.materialized, airports.len());
    assert!(stats.decodes >= airports.len() as u64);
}
