//! # Name Index
//!
//! Maps folded tokens to record handles. The index is built in one scan over
//! the store, reading `name` and `municipality` through zero-copy record
//! views, so building it does not materialize any record.
//!
//! ## Keys Registered Per Record
//!
//! ```text
//! name "Budapest Liszt Ferenc International Airport", municipality "Budapest"
//!
//!   name tokens      budapest, liszt, ferenc      (noise dropped)
//!   compound         budapest-liszt-ferenc
//!   municipality     budapest
//!   fragments        budapest                     (split on / - space ,)
//! ```
//!
//! ## Collisions
//!
//! Records are scanned in blob order and a later registration overwrites an
//! earlier one, so when two airports share a token the one stored last in the
//! blob wins. There is no ranking by airport size or by how specific the
//! token is.
//!
//! ## Lookup Order
//!
//! 1. The folded input as a whole
//! 2. The folded input without a trailing `-intl`
//! 3. Each `-`/space separated token of the folded input, first hit wins

use std::time::Instant;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::config::{INTL_SUFFIX, LOOKUP_SEPARATORS, MUNICIPALITY_SEPARATORS};
use crate::names::fold::{fold, name_tokens};
use crate::storage::Store;

#[derive(Debug, Default)]
pub struct NameIndex {
    keys: HashMap<Box<str>, u32>,
}

impl NameIndex {
    pub fn build(store: &Store) -> Self {
        let start = Instant::now();
        let mut index = Self {
            keys: HashMap::with_capacity(store.len() * 4),
        };

        for handle in store.handles() {
            let fields = store
                .view(handle)
                .and_then(|view| Ok((view.name()?, view.municipality()?)));
            match fields {
                Ok((name, municipality)) => index.register(handle, name, municipality),
                Err(e) => tracing::error!(
                    code = store.code(handle),
                    error = %e,
                    "skipping unreadable record in name index"
                ),
            }
        }

        tracing::debug!(
            records = store.len(),
            keys = index.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "name index built"
        );
        index
    }

    /// Registers the keys derived from one record's name and municipality.
    pub fn register(&mut self, handle: u32, name: &str, municipality: &str) {
        let folded_name = fold(name);
        let tokens: SmallVec<[&str; 8]> = name_tokens(&folded_name).collect();
        for token in &tokens {
            self.insert(token, handle);
        }
        if !tokens.is_empty() {
            self.insert(&tokens.join("-"), handle);
        }

        let folded_city = fold(municipality);
        if !folded_city.is_empty() {
            self.insert(&folded_city, handle);
        }
        for fragment in folded_city.split(MUNICIPALITY_SEPARATORS) {
            if !fragment.is_empty() {
                self.insert(fragment, handle);
            }
        }
    }

    fn insert(&mut self, key: &str, handle: u32) {
        self.keys.insert(Box::from(key), handle);
    }

    /// Exact lookup of an already folded key.
    pub fn get(&self, key: &str) -> Option<u32> {
        self.keys.get(key).copied()
    }

    /// Runs the lookup fallback chain over arbitrary input text.
    pub fn resolve(&self, text: &str) -> Option<u32> {
        let folded = fold(text.trim());
        if folded.is_empty() {
            return None;
        }

        if let Some(handle) = self.get(&folded) {
            return Some(handle);
        }
        if let Some(handle) = folded
            .strip_suffix(INTL_SUFFIX)
            .and_then(|stem| self.get(stem))
        {
            return Some(handle);
        }
        folded
            .split(LOOKUP_SEPARATORS)
            .filter(|token| !token.is_empty())
            .find_map(|token| self.get(token))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
