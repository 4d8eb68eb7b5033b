//! Per-entry expiring set for one-time notifications.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Set whose entries expire individually after a fixed TTL.
///
/// Entries age out one at a time rather than being dropped all at once on
/// a global reset, so a game alerted late in the evening stays muted into
/// the next morning while older entries free up on their own.
#[derive(Debug)]
pub struct TtlSet<T> {
    ttl: Duration,
    entries: HashMap<T, Instant>,
}

impl<T: Eq + Hash> TtlSet<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn insert(&mut self, key: T) {
        self.entries.insert(key, Instant::now());
    }

    /// Expired entries are dropped on read.
    pub fn contains(&mut self, key: &T) -> bool {
        match self.entries.get(key) {
            Some(at) if at.elapsed() < self.ttl => true,
            Some(_) => {
                self.entries.remove(key);
                false
            }
            None => false,
        }
    }

    /// Drop every expired entry, keeping the map from growing over a
    /// long-lived polling loop.
    pub fn purge_expired(&mut self) {
        let ttl = self.ttl;
        self.entries.retain(|_, at| at.elapsed() < ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
