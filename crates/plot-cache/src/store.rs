//! Storage backends for the plot cache
//!
//! Scoping is a backend choice: process-wide, per-session, or persistent stores
//! all implement [`CacheStore`], and the cache's bucketing, canonicalization,
//! and eviction behavior is identical over any of them. Backend failures
//! surface as `CacheUnavailable` so callers can degrade to uncached rendering.

use std::collections::HashMap;

use plot_interact_shared::{PlotInteractResult, PlotSize, RenderedPlot};

use crate::key::PlotKey;

/// Full storage key: canonical plot key plus the canonicalized size bucket
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryKey {
    canonical: Vec<u8>,
    bucket: PlotSize,
}

impl EntryKey {
    pub fn new(key: &PlotKey, bucket: PlotSize) -> Self {
        Self {
            canonical: key.canonical_bytes(),
            bucket,
        }
    }

    pub fn bucket(&self) -> PlotSize {
        self.bucket
    }
}

/// Backend contract shared by every storage scope
///
/// `get` must refresh the entry's recency. Implementations are driven under the
/// cache's lock and need no internal synchronization of their own.
pub trait CacheStore: Send {
    fn get(&mut self, key: &EntryKey) -> PlotInteractResult<Option<RenderedPlot>>;
    fn put(&mut self, key: EntryKey, plot: RenderedPlot) -> PlotInteractResult<()>;
    fn clear(&mut self) -> PlotInteractResult<()>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cache entry with recency metadata
struct MemoryEntry {
    plot: RenderedPlot,
    /// Sequence number of the most recent access
    last_used: u64,
    /// Sequence number at insertion, the eviction tie-break
    inserted: u64,
}

/// Default in-process backend: entry-count-bounded LRU
///
/// Recency is tracked with a monotonic sequence counter rather than wall-clock
/// timestamps, so same-instant accesses cannot tie. When two entries do share a
/// `last_used` (never via this API, but a persistent backend may import state),
/// the older insertion loses first.
pub struct MemoryStore {
    capacity: usize,
    entries: HashMap<EntryKey, MemoryEntry>,
    seq: u64,
}

impl MemoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            seq: 0,
        }
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    fn evict_lru(&mut self) {
        if let Some(key) = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| (entry.last_used, entry.inserted))
            .map(|(k, _)| k.clone())
        {
            log::debug!("[PlotCache] evicting LRU entry at {}", key.bucket());
            self.entries.remove(&key);
        }
    }
}

impl CacheStore for MemoryStore {
    fn get(&mut self, key: &EntryKey) -> PlotInteractResult<Option<RenderedPlot>> {
        let seq = self.next_seq();
        if let Some(entry) = self.entries.get_mut(key) {
            entry.last_used = seq;
            Ok(Some(entry.plot.clone()))
        } else {
            Ok(None)
        }
    }

    fn put(&mut self, key: EntryKey, plot: RenderedPlot) -> PlotInteractResult<()> {
        let seq = self.next_seq();

        // Overwrite keeps the slot; only net-new entries trigger eviction.
        if let Some(existing) = self.entries.get_mut(&key) {
            existing.plot = plot;
            existing.last_used = seq;
            return Ok(());
        }

        while self.entries.len() >= self.capacity {
            self.evict_lru();
        }

        self.entries.insert(
            key,
            MemoryEntry {
                plot,
                last_used: seq,
                inserted: seq,
            },
        );
        Ok(())
    }

    fn clear(&mut self) -> PlotInteractResult<()> {
        self.entries.clear();
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn entry_key(tag: i64) -> EntryKey {
        EntryKey::new(&PlotKey::Int(tag), PlotSize::new(100, 100).unwrap())
    }

    fn plot(tag: u8) -> RenderedPlot {
        RenderedPlot::new(PlotSize::new(100, 100).unwrap(), Bytes::from(vec![tag; 8]))
    }

    #[test]
    fn test_get_put_round_trip() {
        let mut store = MemoryStore::new(4);
        assert!(store.get(&entry_key(1)).unwrap().is_none());
        store.put(entry_key(1), plot(7)).unwrap();
        assert_eq!(store.get(&entry_key(1)).unwrap().unwrap(), plot(7));
    }

    #[test]
    fn test_capacity_evicts_lru() {
        let mut store = MemoryStore::new(3);
        for tag in 0..3 {
            store.put(entry_key(tag), plot(tag as u8)).unwrap();
        }
        // Touch 0 so 1 becomes least recently used.
        store.get(&entry_key(0)).unwrap();

        store.put(entry_key(3), plot(3)).unwrap();
        assert_eq!(store.len(), 3);
        assert!(store.get(&entry_key(1)).unwrap().is_none());
        assert!(store.get(&entry_key(0)).unwrap().is_some());
        assert!(store.get(&entry_key(2)).unwrap().is_some());
    }

    #[test]
    fn test_untouched_entries_evict_oldest_first() {
        let mut store = MemoryStore::new(2);
        store.put(entry_key(1), plot(1)).unwrap();
        store.put(entry_key(2), plot(2)).unwrap();
        store.put(entry_key(3), plot(3)).unwrap();
        assert!(store.get(&entry_key(1)).unwrap().is_none());
        assert!(store.get(&entry_key(2)).unwrap().is_some());
    }

    #[test]
    fn test_overwrite_does_not_evict() {
        let mut store = MemoryStore::new(2);
        store.put(entry_key(1), plot(1)).unwrap();
        store.put(entry_key(2), plot(2)).unwrap();
        store.put(entry_key(1), plot(9)).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&entry_key(1)).unwrap().unwrap(), plot(9));
        assert!(store.get(&entry_key(2)).unwrap().is_some());
    }

    #[test]
    fn test_same_key_different_bucket_is_distinct() {
        let mut store = MemoryStore::new(4);
        let small = EntryKey::new(&PlotKey::Int(1), PlotSize::new(100, 100).unwrap());
        let large = EntryKey::new(&PlotKey::Int(1), PlotSize::new(200, 200).unwrap());
        store.put(small.clone(), plot(1)).unwrap();
        assert!(store.get(&large).unwrap().is_none());
        assert!(store.get(&small).unwrap().is_some());
    }

    #[test]
    fn test_clear() {
        let mut store = MemoryStore::new(4);
        store.put(entry_key(1), plot(1)).unwrap();
        store.clear().unwrap();
        assert!(store.is_empty());
        assert!(store.get(&entry_key(1)).unwrap().is_none());
    }
}
