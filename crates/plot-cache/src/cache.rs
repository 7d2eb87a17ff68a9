//! The plot cache: canonicalized lookup, LRU storage, single-flight rendering
//!
//! `lookup` answers hit or miss; a miss hands back a [`RenderPermit`] that
//! serializes rendering per `(key, bucket)` pair, so concurrent misses on the
//! same plot render it at most once while the rest wait for the stored result.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Condvar, Mutex};
use serde::Serialize;

use plot_interact_shared::{CacheConfig, PlotInteractResult, PlotSize, RenderedPlot};

use crate::key::PlotKey;
use crate::size::SizePolicy;
use crate::store::{CacheStore, EntryKey, MemoryStore};

/// Outcome of a cache lookup
pub enum Lookup<'a> {
    /// Stored image at the canonical bucket size; rescale to the exact
    /// requested size for display.
    Hit(RenderedPlot),
    /// Nothing cached; render at [`RenderPermit::bucket`] and store through
    /// the permit.
    Miss(RenderPermit<'a>),
}

impl Lookup<'_> {
    pub fn is_hit(&self) -> bool {
        matches!(self, Lookup::Hit(_))
    }
}

// Not derivable: the Miss arm's permit borrows the whole cache.
impl std::fmt::Debug for Lookup<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lookup::Hit(plot) => f.debug_tuple("Hit").field(plot).finish(),
            Lookup::Miss(permit) => f
                .debug_struct("Miss")
                .field("bucket", &permit.bucket())
                .finish(),
        }
    }
}

/// Exclusive license to render one `(key, bucket)` pair
///
/// Held by the first requester to miss; concurrent lookups for the same pair
/// block until this is stored or dropped. Dropping without storing wakes one
/// waiter to take over the render.
pub struct RenderPermit<'a> {
    cache: &'a PlotCache,
    entry_key: EntryKey,
    released: bool,
}

impl RenderPermit<'_> {
    /// The resolution to render at.
    pub fn bucket(&self) -> PlotSize {
        self.entry_key.bucket()
    }

    /// Store the rendered image and release waiting lookups.
    pub fn store(mut self, plot: RenderedPlot) -> PlotInteractResult<()> {
        if plot.size != self.bucket() {
            log::warn!(
                "[PlotCache] stored image is {} but bucket is {}",
                plot.size,
                self.bucket()
            );
        }
        let result = self.cache.store.lock().put(self.entry_key.clone(), plot);
        self.released = true;
        self.cache.release_pending(&self.entry_key);
        result
    }
}

impl Drop for RenderPermit<'_> {
    fn drop(&mut self) {
        // Render abandoned: release the marker so a waiter can take over.
        if !self.released {
            self.cache.release_pending(&self.entry_key);
        }
    }
}

/// Cache usage counters, snapshotted via [`PlotCache::stats`]
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entry_count: usize,
    pub hit_rate: f32,
}

/// Keyed, size-bucketed image cache over a pluggable storage backend
///
/// Construct one per scope and pass it to whatever hosts it; process-wide
/// sharing is an `Arc<PlotCache>` the host threads its own way, never a hidden
/// singleton.
pub struct PlotCache {
    store: Mutex<Box<dyn CacheStore>>,
    policy: SizePolicy,
    pending: Mutex<HashSet<EntryKey>>,
    pending_cond: Condvar,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl PlotCache {
    /// In-process cache with the default LRU memory backend.
    pub fn new(config: &CacheConfig) -> PlotInteractResult<Self> {
        let store = MemoryStore::new(config.capacity_entries);
        Self::with_store(config, Box::new(store))
    }

    /// Cache over a caller-provided backend (per-session memory, persistent, ...).
    pub fn with_store(
        config: &CacheConfig,
        store: Box<dyn CacheStore>,
    ) -> PlotInteractResult<Self> {
        Ok(Self {
            store: Mutex::new(store),
            policy: SizePolicy::new(config)?,
            pending: Mutex::new(HashSet::new()),
            pending_cond: Condvar::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    /// Look up `key` at `requested_size`.
    ///
    /// The requested size canonicalizes to its bucket first, so any size within
    /// a bucket's range hits the same entry. A miss blocks while another caller
    /// holds the render permit for the same pair, then either returns their
    /// stored image or inherits the permit.
    pub fn lookup(&self, key: &PlotKey, requested_size: PlotSize) -> PlotInteractResult<Lookup<'_>> {
        let bucket = self.policy.bucket(requested_size)?;
        let entry_key = EntryKey::new(key, bucket);

        // The pending lock is held across the storage check, so a permit can
        // only be issued when the pair is neither stored nor being rendered.
        let mut pending = self.pending.lock();
        loop {
            if let Some(plot) = self.store.lock().get(&entry_key)? {
                self.hits.fetch_add(1, Ordering::Relaxed);
                log::debug!("[PlotCache] hit at {bucket} (requested {requested_size})");
                return Ok(Lookup::Hit(plot));
            }

            if !pending.contains(&entry_key) {
                pending.insert(entry_key.clone());
                self.misses.fetch_add(1, Ordering::Relaxed);
                log::debug!("[PlotCache] miss at {bucket}, issuing render permit");
                return Ok(Lookup::Miss(RenderPermit {
                    cache: self,
                    entry_key,
                    released: false,
                }));
            }

            // Another caller is rendering this pair; wait for their store (or
            // abandonment) and re-check.
            self.pending_cond.wait(&mut pending);
        }
    }

    fn release_pending(&self, key: &EntryKey) {
        let mut pending = self.pending.lock();
        pending.remove(key);
        self.pending_cond.notify_all();
    }

    /// Insert or overwrite an entry rendered out-of-band (no permit involved).
    pub fn store(
        &self,
        key: &PlotKey,
        requested_size: PlotSize,
        plot: RenderedPlot,
    ) -> PlotInteractResult<()> {
        let bucket = self.policy.bucket(requested_size)?;
        self.store.lock().put(EntryKey::new(key, bucket), plot)
    }

    /// Clear all stored entries (explicit reset or scope teardown).
    pub fn invalidate_all(&self) -> PlotInteractResult<()> {
        log::debug!("[PlotCache] invalidating all entries");
        self.store.lock().clear()
    }

    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        CacheStats {
            hits,
            misses,
            entry_count: self.len(),
            hit_rate: if total == 0 {
                0.0
            } else {
                hits as f32 / total as f32
            },
        }
    }
}
