//! Cached plot rendering for interactive hosts
//!
//! Maps a serializable plot key plus a requested raster size to a previously
//! rendered image. Requested sizes canonicalize onto a bounded geometric ladder
//! of buckets, keys canonicalize to deterministic bytes, storage is LRU-bounded
//! behind a pluggable backend, and concurrent misses on one plot render it at
//! most once.

pub mod cache;
pub mod key;
pub mod scope;
pub mod size;
pub mod store;

pub use cache::{CacheStats, Lookup, PlotCache, RenderPermit};
pub use key::PlotKey;
pub use scope::SessionScopes;
pub use size::SizePolicy;
pub use store::{CacheStore, EntryKey, MemoryStore};
