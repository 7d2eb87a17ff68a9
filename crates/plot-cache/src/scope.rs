//! Session-scoped cache instances
//!
//! One registry per host application maps session ids to their own
//! [`PlotCache`], all sharing a single configuration. Ending a session
//! invalidates and drops its cache, which is the scope-teardown contract.
//! App-wide caching does not go through here: that is just one `PlotCache`
//! behind an `Arc`, constructed by the host and passed around explicitly.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use plot_interact_shared::{CacheConfig, PlotInteractResult};

use crate::cache::PlotCache;

/// Registry of per-session plot caches
pub struct SessionScopes {
    config: CacheConfig,
    scopes: RwLock<HashMap<Uuid, Arc<PlotCache>>>,
}

impl SessionScopes {
    pub fn new(config: CacheConfig) -> PlotInteractResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            scopes: RwLock::new(HashMap::new()),
        })
    }

    /// The cache for `session_id`, created on first use.
    pub fn scope(&self, session_id: Uuid) -> PlotInteractResult<Arc<PlotCache>> {
        if let Some(cache) = self.scopes.read().get(&session_id) {
            return Ok(Arc::clone(cache));
        }

        let mut scopes = self.scopes.write();
        // Re-check: another thread may have created it between locks.
        if let Some(cache) = scopes.get(&session_id) {
            return Ok(Arc::clone(cache));
        }
        log::debug!("[SessionScopes] creating cache for session {session_id}");
        let cache = Arc::new(PlotCache::new(&self.config)?);
        scopes.insert(session_id, Arc::clone(&cache));
        Ok(cache)
    }

    /// Tear down a session's cache. Returns false if the session was unknown.
    pub fn end_session(&self, session_id: Uuid) -> PlotInteractResult<bool> {
        let removed = self.scopes.write().remove(&session_id);
        match removed {
            Some(cache) => {
                log::debug!("[SessionScopes] ending session {session_id}");
                cache.invalidate_all()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn active_sessions(&self) -> usize {
        self.scopes.read().len()
    }
}
