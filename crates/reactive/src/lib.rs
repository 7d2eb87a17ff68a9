//! Observable value store with explicit reads and writes
//!
//! An application state cell with distinct `get()` / `set()` operations and a
//! subscription mechanism for dependents, replacing call-syntax reactive values
//! with an explicit store object. Reads are lock-free; writers never block on
//! slow subscribers.

use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use tokio::sync::broadcast;

use plot_interact_shared::PlotInteractResult;

const CHANNEL_CAPACITY: usize = 100;

/// Change notification carrying the replaced and the new value
#[derive(Debug)]
pub struct ChangeEvent<T> {
    pub old: Arc<T>,
    pub new: Arc<T>,
}

impl<T> Clone for ChangeEvent<T> {
    fn clone(&self) -> Self {
        Self {
            old: Arc::clone(&self.old),
            new: Arc::clone(&self.new),
        }
    }
}

type Validator<T> = Arc<dyn Fn(&T) -> PlotInteractResult<()> + Send + Sync>;

/// A reactive value: current state plus change broadcasts
///
/// `get` is a lock-free snapshot read. `set`/`update` swap atomically and
/// broadcast a [`ChangeEvent`]; subscribers that fall behind the channel
/// capacity miss intermediate events rather than backpressuring the writer.
pub struct ReactiveValue<T> {
    current: ArcSwap<T>,
    update_tx: broadcast::Sender<ChangeEvent<T>>,
    validator: Option<Validator<T>>,
    // Serializes read-modify-write updates; plain set() also takes it so an
    // update() never races a concurrent set() between its read and its store.
    write_lock: Mutex<()>,
}

impl<T: Send + Sync + 'static> ReactiveValue<T> {
    pub fn new(initial: T) -> Self {
        let (update_tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            current: ArcSwap::from_pointee(initial),
            update_tx,
            validator: None,
            write_lock: Mutex::new(()),
        }
    }

    /// A value whose writes are validated before they take effect.
    pub fn with_validator(
        initial: T,
        validator: impl Fn(&T) -> PlotInteractResult<()> + Send + Sync + 'static,
    ) -> PlotInteractResult<Self> {
        validator(&initial)?;
        let mut value = Self::new(initial);
        value.validator = Some(Arc::new(validator));
        Ok(value)
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> Arc<T> {
        self.current.load_full()
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, new: T) -> PlotInteractResult<()> {
        if let Some(validator) = &self.validator {
            validator(&new)?;
        }
        let _guard = self.write_lock.lock();
        self.swap_and_notify(Arc::new(new));
        Ok(())
    }

    /// Read-modify-write under the write lock, so concurrent updates serialize.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> PlotInteractResult<()> {
        let _guard = self.write_lock.lock();
        let new = f(&self.current.load_full());
        if let Some(validator) = &self.validator {
            validator(&new)?;
        }
        self.swap_and_notify(Arc::new(new));
        Ok(())
    }

    /// Subscribe to change events. Each receiver sees events from this point on.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent<T>> {
        self.update_tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.update_tx.receiver_count()
    }

    fn swap_and_notify(&self, new: Arc<T>) {
        let old = self.current.swap(Arc::clone(&new));
        // No receivers is fine; the send result is irrelevant.
        let _ = self.update_tx.send(ChangeEvent { old, new });
    }
}

impl<T: Send + Sync + PartialEq + 'static> ReactiveValue<T> {
    /// Replace the value only if it differs, notifying only on real change.
    pub fn set_if_changed(&self, new: T) -> PlotInteractResult<bool> {
        if let Some(validator) = &self.validator {
            validator(&new)?;
        }
        let _guard = self.write_lock.lock();
        if *self.current.load_full() == new {
            return Ok(false);
        }
        self.swap_and_notify(Arc::new(new));
        Ok(true)
    }
}
