use std::sync::{Arc, RwLock};

use chrono::Utc;

use super::{reduce, Action, CacheError, PartitionState};
use crate::model::Record;

/// Shared handle to one partition's state.
///
/// Explicitly constructed and passed by reference — no ambient singletons,
/// so every test can build a fresh store. Cloning shares the underlying
/// state.
pub struct Partition<T: Record> {
    state: Arc<RwLock<PartitionState<T>>>,
}

impl<T: Record> Clone for Partition<T> {
    fn clone(&self) -> Self {
        Partition {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Record> Default for Partition<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Partition<T> {
    pub fn new() -> Self {
        Partition {
            state: Arc::new(RwLock::new(PartitionState::new())),
        }
    }

    /// Apply one action through the reducer.
    pub fn dispatch(&self, action: Action<T>) -> Result<(), CacheError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| CacheError::LockPoisoned("dispatch"))?;
        let next = reduce(&state, action, Utc::now());
        *state = next;
        Ok(())
    }

    /// Clone the current snapshot.
    pub fn snapshot(&self) -> Result<PartitionState<T>, CacheError> {
        self.state
            .read()
            .map(|state| state.clone())
            .map_err(|_| CacheError::LockPoisoned("snapshot"))
    }

    /// Clone the current row list.
    pub fn items(&self) -> Result<Vec<T>, CacheError> {
        self.state
            .read()
            .map(|state| state.items.clone())
            .map_err(|_| CacheError::LockPoisoned("items"))
    }

    /// Whether the partition needs a refetch before it can be trusted.
    pub fn is_stale(&self) -> Result<bool, CacheError> {
        self.state
            .read()
            .map(|state| state.is_stale())
            .map_err(|_| CacheError::LockPoisoned("is_stale"))
    }
}

/// Type-erased seam for cross-partition staleness propagation: a client or
/// instrument synchronizer holds its dependent partitions through this
/// trait, not through their row types.
pub trait Invalidatable: Send + Sync {
    fn invalidate(&self);
}

impl<T: Record> Invalidatable for Partition<T> {
    fn invalidate(&self) {
        // A poisoned dependent has no state left worth marking stale.
        let _ = self.dispatch(Action::Invalidate);
    }
}
