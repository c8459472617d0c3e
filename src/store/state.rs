use chrono::{DateTime, Utc};

/// Immutable-per-transition snapshot of one partition.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionState<T> {
    /// Cached rows, newest first.
    pub items: Vec<T>,
    /// A fetch-all is in flight.
    pub loading: bool,
    /// A create/update/delete is in flight.
    pub submitting: bool,
    /// When the list last changed through a successful transition.
    /// `None` means the partition is stale and should be refetched.
    pub last_updated: Option<DateTime<Utc>>,
}

impl<T> PartitionState<T> {
    pub fn new() -> Self {
        PartitionState {
            items: Vec::new(),
            loading: false,
            submitting: false,
            last_updated: None,
        }
    }

    pub fn is_stale(&self) -> bool {
        self.last_updated.is_none()
    }
}

impl<T> Default for PartitionState<T> {
    fn default() -> Self {
        Self::new()
    }
}
