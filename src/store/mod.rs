//! Partitioned entity stores: one snapshot + reducer per row kind.
//!
//! All mutation goes through [`Partition::dispatch`], which applies the pure
//! [`reduce`] transition under a write lock. Reads are snapshot clones, so
//! consumers never observe a half-applied transition.

mod action;
mod error;
mod partition;
mod reducer;
mod state;

pub use action::Action;
pub use error::CacheError;
pub use partition::{Invalidatable, Partition};
pub use reducer::reduce;
pub use state::PartitionState;
