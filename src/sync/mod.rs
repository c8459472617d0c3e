//! Per-partition synchronization: fetch/create/update/delete against the
//! HTTP collaborator, translated into reducer actions.

mod synchronizer;

pub use synchronizer::Synchronizer;
