//! Entity definitions for the three cached partitions.
//!
//! Clients, instruments, and client-instrument connections all follow the
//! same pattern: a serde-derived row type implementing [`Record`], plus a
//! draft type carrying the create payload (no server-assigned fields).

mod client;
mod connection;
mod instrument;
mod record;

pub use client::{lowest_unused_number, Client, ClientDraft};
pub use connection::{Connection, ConnectionDraft, RelationshipType};
pub use instrument::{split_kind, Instrument, InstrumentDraft, InstrumentStatus};
pub use record::Record;
