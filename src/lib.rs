mod api;
mod cache;
mod inflight;
mod model;
mod owned;
mod query;
mod report;
mod store;
mod sync;

pub use api::{ApiError, ErrorBody, Method, TableClient};
pub use cache::EntityCache;
pub use inflight::InflightRegistry;
pub use model::{
    lowest_unused_number, split_kind, Client, ClientDraft, Connection, ConnectionDraft,
    Instrument, InstrumentDraft, InstrumentStatus, Record, RelationshipType,
};
pub use owned::{OwnedFetch, OwnedInstrumentsCache};
pub use query::{run_query, FilterSpec, Page, Queryable, SortDirection};
pub use report::{ErrorReporter, LogReporter};
pub use store::{reduce, Action, CacheError, Invalidatable, Partition, PartitionState};
pub use sync::Synchronizer;
