//! Composition root: the three partitions wired together.

use std::sync::Arc;

use crate::api::TableClient;
use crate::model::{lowest_unused_number, Client, ClientDraft, Connection, Instrument};
use crate::owned::OwnedInstrumentsCache;
use crate::report::ErrorReporter;
use crate::store::Invalidatable;
use crate::sync::Synchronizer;

/// The full entity cache: client, instrument, and connection partitions,
/// plus the owned-instruments sub-cache.
///
/// Connection rows embed denormalized client and instrument snapshots, so
/// the client and instrument synchronizers are wired to mark the
/// connections partition stale on every successful mutation.
///
/// Explicitly constructed from its collaborators; tests build one per case.
pub struct EntityCache {
    pub clients: Synchronizer<Client>,
    pub instruments: Synchronizer<Instrument>,
    pub connections: Synchronizer<Connection>,
    pub owned: OwnedInstrumentsCache,
}

impl EntityCache {
    pub fn new(http: Arc<dyn TableClient>, reporter: Arc<dyn ErrorReporter>) -> Self {
        let connections: Synchronizer<Connection> =
            Synchronizer::new(Arc::clone(&http), Arc::clone(&reporter));
        let connection_partition: Arc<dyn Invalidatable> =
            Arc::new(connections.partition().clone());

        let clients = Synchronizer::new(Arc::clone(&http), Arc::clone(&reporter))
            .with_dependent(Arc::clone(&connection_partition));
        let instruments = Synchronizer::new(Arc::clone(&http), Arc::clone(&reporter))
            .with_dependent(connection_partition);
        let owned = OwnedInstrumentsCache::new(http, reporter);

        EntityCache {
            clients,
            instruments,
            connections,
            owned,
        }
    }

    /// Create a client, assigning the lowest unused client number when the
    /// draft does not carry one.
    pub async fn create_client(&self, mut draft: ClientDraft) -> Option<Client> {
        if draft.client_number.is_none() {
            let taken = self
                .clients
                .partition()
                .items()
                .unwrap_or_default()
                .into_iter()
                .filter_map(|client| client.client_number);
            draft.client_number = Some(lowest_unused_number(taken));
        }
        self.clients.create(draft).await
    }
}
