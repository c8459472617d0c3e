//! Per-client cache of owned instruments.
//!
//! Smaller and stricter than the partitions: results are memoized per
//! client id, and starting a fetch for a new client aborts any prior
//! in-flight fetch so a stale response can never land over a newer one.
//! The memo is not invalidated by mutations elsewhere (see DESIGN.md).

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{AbortHandle, Abortable, Aborted};

use crate::api::{self, ApiError, Method, TableClient};
use crate::model::{Client, Instrument};
use crate::report::ErrorReporter;

/// Outcome of an owned-instruments fetch.
///
/// Cancellation is not a failure: a superseded fetch reports nothing and
/// changes nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum OwnedFetch {
    Loaded(Vec<Instrument>),
    Cancelled,
    Failed,
}

#[derive(Default)]
struct OwnedState {
    memo: HashMap<String, Vec<Instrument>>,
    active: Option<(String, AbortHandle)>,
}

/// Cache of "instruments owned by this client", keyed by client id.
pub struct OwnedInstrumentsCache {
    http: Arc<dyn TableClient>,
    reporter: Arc<dyn ErrorReporter>,
    state: Mutex<OwnedState>,
}

impl OwnedInstrumentsCache {
    pub fn new(http: Arc<dyn TableClient>, reporter: Arc<dyn ErrorReporter>) -> Self {
        OwnedInstrumentsCache {
            http,
            reporter,
            state: Mutex::new(OwnedState::default()),
        }
    }

    /// The memoized list for `client_id`, if one has been fetched.
    pub fn cached(&self, client_id: &str) -> Option<Vec<Instrument>> {
        lock(&self.state).memo.get(client_id).cloned()
    }

    /// Drop all memoized lists. The escape hatch for hosts that mutate
    /// instrument ownership out from under the memo.
    pub fn clear(&self) {
        lock(&self.state).memo.clear();
    }

    /// Fetch the instruments owned by `client`.
    ///
    /// A memo hit returns synchronously with no network round-trip. A miss
    /// aborts any prior in-flight owned fetch, queries by the client's
    /// display name, and memoizes the result. An aborted fetch resolves to
    /// [`OwnedFetch::Cancelled`] without touching the memo or the reporter.
    pub async fn fetch_owned(&self, client: &Client) -> OwnedFetch {
        let (handle, registration) = AbortHandle::new_pair();
        {
            let mut state = lock(&self.state);
            if let Some(cached) = state.memo.get(&client.id) {
                return OwnedFetch::Loaded(cached.clone());
            }
            if let Some((_, prior)) = state.active.take() {
                prior.abort();
            }
            state.active = Some((client.id.clone(), handle));
        }

        let path = api::owned_path(&client.full_name());
        let request = Abortable::new(self.http.request(Method::Get, &path, None), registration);
        let outcome = match request.await {
            Err(Aborted) => return OwnedFetch::Cancelled,
            Ok(outcome) => outcome,
        };

        {
            let mut state = lock(&self.state);
            if state
                .active
                .as_ref()
                .map(|(id, _)| id == &client.id)
                .unwrap_or(false)
            {
                state.active = None;
            }
        }

        match outcome {
            Ok(Some(value)) => match serde_json::from_value::<Vec<Instrument>>(value) {
                Ok(instruments) => {
                    lock(&self.state)
                        .memo
                        .insert(client.id.clone(), instruments.clone());
                    OwnedFetch::Loaded(instruments)
                }
                Err(err) => {
                    self.reporter.handle_error(
                        &ApiError::Unknown(format!("malformed owned-instruments response: {}", err)),
                        "fetching owned instruments",
                    );
                    OwnedFetch::Failed
                }
            },
            // No rows is a valid answer for a client who owns nothing.
            Ok(None) => {
                lock(&self.state).memo.insert(client.id.clone(), Vec::new());
                OwnedFetch::Loaded(Vec::new())
            }
            Err(error) => {
                self.reporter
                    .handle_error(&error, "fetching owned instruments");
                OwnedFetch::Failed
            }
        }
    }
}

// The memo stays valid even if a holder panicked mid-operation.
fn lock(state: &Mutex<OwnedState>) -> MutexGuard<'_, OwnedState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
