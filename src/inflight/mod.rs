//! Single-flight registry for fetch-all requests.
//!
//! Multiple UI consumers mounting in the same tick all ask for the same
//! list; this registry collapses them onto one underlying round-trip.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;

type SharedRequest<V> = Shared<BoxFuture<'static, V>>;

/// Map from request key to the currently in-flight shared future.
///
/// Lifecycle: the first caller for a key registers its request; callers
/// arriving in between receive a handle to the same future and never invoke
/// their own producer. The request deregisters its own key as it settles,
/// so the lifecycle holds even when the caller that registered it is
/// dropped and a later caller drives the request to completion.
pub struct InflightRegistry<V: Clone> {
    inner: Arc<Mutex<HashMap<String, SharedRequest<V>>>>,
}

impl<V: Clone> Default for InflightRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> InflightRegistry<V> {
    pub fn new() -> Self {
        InflightRegistry {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Whether a request is currently registered for `key`.
    pub fn in_flight(&self, key: &str) -> bool {
        lock(&self.inner).contains_key(key)
    }
}

impl<V: Clone + Send + Sync + 'static> InflightRegistry<V> {
    /// Run `producer` under single-flight semantics for `key`.
    ///
    /// If a request is already registered, its shared handle is returned
    /// and `producer` is dropped unpolled. Otherwise `producer` is wrapped
    /// so it removes its own key as soon as it settles, success or failure,
    /// and the next call starts a fresh request. The removal rides inside
    /// the shared future: a registering caller that is dropped mid-flight
    /// cannot leave the key pinned to a settled request.
    pub async fn run<F>(&self, key: &str, producer: F) -> V
    where
        F: Future<Output = V> + Send + 'static,
    {
        let request = {
            let mut inner = lock(&self.inner);
            match inner.get(key) {
                Some(existing) => existing.clone(),
                None => {
                    let slot = Arc::clone(&self.inner);
                    let owned_key = key.to_string();
                    let request = async move {
                        let output = producer.await;
                        lock(&slot).remove(&owned_key);
                        output
                    }
                    .boxed()
                    .shared();
                    inner.insert(key.to_string(), request.clone());
                    request
                }
            }
        };

        request.await
    }
}

// The map stays valid even if a holder panicked mid-operation.
fn lock<'a, V: Clone>(
    inner: &'a Mutex<HashMap<String, SharedRequest<V>>>,
) -> MutexGuard<'a, HashMap<String, SharedRequest<V>>> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
