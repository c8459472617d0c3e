use std::sync::Arc;

use serde_json::{Map, Value};

use crate::api::{self, ApiError, Method, TableClient};
use crate::inflight::InflightRegistry;
use crate::model::Record;
use crate::report::ErrorReporter;
use crate::store::{Action, Invalidatable, Partition};

/// Keeps one partition in sync with its backend table.
///
/// Every operation follows the same shape: flip the busy flag, call the
/// collaborator, translate the outcome into a reducer action, clear the
/// flag on every path. Expected failures never escape as errors — callers
/// get `None`/`false` sentinels and the reporter carries the user-visible
/// feedback.
pub struct Synchronizer<T: Record> {
    partition: Partition<T>,
    http: Arc<dyn TableClient>,
    reporter: Arc<dyn ErrorReporter>,
    inflight: Arc<InflightRegistry<Vec<T>>>,
    dependents: Vec<Arc<dyn Invalidatable>>,
}

impl<T: Record> Synchronizer<T> {
    pub fn new(http: Arc<dyn TableClient>, reporter: Arc<dyn ErrorReporter>) -> Self {
        Synchronizer {
            partition: Partition::new(),
            http,
            reporter,
            inflight: Arc::new(InflightRegistry::new()),
            dependents: Vec::new(),
        }
    }

    /// Register a partition whose rows embed this partition's data and
    /// must therefore go stale when this partition mutates.
    pub fn with_dependent(mut self, dependent: Arc<dyn Invalidatable>) -> Self {
        self.dependents.push(dependent);
        self
    }

    pub fn partition(&self) -> &Partition<T> {
        &self.partition
    }

    /// Refresh the whole partition from the backend.
    ///
    /// Single-flight: concurrent callers share one round-trip and resolve
    /// to the same list. A recognized session-expiry error clears the list
    /// without escalating; any other error leaves the last-known-good list
    /// in place and goes to the reporter. `loading` is cleared on every
    /// path.
    pub async fn fetch_all(&self) -> Vec<T> {
        let partition = self.partition.clone();
        let http = Arc::clone(&self.http);
        let reporter = Arc::clone(&self.reporter);
        self.inflight
            .run(T::TABLE, fetch_all_once(partition, http, reporter))
            .await
    }

    /// Create a row. Returns the server-assigned row, or `None` on any
    /// failure (reported). A "successful" response without a row is a
    /// failure too — the caller must be able to tell creation happened.
    pub async fn create(&self, draft: T::Draft) -> Option<T> {
        self.apply(Action::SetSubmitting(true));
        let context = format!("creating {} row", T::TABLE);

        let created = match serde_json::to_value(&draft) {
            Ok(body) => {
                let outcome = self
                    .http
                    .request(Method::Post, &api::table_path(T::TABLE), Some(body))
                    .await;
                self.absorb_row(outcome, &context, Action::AddOne)
            }
            Err(err) => {
                self.reporter
                    .handle_error(&ApiError::Unknown(err.to_string()), &context);
                None
            }
        };

        self.apply(Action::SetSubmitting(false));
        created
    }

    /// Apply a partial update to the row with `id`. The patch must be a
    /// JSON object; `id` is injected into it. Returns the updated row, or
    /// `None` on any failure (reported).
    pub async fn update(&self, id: &str, patch: Value) -> Option<T> {
        self.apply(Action::SetSubmitting(true));
        let context = format!("updating {} row", T::TABLE);

        let updated = match into_patch_body(id, patch) {
            Ok(body) => {
                let outcome = self
                    .http
                    .request(Method::Patch, &api::table_path(T::TABLE), Some(body))
                    .await;
                self.absorb_row(outcome, &context, Action::UpdateOne)
            }
            Err(error) => {
                self.reporter.handle_error(&error, &context);
                None
            }
        };

        self.apply(Action::SetSubmitting(false));
        updated
    }

    /// Delete the row with `id`. Returns whether the backend confirmed.
    pub async fn delete(&self, id: &str) -> bool {
        self.apply(Action::SetSubmitting(true));
        let context = format!("deleting {} row", T::TABLE);

        let deleted = match self
            .http
            .request(Method::Delete, &api::delete_path(T::TABLE, id), None)
            .await
        {
            Ok(_) => {
                self.apply(Action::RemoveOne(id.to_string()));
                self.invalidate_dependents();
                true
            }
            Err(error) => {
                self.reporter.handle_error(&error, &context);
                false
            }
        };

        self.apply(Action::SetSubmitting(false));
        deleted
    }

    /// Translate a mutation outcome into a dispatched row, with the
    /// no-data-on-success case treated as a synthesized failure.
    fn absorb_row(
        &self,
        outcome: Result<Option<Value>, ApiError>,
        context: &str,
        action: fn(T) -> Action<T>,
    ) -> Option<T> {
        match outcome {
            Ok(Some(value)) => match serde_json::from_value::<T>(value) {
                Ok(row) => {
                    self.apply(action(row.clone()));
                    self.invalidate_dependents();
                    Some(row)
                }
                Err(err) => {
                    self.reporter.handle_error(
                        &ApiError::Unknown(format!("malformed row in response: {}", err)),
                        context,
                    );
                    None
                }
            },
            Ok(None) => {
                self.reporter.handle_error(
                    &ApiError::Unknown("response carried no row".to_string()),
                    context,
                );
                None
            }
            Err(error) => {
                self.reporter.handle_error(&error, context);
                None
            }
        }
    }

    fn apply(&self, action: Action<T>) {
        apply(&self.partition, self.reporter.as_ref(), action);
    }

    fn invalidate_dependents(&self) {
        for dependent in &self.dependents {
            dependent.invalidate();
        }
    }
}

/// One actual fetch-all round-trip; `fetch_all` wraps this in the
/// single-flight registry.
async fn fetch_all_once<T: Record>(
    partition: Partition<T>,
    http: Arc<dyn TableClient>,
    reporter: Arc<dyn ErrorReporter>,
) -> Vec<T> {
    apply(&partition, reporter.as_ref(), Action::SetLoading(true));

    let context = format!("fetching {}", T::TABLE);
    match http
        .request(Method::Get, &api::list_path(T::TABLE), None)
        .await
    {
        Ok(Some(value)) => match serde_json::from_value::<Vec<T>>(value) {
            Ok(rows) => {
                log::debug!("fetched {} {} rows", rows.len(), T::TABLE);
                apply(&partition, reporter.as_ref(), Action::SetAll(rows));
            }
            Err(err) => reporter.handle_error(
                &ApiError::Unknown(format!("malformed list response: {}", err)),
                &context,
            ),
        },
        // A data-less success is a valid empty table.
        Ok(None) => apply(&partition, reporter.as_ref(), Action::SetAll(Vec::new())),
        Err(error) if error.is_session_expiry() => {
            log::debug!("session expired while {}; clearing partition", context);
            apply(&partition, reporter.as_ref(), Action::SetAll(Vec::new()));
        }
        Err(error) => reporter.handle_error(&error, &context),
    }

    apply(&partition, reporter.as_ref(), Action::SetLoading(false));
    partition.items().unwrap_or_default()
}

/// Dispatch, routing a poisoned-lock failure to the reporter instead of
/// letting it escape an operation that promises not to throw.
fn apply<T: Record>(partition: &Partition<T>, reporter: &dyn ErrorReporter, action: Action<T>) {
    if let Err(err) = partition.dispatch(action) {
        reporter.handle_error(&ApiError::Unknown(err.to_string()), "cache dispatch");
    }
}

/// Build `{ id, ...partial }` from a caller-supplied patch.
fn into_patch_body(id: &str, patch: Value) -> Result<Value, ApiError> {
    let mut fields = match patch {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            return Err(ApiError::Validation(format!(
                "update patch must be a JSON object, got {}",
                other
            )))
        }
    };
    fields.insert("id".to_string(), Value::String(id.to_string()));
    Ok(Value::Object(fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn patch_body_injects_id() {
        let body = into_patch_body("c1", json!({ "first_name": "Ada" })).unwrap();
        assert_eq!(body, json!({ "id": "c1", "first_name": "Ada" }));
    }

    #[test]
    fn patch_body_accepts_null_as_empty() {
        let body = into_patch_body("c1", Value::Null).unwrap();
        assert_eq!(body, json!({ "id": "c1" }));
    }

    #[test]
    fn patch_body_rejects_non_objects() {
        let err = into_patch_body("c1", json!([1, 2])).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
