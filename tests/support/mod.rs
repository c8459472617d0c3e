//! Shared test doubles: a scripted HTTP collaborator and a collecting
//! error reporter, plus row builders.

#![allow(dead_code)]

use std::collections::{BTreeSet, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Semaphore;

use atelier_cache::{
    ApiError, Client, Connection, ErrorReporter, Instrument, InstrumentStatus, Method,
    RelationshipType, TableClient,
};

pub type Scripted = Result<Option<Value>, ApiError>;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// Collaborator double that replays queued responses in order and records
/// every call. An optional semaphore gate parks requests after they are
/// recorded, so tests can hold a round-trip open.
pub struct ScriptedClient {
    responses: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<RecordedCall>>,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        ScriptedClient {
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub fn gated(gate: Arc<Semaphore>) -> Self {
        ScriptedClient {
            gate: Some(gate),
            ..ScriptedClient::new()
        }
    }

    pub fn push(&self, response: Scripted) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TableClient for ScriptedClient {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Option<Value>, ApiError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            body,
        });
        if let Some(gate) = &self.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Unknown("script exhausted".to_string())))
    }
}

/// Reporter double that records everything it is handed.
pub struct CollectingReporter {
    reports: Mutex<Vec<(ApiError, String)>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        CollectingReporter {
            reports: Mutex::new(Vec::new()),
        }
    }

    pub fn reports(&self) -> Vec<(ApiError, String)> {
        self.reports.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.reports.lock().unwrap().len()
    }
}

impl ErrorReporter for CollectingReporter {
    fn handle_error(&self, error: &ApiError, context: &str) {
        self.reports
            .lock()
            .unwrap()
            .push((error.clone(), context.to_string()));
    }
}

pub fn client(id: &str, first: &str, last: &str) -> Client {
    Client {
        id: id.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: None,
        phone: None,
        note: None,
        client_number: None,
        tags: BTreeSet::new(),
        interest: None,
        created_at: None,
    }
}

pub fn client_json(id: &str, first: &str, last: &str) -> Value {
    serde_json::to_value(client(id, first, last)).unwrap()
}

pub fn instrument(id: &str, maker: &str) -> Instrument {
    Instrument {
        id: id.to_string(),
        maker: Some(maker.to_string()),
        kind: None,
        subkind: None,
        year: None,
        certificate: false,
        size: None,
        weight: None,
        price: None,
        ownership: None,
        serial_number: None,
        status: InstrumentStatus::Available,
        created_at: None,
    }
}

pub fn instrument_json(id: &str, maker: &str) -> Value {
    serde_json::to_value(instrument(id, maker)).unwrap()
}

pub fn connection(id: &str, client_id: &str, instrument_id: &str) -> Connection {
    Connection {
        id: id.to_string(),
        client_id: client_id.to_string(),
        instrument_id: instrument_id.to_string(),
        relationship_type: RelationshipType::Interested,
        note: None,
        created_at: None,
        client: None,
        instrument: None,
    }
}
