use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Client, Instrument, Record};
use crate::query::Queryable;

/// How a client relates to an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationshipType {
    Interested,
    Sold,
    Booked,
    Owned,
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationshipType::Interested => write!(f, "Interested"),
            RelationshipType::Sold => write!(f, "Sold"),
            RelationshipType::Booked => write!(f, "Booked"),
            RelationshipType::Owned => write!(f, "Owned"),
        }
    }
}

/// A client-instrument relationship.
///
/// Carries optional denormalized snapshots of both ends for display, which
/// is why mutating a client or an instrument marks this partition stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: String,
    pub client_id: String,
    pub instrument_id: String,
    pub relationship_type: RelationshipType,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<Client>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument: Option<Instrument>,
}

impl Record for Connection {
    const TABLE: &'static str = "connections";
    type Draft = ConnectionDraft;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Queryable for Connection {
    const SEARCH_FIELDS: &'static [&'static str] = &["note", "client_name", "instrument_maker"];

    fn field(&self, name: &str) -> Vec<String> {
        match name {
            "client_id" => vec![self.client_id.clone()],
            "instrument_id" => vec![self.instrument_id.clone()],
            "relationship_type" => vec![self.relationship_type.to_string()],
            "note" => self.note.clone().into_iter().collect(),
            "client_name" => self.client.iter().map(Client::full_name).collect(),
            "instrument_maker" => self
                .instrument
                .iter()
                .filter_map(|i| i.maker.clone())
                .collect(),
            "created_at" => self.created_at.iter().map(|t| t.to_rfc3339()).collect(),
            _ => Vec::new(),
        }
    }
}

/// Create payload for a connection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionDraft {
    pub client_id: String,
    pub instrument_id: String,
    pub relationship_type: RelationshipType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ConnectionDraft {
    pub fn new(
        client_id: impl Into<String>,
        instrument_id: impl Into<String>,
        relationship_type: RelationshipType,
    ) -> Self {
        ConnectionDraft {
            client_id: client_id.into(),
            instrument_id: instrument_id.into(),
            relationship_type,
            note: None,
        }
    }
}
