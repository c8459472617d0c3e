use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Record;
use crate::query::Queryable;

/// A workshop client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    /// Client-facing display number, assigned on creation when absent.
    #[serde(default)]
    pub client_number: Option<u32>,
    /// Free-form tag set. The "Owner" tag drives the owned-instruments fetch.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub interest: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Client {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Whether this client owns instruments (carries the "Owner" tag).
    pub fn is_owner(&self) -> bool {
        self.has_tag("Owner")
    }
}

impl Record for Client {
    const TABLE: &'static str = "clients";
    type Draft = ClientDraft;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Queryable for Client {
    const SEARCH_FIELDS: &'static [&'static str] =
        &["first_name", "last_name", "email", "phone", "note"];

    fn field(&self, name: &str) -> Vec<String> {
        match name {
            "first_name" => vec![self.first_name.clone()],
            "last_name" => vec![self.last_name.clone()],
            "email" => self.email.clone().into_iter().collect(),
            "phone" => self.phone.clone().into_iter().collect(),
            "note" => self.note.clone().into_iter().collect(),
            "interest" => self.interest.clone().into_iter().collect(),
            "tags" => self.tags.iter().cloned().collect(),
            "client_number" => self.client_number.iter().map(u32::to_string).collect(),
            "created_at" => self.created_at.iter().map(|t| t.to_rfc3339()).collect(),
            _ => Vec::new(),
        }
    }
}

/// Create payload for a client.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClientDraft {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_number: Option<u32>,
    pub tags: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest: Option<String>,
}

impl ClientDraft {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        ClientDraft {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..ClientDraft::default()
        }
    }
}

/// The lowest unused positive sequence number given the numbers already taken.
/// Used to assign `client_number` when a draft omits it.
pub fn lowest_unused_number<I: IntoIterator<Item = u32>>(taken: I) -> u32 {
    let taken: BTreeSet<u32> = taken.into_iter().collect();
    let mut candidate = 1;
    while taken.contains(&candidate) {
        candidate += 1;
    }
    candidate
}
