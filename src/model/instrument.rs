use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Record;
use crate::query::Queryable;

/// Availability of an instrument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstrumentStatus {
    #[default]
    Available,
    Booked,
    Sold,
}

impl fmt::Display for InstrumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstrumentStatus::Available => write!(f, "Available"),
            InstrumentStatus::Booked => write!(f, "Booked"),
            InstrumentStatus::Sold => write!(f, "Sold"),
        }
    }
}

/// An instrument in the workshop's catalog.
///
/// The wire `type` field may carry a combined `kind/subkind` string; it is
/// split on deserialization (see [`split_kind`]), so `kind` never holds a
/// `/`-separated compound in memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireInstrument")]
pub struct Instrument {
    pub id: String,
    #[serde(default)]
    pub maker: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(rename = "subtype", default)]
    pub subkind: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub certificate: bool,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    /// Owning client's display name ("First Last"), when owned.
    #[serde(default)]
    pub ownership: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub status: InstrumentStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Row as the backend sends it: `type` may still be a combined
/// `kind/subkind` string, `subtype` may or may not be present.
#[derive(Deserialize)]
struct WireInstrument {
    id: String,
    #[serde(default)]
    maker: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(rename = "subtype", default)]
    subkind: Option<String>,
    #[serde(default)]
    year: Option<i32>,
    #[serde(default)]
    certificate: bool,
    #[serde(default)]
    size: Option<String>,
    #[serde(default)]
    weight: Option<String>,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    ownership: Option<String>,
    #[serde(default)]
    serial_number: Option<String>,
    #[serde(default)]
    status: InstrumentStatus,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl From<WireInstrument> for Instrument {
    fn from(wire: WireInstrument) -> Self {
        let (kind, split_subkind) = match wire.kind {
            Some(raw) => {
                let (kind, subkind) = split_kind(&raw);
                ((!kind.is_empty()).then_some(kind), subkind)
            }
            None => (None, None),
        };
        Instrument {
            id: wire.id,
            maker: wire.maker,
            kind,
            // An explicit wire subtype wins over one split out of `type`.
            subkind: wire.subkind.or(split_subkind),
            year: wire.year,
            certificate: wire.certificate,
            size: wire.size,
            weight: wire.weight,
            price: wire.price,
            ownership: wire.ownership,
            serial_number: wire.serial_number,
            status: wire.status,
            created_at: wire.created_at,
        }
    }
}

impl Record for Instrument {
    const TABLE: &'static str = "instruments";
    type Draft = InstrumentDraft;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Queryable for Instrument {
    const SEARCH_FIELDS: &'static [&'static str] =
        &["maker", "type", "serial_number", "ownership"];

    fn field(&self, name: &str) -> Vec<String> {
        match name {
            "maker" => self.maker.clone().into_iter().collect(),
            "type" => self.kind.clone().into_iter().collect(),
            "subtype" => self.subkind.clone().into_iter().collect(),
            "year" => self.year.iter().map(i32::to_string).collect(),
            "certificate" => vec![self.certificate.to_string()],
            "size" => self.size.clone().into_iter().collect(),
            "weight" => self.weight.clone().into_iter().collect(),
            "price" => self.price.iter().map(f64::to_string).collect(),
            "ownership" => self.ownership.clone().into_iter().collect(),
            "serial_number" => self.serial_number.clone().into_iter().collect(),
            "status" => vec![self.status.to_string()],
            "created_at" => self.created_at.iter().map(|t| t.to_rfc3339()).collect(),
            _ => Vec::new(),
        }
    }
}

/// Create payload for an instrument.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InstrumentDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maker: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(rename = "subtype", skip_serializing_if = "Option::is_none")]
    pub subkind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub certificate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ownership: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    pub status: InstrumentStatus,
}

impl InstrumentDraft {
    /// Build a draft from a raw `kind/subkind` string as entered in a form.
    pub fn with_raw_kind(mut self, raw: &str) -> Self {
        let (kind, subkind) = split_kind(raw);
        self.kind = if kind.is_empty() { None } else { Some(kind) };
        self.subkind = subkind;
        self
    }
}

/// Split a raw instrument type string on its first `/` into kind + subkind.
/// Whitespace around both parts is dropped; an empty subkind becomes `None`.
pub fn split_kind(raw: &str) -> (String, Option<String>) {
    match raw.split_once('/') {
        Some((kind, subkind)) => {
            let subkind = subkind.trim();
            (
                kind.trim().to_string(),
                (!subkind.is_empty()).then(|| subkind.to_string()),
            )
        }
        None => (raw.trim().to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_kind_without_separator() {
        assert_eq!(split_kind("Violin"), ("Violin".to_string(), None));
    }

    #[test]
    fn split_kind_with_subkind() {
        assert_eq!(
            split_kind("Violin/4-4"),
            ("Violin".to_string(), Some("4-4".to_string()))
        );
    }

    #[test]
    fn split_kind_trims_whitespace() {
        assert_eq!(
            split_kind(" Bow / Cello "),
            ("Bow".to_string(), Some("Cello".to_string()))
        );
    }

    #[test]
    fn split_kind_drops_empty_subkind() {
        assert_eq!(split_kind("Viola/"), ("Viola".to_string(), None));
    }

    #[test]
    fn split_kind_only_splits_on_first_separator() {
        assert_eq!(
            split_kind("Bow/Violin/Gold"),
            ("Bow".to_string(), Some("Violin/Gold".to_string()))
        );
    }

    #[test]
    fn draft_with_raw_kind_populates_both_fields() {
        let draft = InstrumentDraft::default().with_raw_kind("Cello/7-8");
        assert_eq!(draft.kind.as_deref(), Some("Cello"));
        assert_eq!(draft.subkind.as_deref(), Some("7-8"));
    }

    #[test]
    fn deserializing_splits_a_combined_type_field() {
        let row: Instrument =
            serde_json::from_value(serde_json::json!({ "id": "i1", "type": "Violin/4-4" }))
                .unwrap();
        assert_eq!(row.kind.as_deref(), Some("Violin"));
        assert_eq!(row.subkind.as_deref(), Some("4-4"));
    }

    #[test]
    fn deserializing_keeps_a_plain_type_field() {
        let row: Instrument =
            serde_json::from_value(serde_json::json!({ "id": "i1", "type": "Cello" })).unwrap();
        assert_eq!(row.kind.as_deref(), Some("Cello"));
        assert_eq!(row.subkind, None);
    }

    #[test]
    fn deserializing_prefers_an_explicit_subtype() {
        let row: Instrument = serde_json::from_value(
            serde_json::json!({ "id": "i1", "type": "Bow/Violin", "subtype": "Cello" }),
        )
        .unwrap();
        assert_eq!(row.kind.as_deref(), Some("Bow"));
        assert_eq!(row.subkind.as_deref(), Some("Cello"));
    }

    #[test]
    fn status_serializes_as_plain_variant_name() {
        let json = serde_json::to_string(&InstrumentStatus::Booked).unwrap();
        assert_eq!(json, "\"Booked\"");
    }
}
