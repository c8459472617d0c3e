use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use super::ApiError;

/// HTTP verb for a table request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Patch => write!(f, "PATCH"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

/// The external HTTP collaborator.
///
/// Implementations translate transport and backend errors into [`ApiError`]
/// at this boundary. `Ok(Some(json))` is a data-bearing success,
/// `Ok(None)` a data-less one (a delete, or a fetch of an empty table).
#[async_trait]
pub trait TableClient: Send + Sync {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Option<Value>, ApiError>;
}

/// `GET /api/<table>?orderBy=created_at&ascending=false`
pub(crate) fn list_path(table: &str) -> String {
    format!("/api/{}?orderBy=created_at&ascending=false", table)
}

/// `POST`/`PATCH /api/<table>`
pub(crate) fn table_path(table: &str) -> String {
    format!("/api/{}", table)
}

/// `DELETE /api/<table>?id=<id>`
pub(crate) fn delete_path(table: &str, id: &str) -> String {
    format!("/api/{}?id={}", table, encode_query_value(id))
}

/// Owned-instruments lookup by the owning client's display name.
pub(crate) fn owned_path(owner: &str) -> String {
    format!(
        "/api/instruments?ownership={}&orderBy=created_at&ascending=false",
        encode_query_value(owner)
    )
}

/// Percent-encode a query value. RFC 3986 unreserved bytes pass through.
fn encode_query_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
