use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed taxonomy of backend failures.
///
/// Classification happens exactly once, at the transport boundary (see
/// [`ApiError::classify`]); everything downstream switches on the tag
/// instead of re-matching message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Missing or rejected credentials.
    Unauthorized(String),
    /// The session's refresh token is gone or invalid.
    SessionExpired(String),
    /// Transport-level failure (connection refused, timeout, 5xx).
    Network(String),
    /// The backend rejected the payload.
    Validation(String),
    /// Anything the taxonomy cannot place.
    Unknown(String),
}

impl ApiError {
    /// Classify a backend error body into a tagged variant.
    ///
    /// Recognized session-expiry signatures: a message containing
    /// "Invalid Refresh Token" or "Refresh Token Not Found", or a code of
    /// `SESSION_EXPIRED`. A code of `UNAUTHORIZED` maps to `Unauthorized`,
    /// `VALIDATION` to `Validation`; everything else is `Unknown`.
    pub fn classify(body: &ErrorBody) -> ApiError {
        let message = body.message.clone().unwrap_or_default();
        if message.contains("Invalid Refresh Token")
            || message.contains("Refresh Token Not Found")
        {
            return ApiError::SessionExpired(message);
        }
        match body.code.as_deref() {
            Some("SESSION_EXPIRED") => ApiError::SessionExpired(message),
            Some("UNAUTHORIZED") => ApiError::Unauthorized(message),
            Some("VALIDATION") => ApiError::Validation(message),
            Some(code) if message.is_empty() => ApiError::Unknown(code.to_string()),
            _ => ApiError::Unknown(message),
        }
    }

    /// Whether a `fetch_all` should short-circuit to an empty result
    /// instead of escalating (prevents a refresh loop against an expired
    /// session).
    pub fn is_session_expiry(&self) -> bool {
        matches!(
            self,
            ApiError::Unauthorized(_) | ApiError::SessionExpired(_)
        )
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::Unauthorized(msg)
            | ApiError::SessionExpired(msg)
            | ApiError::Network(msg)
            | ApiError::Validation(msg)
            | ApiError::Unknown(msg) => msg,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized(msg) => write!(f, "unauthorized: {}", msg),
            ApiError::SessionExpired(msg) => write!(f, "session expired: {}", msg),
            ApiError::Network(msg) => write!(f, "network failure: {}", msg),
            ApiError::Validation(msg) => write!(f, "validation failed: {}", msg),
            ApiError::Unknown(msg) => write!(f, "unexpected error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Error payload shape returned by the backend: `{ error: { message?, code? } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}
