//! Error types for the OST client library.
//!
//! Errors come in two tiers. [`OstError`] is returned while building a client
//! and is fatal to client creation. [`ApiError`] is the failure half of every
//! request outcome: transport problems, HTTP status codes and malformed bodies
//! are all normalized into it, so callers never see a raw socket or parse error.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors raised while configuring or constructing a client.
#[derive(Error, Debug)]
pub enum OstError {
    /// Required configuration (API key, secret or endpoint) is missing or empty
    #[error("Configuration error: {0}")]
    Config(String),

    /// The API endpoint is not an absolute http or https URL
    #[error("Invalid API endpoint: {0}")]
    InvalidEndpoint(String),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// The underlying HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// A parameter bag could not be built from the given input
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// Signing key could not be used
    #[error("Authentication error: {0}")]
    Auth(String),
}

/// A structured failure returned by the API or synthesized by the SDK.
///
/// Serialized with the wire names used by the service:
/// `{"code", "internal_id", "msg", "error_data"}`.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{code} ({internal_id}): {msg}")]
pub struct ApiError {
    /// Stable error code, e.g. `BAD_REQUEST`
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub code: String,
    /// Server-side (or `SDK(<code>)`) identifier for the failure
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub internal_id: String,
    /// Human-readable message, empty for synthesized failures
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub msg: String,
    /// Per-field details supplied by the server
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub error_data: Vec<Value>,
}

impl ApiError {
    /// Create an error with the given code and message and no field details.
    pub fn new(
        code: impl Into<String>,
        internal_id: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            internal_id: internal_id.into(),
            msg: msg.into(),
            error_data: Vec::new(),
        }
    }

    /// Synthesize an SDK-side failure: `internal_id` is `SDK(<code>)`, `msg` is empty.
    pub fn sdk(code: &str) -> Self {
        Self::new(code, format!("SDK({code})"), "")
    }

    /// The failure used when a response body cannot be decoded.
    pub fn parse_failure() -> Self {
        let mut err = Self::sdk(error_codes::SOMETHING_WENT_WRONG);
        err.msg = error_codes::PARSE_ERROR_MSG.to_string();
        err
    }

    /// Map an HTTP status (or its absence) to the SDK code used when no body arrived.
    pub fn code_for_status(status: Option<u16>) -> &'static str {
        match status {
            Some(400) => error_codes::BAD_REQUEST,
            Some(429) => error_codes::TOO_MANY_REQUESTS,
            Some(502) => error_codes::BAD_GATEWAY,
            Some(503) => error_codes::SERVICE_UNAVAILABLE,
            Some(504) => error_codes::GATEWAY_TIMEOUT,
            _ => error_codes::SOMETHING_WENT_WRONG,
        }
    }

    /// Whether this failure was synthesized by the SDK rather than sent by the server.
    pub fn is_sdk_generated(&self) -> bool {
        self.internal_id.starts_with("SDK(")
    }

    /// Names of the parameters the server rejected, taken from `error_data[].parameter`.
    pub fn error_fields(&self) -> Vec<&str> {
        self.error_data
            .iter()
            .filter_map(|entry| entry.get("parameter").and_then(Value::as_str))
            .collect()
    }

    /// Check if this is a bad request error.
    pub fn is_bad_request(&self) -> bool {
        self.code == error_codes::BAD_REQUEST
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limited(&self) -> bool {
        self.code == error_codes::TOO_MANY_REQUESTS
    }

    /// Check if the failure came from an unhealthy upstream (502, 503, 504).
    pub fn is_upstream_unavailable(&self) -> bool {
        matches!(
            self.code.as_str(),
            error_codes::BAD_GATEWAY | error_codes::SERVICE_UNAVAILABLE | error_codes::GATEWAY_TIMEOUT
        )
    }

    /// Check if this is the catch-all error.
    pub fn is_something_went_wrong(&self) -> bool {
        self.code == error_codes::SOMETHING_WENT_WRONG
    }
}

/// Error codes synthesized by the SDK.
pub mod error_codes {
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const TOO_MANY_REQUESTS: &str = "TOO_MANY_REQUESTS";
    pub const BAD_GATEWAY: &str = "BAD_GATEWAY";
    pub const SERVICE_UNAVAILABLE: &str = "SERVICE_UNAVAILABLE";
    pub const GATEWAY_TIMEOUT: &str = "GATEWAY_TIMEOUT";
    pub const SOMETHING_WENT_WRONG: &str = "SOMETHING_WENT_WRONG";

    /// Message carried by the failure synthesized for an undecodable body.
    pub const PARSE_ERROR_MSG: &str = "Response parsing error";
}

/// Treats an explicit `null` the same as a missing field.
mod null_as_default {
    use super::*;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + Deserialize<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}
