//! Response normalization.
//!
//! Every transport outcome becomes exactly one [`Envelope`]. The wire format is
//!
//! ```text
//! {"success": true,  "data": {...}}
//! {"success": false, "err": {"code", "internal_id", "msg", "error_data"}}
//! ```
//!
//! [`normalize`] is total: any combination of body and status, including a
//! missing response, yields a well-formed envelope.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::ApiError;

/// The normalized outcome of a request.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Success { data: Value },
    Failure { err: ApiError },
}

impl Envelope {
    /// Build a failure envelope.
    pub fn failure(err: ApiError) -> Self {
        Envelope::Failure { err }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success { .. })
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            Envelope::Success { data } => Some(data),
            Envelope::Failure { .. } => None,
        }
    }

    pub fn err(&self) -> Option<&ApiError> {
        match self {
            Envelope::Success { .. } => None,
            Envelope::Failure { err } => Some(err),
        }
    }

    /// Split into the success payload or the failure.
    pub fn into_result(self) -> Result<Value, ApiError> {
        match self {
            Envelope::Success { data } => Ok(data),
            Envelope::Failure { err } => Err(err),
        }
    }

    /// Parse a response body. Anything that is not a well-formed envelope is a
    /// parse failure.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<WireEnvelope>(body) {
            Ok(WireEnvelope {
                success: true,
                data,
                ..
            }) => Envelope::Success {
                data: data.unwrap_or(Value::Null),
            },
            Ok(WireEnvelope {
                success: false,
                err: Some(err),
                ..
            }) => Envelope::Failure { err },
            Ok(WireEnvelope { err: None, .. }) => {
                tracing::warn!("Failure response without an 'err' object");
                Envelope::failure(ApiError::parse_failure())
            }
            Err(e) => {
                tracing::warn!("Response parsing error: {}", e);
                Envelope::failure(ApiError::parse_failure())
            }
        }
    }
}

impl From<Envelope> for Result<Value, ApiError> {
    fn from(envelope: Envelope) -> Self {
        envelope.into_result()
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire = match self {
            Envelope::Success { data } => WireEnvelopeRef {
                success: true,
                data: Some(data),
                err: None,
            },
            Envelope::Failure { err } => WireEnvelopeRef {
                success: false,
                data: None,
                err: Some(err),
            },
        };
        wire.serialize(serializer)
    }
}

#[derive(Deserialize)]
struct WireEnvelope {
    success: bool,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    err: Option<ApiError>,
}

#[derive(Serialize)]
struct WireEnvelopeRef<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    err: Option<&'a ApiError>,
}

/// Normalize a raw transport outcome.
///
/// `body` is the buffered response text (absent on transport failure) and
/// `status` the HTTP status (absent when no response arrived). A non-empty body
/// is always parsed, whatever the status, so structured server errors on 4xx
/// responses reach the caller intact. Without a body the status selects a
/// synthesized failure.
pub fn normalize(body: Option<&str>, status: Option<u16>) -> Envelope {
    match body.filter(|b| !b.trim().is_empty()) {
        Some(body) => Envelope::from_body(body),
        None => Envelope::failure(ApiError::sdk(ApiError::code_for_status(status))),
    }
}
