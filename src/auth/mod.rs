//! Authentication module for the OST API.
//!
//! This module provides:
//! - Credential storage with a redacted secret
//! - Request timestamps
//! - Canonical query construction (`api_key` and `request_timestamp` injection)
//! - HMAC-SHA256 signature generation

mod canonical;
mod credentials;
mod signing;
mod timestamp;

pub use canonical::{API_KEY_PARAM, TIMESTAMP_PARAM, canonical_query};
pub use credentials::Credentials;
pub use signing::{sign_query, signature};
pub use timestamp::{FixedTimestamp, SystemClock, TimestampProvider};
