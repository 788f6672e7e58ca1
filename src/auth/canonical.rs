//! Canonical query construction.
//!
//! The canonical string is the exact byte sequence that is both signed and
//! transmitted, so it is built once per request and never re-encoded.

use crate::auth::Credentials;
use crate::params::{ParamOrder, QueryParams};

/// Name of the injected API key parameter.
pub const API_KEY_PARAM: &str = "api_key";
/// Name of the injected timestamp parameter.
pub const TIMESTAMP_PARAM: &str = "request_timestamp";

/// Inject `api_key` and `request_timestamp` into `params` and encode them.
///
/// Caller-supplied values for either name are discarded; the injected entries
/// are appended after the caller's parameters, `api_key` first. With
/// [`ParamOrder::Sorted`] the whole bag, injected entries included, is sorted.
pub fn canonical_query(
    mut params: QueryParams,
    credentials: &Credentials,
    timestamp: i64,
    order: ParamOrder,
) -> String {
    params.append_overriding(API_KEY_PARAM, credentials.api_key());
    params.append_overriding(TIMESTAMP_PARAM, timestamp);
    params.encode(order)
}
