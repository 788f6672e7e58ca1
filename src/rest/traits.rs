//! Trait definitions for the OST REST client.
//!
//! Domain services (transactions, actions, users, ...) only need a resource
//! path and a parameter bag, so they are written against [`OstRequest`] rather
//! than the concrete client. This enables:
//! - Mock implementations for testing
//! - Decorators around the real client
//!
//! ```rust,ignore
//! use ost_sdk::params::QueryParams;
//! use ost_sdk::rest::OstRequestExt;
//!
//! #[derive(serde::Deserialize)]
//! struct UserList { users: Vec<serde_json::Value> }
//!
//! async fn list_users<C: OstRequestExt>(client: &C) -> Result<UserList, ost_sdk::ApiError> {
//!     client.get_as("/users", QueryParams::new().with("page_no", 1)).await
//! }
//! ```

use std::future::Future;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::params::QueryParams;
use crate::rest::OstClient;

/// The signed request contract shared by every OST endpoint.
///
/// `Ok` carries the envelope's `data`, `Err` the normalized failure.
pub trait OstRequest: Send + Sync {
    /// Send a signed GET request.
    fn get(
        &self,
        resource: &str,
        params: QueryParams,
    ) -> impl Future<Output = Result<Value, ApiError>> + Send;

    /// Send a signed POST request.
    fn post(
        &self,
        resource: &str,
        params: QueryParams,
    ) -> impl Future<Output = Result<Value, ApiError>> + Send;
}

impl OstRequest for OstClient {
    async fn get(&self, resource: &str, params: QueryParams) -> Result<Value, ApiError> {
        OstClient::get(self, resource, params).await
    }

    async fn post(&self, resource: &str, params: QueryParams) -> Result<Value, ApiError> {
        OstClient::post(self, resource, params).await
    }
}

/// Typed access to response data.
///
/// Implemented for every [`OstRequest`]. A `data` payload that does not match
/// `T` is reported as the SDK's response parsing failure.
pub trait OstRequestExt: OstRequest {
    /// Send a GET request and decode `data` into `T`.
    fn get_as<T>(
        &self,
        resource: &str,
        params: QueryParams,
    ) -> impl Future<Output = Result<T, ApiError>> + Send
    where
        T: DeserializeOwned + Send,
    {
        async move { decode_data(self.get(resource, params).await?) }
    }

    /// Send a POST request and decode `data` into `T`.
    fn post_as<T>(
        &self,
        resource: &str,
        params: QueryParams,
    ) -> impl Future<Output = Result<T, ApiError>> + Send
    where
        T: DeserializeOwned + Send,
    {
        async move { decode_data(self.post(resource, params).await?) }
    }
}

impl<C: OstRequest + ?Sized> OstRequestExt for C {}

fn decode_data<T: DeserializeOwned>(data: Value) -> Result<T, ApiError> {
    serde_json::from_value(data).map_err(|e| {
        tracing::warn!("Failed to decode response data: {}", e);
        ApiError::parse_failure()
    })
}
