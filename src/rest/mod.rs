//! OST REST API client.
//!
//! A call flows through four stages:
//!
//! 1. the caller's [`QueryParams`](crate::params::QueryParams) are canonicalized
//!    with `api_key` and `request_timestamp` injected
//! 2. the canonical query is signed with HMAC-SHA256
//! 3. a [`SignedRequest`] is dispatched over HTTP or HTTPS
//! 4. the outcome is normalized into an [`Envelope`]
//!
//! # Trait-based API
//!
//! The [`OstRequest`] trait abstracts the `get`/`post` contract so endpoint
//! wrappers can be tested against mocks.

mod client;
mod endpoint;
mod request;
mod response;
mod traits;

pub use client::{OstClient, OstClientBuilder, SDK_NAME};
pub use endpoint::{Endpoint, Scheme};
pub use request::{FORM_CONTENT_TYPE, HttpMethod, SignedRequest};
pub use response::{Envelope, normalize};
pub use traits::{OstRequest, OstRequestExt};
