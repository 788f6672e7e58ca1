//! # OST SDK
//!
//! An async Rust client for the OST KIT REST API.
//!
//! ## Features
//!
//! - HMAC-SHA256 request signing with per-client credentials
//! - Deterministic, configurable parameter canonicalization
//! - GET and POST dispatch over HTTP or HTTPS
//! - A single normalized result shape for every outcome: server failures, HTTP
//!   error statuses, transport errors and malformed bodies all arrive as
//!   [`ApiError`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ost_sdk::params::QueryParams;
//! use ost_sdk::rest::OstClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OstClient::builder()
//!         .api_key("api_key")
//!         .api_secret("api_secret")
//!         .api_endpoint("https://sandboxapi.ost.com/v1.1")
//!         .build()?;
//!
//!     let actions = client.get("/actions", QueryParams::new().with("page_no", 1)).await?;
//!     println!("Actions: {actions}");
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod params;
pub mod rest;

// Re-export commonly used types at crate root
pub use config::ClientConfig;
pub use error::{ApiError, OstError};
pub use params::{ParamOrder, ParamValue, QueryParams};
pub use rest::{Envelope, OstClient, OstRequest, OstRequestExt};

/// Result type alias using OstError
pub type Result<T> = std::result::Result<T, OstError>;
