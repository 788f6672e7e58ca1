//! HMAC-SHA256 signature generation for OST API authentication.
//!
//! Every request is signed as:
//! ```text
//! hex(HMAC-SHA256(api_secret, resource + "?" + canonical_query))
//! ```
//!
//! The signature is appended to the canonical query as `&signature=<hex>`.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::auth::Credentials;
use crate::error::OstError;

type HmacSha256 = Hmac<Sha256>;

/// Compute the hex-encoded signature for a resource and its canonical query.
///
/// # Example
///
/// ```rust
/// use ost_sdk::auth::{Credentials, signature};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("api_key", "api_secret")?;
/// let sig = signature(&credentials, "/users", "api_key=api_key&request_timestamp=1")?;
/// assert_eq!(sig.len(), 64);
/// # Ok(())
/// # }
/// ```
pub fn signature(
    credentials: &Credentials,
    resource: &str,
    canonical_query: &str,
) -> Result<String, OstError> {
    let message = format!("{resource}?{canonical_query}");
    hmac_sha256_hex(credentials.expose_secret().as_bytes(), message.as_bytes())
}

/// Append `&signature=<hex>` to the canonical query.
pub fn sign_query(
    credentials: &Credentials,
    resource: &str,
    canonical_query: &str,
) -> Result<String, OstError> {
    let sig = signature(credentials, resource, canonical_query)?;
    Ok(format!("{canonical_query}&signature={sig}"))
}

fn hmac_sha256_hex(key: &[u8], message: &[u8]) -> Result<String, OstError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| OstError::Auth(format!("Invalid HMAC key: {e}")))?;
    mac.update(message);
    Ok(hex::encode(mac.finalize().into_bytes()))
}
