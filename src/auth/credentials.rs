//! Credential management for OST API authentication.

use secrecy::{ExposeSecret, SecretString};

use crate::error::OstError;

/// API credentials containing the key and secret.
///
/// Validated once at construction and never mutated afterwards. Each client
/// owns its own copy, so clients with different credentials can coexist.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    api_secret: SecretString,
}

impl Credentials {
    /// Create new credentials from an API key and secret.
    ///
    /// Fails with [`OstError::Config`] if either value is empty or whitespace.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<SecretString>,
    ) -> Result<Self, OstError> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();

        if api_key.trim().is_empty() {
            return Err(OstError::Config("API key not present.".to_string()));
        }
        if api_secret.expose_secret().trim().is_empty() {
            return Err(OstError::Config("API secret not present.".to_string()));
        }

        Ok(Self {
            api_key,
            api_secret,
        })
    }

    /// The API key, sent with every request as `api_key`.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the API secret for signing.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}
