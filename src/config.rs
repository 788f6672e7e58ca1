//! Client configuration.

use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;

use crate::error::OstError;
use crate::params::ParamOrder;

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "OST_KIT_API_KEY";
/// Environment variable holding the API secret.
pub const ENV_API_SECRET: &str = "OST_KIT_API_SECRET";
/// Environment variable holding the version-specific API endpoint.
pub const ENV_API_ENDPOINT: &str = "OST_KIT_API_ENDPOINT";

/// Settings for an [`OstClient`](crate::rest::OstClient).
///
/// Deserializable so it can be embedded in an application's own config file.
/// Missing credentials are not a deserialization error; they are reported as
/// [`OstError::Config`] when the client is built.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_key: String,
    pub api_secret: SecretString,
    pub api_endpoint: String,
    /// Whole-request timeout. No timeout is applied when unset.
    pub timeout_secs: Option<u64>,
    pub param_order: ParamOrder,
    pub user_agent: Option<String>,
}

impl ClientConfig {
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<SecretString>,
        api_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            api_endpoint: api_endpoint.into(),
            ..Self::default()
        }
    }

    /// Read credentials and endpoint from `OST_KIT_API_KEY`,
    /// `OST_KIT_API_SECRET` and `OST_KIT_API_ENDPOINT`.
    pub fn from_env() -> Result<Self, OstError> {
        Self::from_env_vars(ENV_API_KEY, ENV_API_SECRET, ENV_API_ENDPOINT)
    }

    /// Read credentials and endpoint from custom environment variable names.
    pub fn from_env_vars(key_var: &str, secret_var: &str, endpoint_var: &str) -> Result<Self, OstError> {
        let read = |name: &str| {
            std::env::var(name)
                .map_err(|_| OstError::Config(format!("Environment variable {name} not set")))
        };
        Ok(Self::new(read(key_var)?, read(secret_var)?, read(endpoint_var)?))
    }

    /// Like [`ClientConfig::from_env`], returning `None` if a variable is missing.
    pub fn try_from_env() -> Option<Self> {
        Self::from_env().ok()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("api_endpoint", &self.api_endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .field("param_order", &self.param_order)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
