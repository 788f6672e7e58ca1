//! API endpoint resolution.

use std::fmt;

use url::Url;

use crate::error::OstError;

/// Transport scheme of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A version-specific API base URL, e.g. `https://sandboxapi.ost.com/v1.1`.
///
/// Parsed once at client construction. A single trailing slash is stripped so
/// that resources like `/users` can be appended directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: String,
    scheme: Scheme,
    host: String,
    port: u16,
    base_path: String,
}

impl Endpoint {
    /// Parse and normalize an endpoint URL.
    pub fn parse(raw: &str) -> Result<Self, OstError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(OstError::Config("API endpoint not present.".to_string()));
        }
        let base = trimmed.strip_suffix('/').unwrap_or(trimmed).to_string();

        let url = Url::parse(&base)?;
        let scheme = match url.scheme() {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            other => {
                return Err(OstError::InvalidEndpoint(format!(
                    "unsupported scheme '{other}' in {base}"
                )));
            }
        };
        let host = url
            .host_str()
            .ok_or_else(|| OstError::InvalidEndpoint(format!("missing host in {base}")))?
            .to_string();
        let port = url
            .port_or_known_default()
            .ok_or_else(|| OstError::InvalidEndpoint(format!("missing port in {base}")))?;
        let base_path = url.path().trim_end_matches('/').to_string();

        Ok(Self {
            base,
            scheme,
            host,
            port,
            base_path,
        })
    }

    /// The normalized base URL, without a trailing slash.
    pub fn as_str(&self) -> &str {
        &self.base
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Path prefix shared by every resource, e.g. `/v1.1`. Empty at the root.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Resolve a resource by plain concatenation with the base URL.
    pub fn resolve(&self, resource: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!("{}{}", self.base, resource))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}
