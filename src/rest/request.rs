//! Fully resolved, signed requests.

use std::fmt;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use url::Url;

/// Content type of POST bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP methods supported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }
}

/// A request ready for transport.
///
/// The signed query travels in exactly one place: the URL query for GET, the
/// form body for POST. Built fresh for every call.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    method: HttpMethod,
    url: Url,
    headers: HeaderMap,
    body: Option<String>,
}

impl SignedRequest {
    pub(crate) fn new(
        method: HttpMethod,
        mut url: Url,
        signed_query: String,
        user_agent: HeaderValue,
    ) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, user_agent);

        let body = match method {
            HttpMethod::Get => {
                if !signed_query.is_empty() {
                    url.set_query(Some(&signed_query));
                }
                None
            }
            HttpMethod::Post => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
                (!signed_query.is_empty()).then_some(signed_query)
            }
        };

        Self {
            method,
            url,
            headers,
            body,
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }

    pub fn port(&self) -> Option<u16> {
        self.url.port_or_known_default()
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// The query string, present only for GET requests.
    pub fn query(&self) -> Option<&str> {
        self.url.query()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The form body, present only for POST requests.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub(crate) fn into_parts(self) -> (HttpMethod, Url, HeaderMap, Option<String>) {
        (self.method, self.url, self.headers, self.body)
    }
}
