use std::time::Duration;

use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use serde::Serialize;

use crate::body::Body;
use crate::error::GatewayError;
use crate::transfer::Upload;

/// Which statuses a call resolves with instead of rejecting.
///
/// This is configured per call, never globally: a handful of endpoints let
/// callers branch on 4xx themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Only 2xx resolves; everything else is classified, notified and rejected.
    #[default]
    RejectErrors,
    /// 4xx resolves too, silently; only 5xx and transport failures reject.
    TolerateClientErrors,
}

impl StatusPolicy {
    #[must_use]
    pub fn accepts(self, status: StatusCode) -> bool {
        match self {
            Self::RejectErrors => status.is_success(),
            Self::TolerateClientErrors => !status.is_server_error(),
        }
    }
}

/// HTTP request with method, path, query, headers, body and status policy
#[derive(Debug)]
pub struct Request {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: Body,
    timeout: Option<Duration>,
    status_policy: StatusPolicy,
}

impl Request {
    /// An empty builder; prefer the per-method shorthands.
    #[must_use]
    pub fn builder() -> RequestBuilder {
        RequestBuilder::default()
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> RequestBuilder {
        Self::builder().method(Method::GET).path(path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> RequestBuilder {
        Self::builder().method(Method::POST).path(path)
    }

    #[must_use]
    pub fn put(path: impl Into<String>) -> RequestBuilder {
        Self::builder().method(Method::PUT).path(path)
    }

    #[must_use]
    pub fn patch(path: impl Into<String>) -> RequestBuilder {
        Self::builder().method(Method::PATCH).path(path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> RequestBuilder {
        Self::builder().method(Method::DELETE).path(path)
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Get the request path, relative to the gateway base URL
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Consume the request, keeping only its body.
    #[must_use]
    pub fn into_body(self) -> Body {
        self.body
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    #[must_use]
    pub fn status_policy(&self) -> StatusPolicy {
        self.status_policy
    }
}

/// Fluent builder behind [`Request::get`] and friends.
#[derive(Debug, Default)]
pub struct RequestBuilder {
    method: Option<Method>,
    path: Option<String>,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: Body,
    timeout: Option<Duration>,
    status_policy: StatusPolicy,
}

impl RequestBuilder {
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Append one query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append several query parameters
    #[must_use]
    pub fn query_pairs<I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.query.extend(pairs);
        self
    }

    /// Add a header
    ///
    /// # Errors
    /// Returns `GatewayError::Build` if the name or value is not a valid header.
    pub fn header<K, V>(mut self, key: K, value: V) -> Result<Self, GatewayError>
    where
        K: TryInto<HeaderName>,
        V: TryInto<HeaderValue>,
        K::Error: std::fmt::Display,
        V::Error: std::fmt::Display,
    {
        let key = key
            .try_into()
            .map_err(|e| GatewayError::Build(format!("Invalid header name: {e}")))?;
        let value = value
            .try_into()
            .map_err(|e| GatewayError::Build(format!("Invalid header value: {e}")))?;
        self.headers.insert(key, value);
        Ok(self)
    }

    /// Set the body to a JSON-serialized value and add Content-Type header
    ///
    /// # Errors
    /// Returns `GatewayError::Decode` if the value cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, GatewayError> {
        self.body = Body::from_json(value)?;
        self.headers.insert(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        Ok(self)
    }

    /// Send a file as a multipart form; the transport sets the boundary header
    #[must_use]
    pub fn upload(mut self, upload: Upload) -> Self {
        self.body = Body::Multipart(upload);
        self.headers.remove(http::header::CONTENT_TYPE);
        self
    }

    /// Set request timeout
    #[must_use]
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    #[must_use]
    pub fn status_policy(mut self, policy: StatusPolicy) -> Self {
        self.status_policy = policy;
        self
    }

    /// Shorthand for [`StatusPolicy::TolerateClientErrors`]
    #[must_use]
    pub fn tolerate_client_errors(self) -> Self {
        self.status_policy(StatusPolicy::TolerateClientErrors)
    }

    /// Build the request
    ///
    /// # Errors
    /// Returns `GatewayError::Build` if no path was set.
    pub fn build(self) -> Result<Request, GatewayError> {
        let method = self.method.unwrap_or(Method::GET);
        let path = self
            .path
            .ok_or_else(|| GatewayError::Build("Request path is required".into()))?;

        Ok(Request {
            method,
            path,
            query: self.query,
            headers: self.headers,
            body: self.body,
            timeout: self.timeout,
            status_policy: self.status_policy,
        })
    }
}
