use std::time::Duration;

use crate::body::Body;
use crate::error::GatewayError;
use crate::request::Request;
use crate::response::Response;
use crate::session::BearerToken;

/// reqwest-backed transport that sends requests to the REST backend
pub(crate) struct HttpTransport {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpTransport {
    pub(crate) fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Build(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http_client,
        })
    }

    pub(crate) fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Send the request and buffer the whole response.
    ///
    /// Anything that prevents a complete response from arriving is reported as
    /// `NetworkUnreachable`; only malformed requests are `Build` errors.
    pub(crate) async fn send(
        &self,
        request: Request,
        credential: Option<&BearerToken>,
    ) -> Result<Response, GatewayError> {
        let url = self.url_for(request.path());
        let mut req_builder = self.http_client.request(request.method().clone(), &url);

        if let Some(token) = credential {
            req_builder = req_builder.bearer_auth(token.expose());
        }

        if !request.query().is_empty() {
            req_builder = req_builder.query(request.query());
        }

        // Forward headers from the request
        for (name, value) in request.headers() {
            req_builder = req_builder.header(name, value);
        }

        if let Some(timeout) = request.timeout() {
            req_builder = req_builder.timeout(timeout);
        }

        req_builder = match request.into_body() {
            Body::Empty => req_builder,
            Body::Json(bytes) => req_builder.body(bytes),
            Body::Multipart(upload) => req_builder.multipart(upload.into_form()?),
        };

        let resp = req_builder.send().await.map_err(|e| {
            if e.is_builder() {
                GatewayError::Build(e.to_string())
            } else {
                GatewayError::NetworkUnreachable(e.to_string())
            }
        })?;

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp
            .bytes()
            .await
            .map_err(|e| GatewayError::NetworkUnreachable(e.to_string()))?;

        Ok(Response::new(status, headers, body))
    }
}
