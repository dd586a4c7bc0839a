//! Executes `HttpRequest` values against the network.
//!
//! The core never opens sockets itself; anything that can turn an
//! `HttpRequest` into an `HttpResponse` can drive `BlogApi` or `Dashboard`.
//! `UreqTransport` is the blocking implementation used by the CLI.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub trait Transport {
    /// Perform one round trip. Non-2xx statuses are returned as data; only
    /// failures to get a response at all are errors.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking HTTP transport on top of a shared `ureq::Agent`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        // Status interpretation belongs to `BlogClient`, so 4xx/5xx must come
        // back as responses.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let result = match request.method {
            HttpMethod::Get => with_headers(self.agent.get(&request.url), request).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(&request.url), request).call(),
            HttpMethod::Post => {
                let builder = with_headers(self.agent.post(&request.url), request);
                match &request.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
            HttpMethod::Put => {
                let builder = with_headers(self.agent.put(&request.url), request);
                match &request.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    request: &HttpRequest,
) -> ureq::RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
