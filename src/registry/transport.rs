//! HTTP transport seam for the registry client
//!
//! [`RegistryClient`](crate::registry::RegistryClient) never touches `reqwest`
//! directly. It builds [`HttpRequest`] values and hands them to an
//! [`HttpTransport`], which returns a fully-read [`HttpResponse`] or a
//! [`RegistryError::Transport`] when no response arrived. The production
//! implementation is [`ReqwestTransport`]; [`ScriptedTransport`] answers from
//! a fixed route table and records every request.

use crate::config::ClientConfig;
use crate::error::handlers::NetworkErrorHandler;
use crate::error::{RegistryError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Delete => f.write_str("DELETE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
        }
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            url: url.into(),
            headers: Vec::new(),
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }
}

/// Something that can carry a single HTTP exchange
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// `reqwest` backed transport used by the binary
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Certificate verification is switched off for every request. The
    /// registries this tool targets serve self-signed certificates; an
    /// operator pointing it at an untrusted network accepts that a
    /// man-in-the-middle could answer in the registry's place.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(config.timeout_duration())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| RegistryError::Validation(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Delete => self.client.delete(&request.url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let context = format!("{} {}", request.method, request.url);
        let response = builder
            .send()
            .await
            .map_err(|e| NetworkErrorHandler::handle_network_error(&e, &context))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| NetworkErrorHandler::handle_network_error(&e, &context))?
            .to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Test double answering from a route table.
///
/// Unrouted requests get an empty 404. Every request is recorded in order.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Vec<(Method, String, Reply)>,
    requests: Mutex<Vec<HttpRequest>>,
}

#[derive(Debug, Clone)]
enum Reply {
    Response(HttpResponse),
    Unreachable(String),
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, method: Method, url: impl Into<String>, response: HttpResponse) -> Self {
        self.routes
            .push((method, url.into(), Reply::Response(response)));
        self
    }

    /// Fail the matching request as if the connection was refused
    pub fn unreachable(mut self, method: Method, url: impl Into<String>) -> Self {
        let url = url.into();
        let message = format!("Connection error during {} {}: connection refused", method, url);
        self.routes.push((method, url, Reply::Unreachable(message)));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Recorded requests with the given method, in order
    pub fn requests_with(&self, method: Method) -> Vec<HttpRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.method == method)
            .collect()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let reply = self
            .routes
            .iter()
            .find(|(method, url, _)| *method == request.method && *url == request.url)
            .map(|(_, _, reply)| reply.clone());

        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Unreachable(message)) => Err(RegistryError::Transport(message)),
            None => Ok(HttpResponse::new(404)),
        }
    }
}
