use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::console::Console;

pub const BASE_URL: &str = "https://fakestoreapi.com";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {status} - {status_text}")]
    Http { status: u16, status_text: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid response body: {0}")]
    Body(#[from] serde_json::Error),
}

/// One outbound request, fully resolved before it reaches the send
/// primitive.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

/// The raw send primitive. Injected into the transport so it can be
/// exercised with scripted responses instead of a live endpoint.
#[async_trait]
pub trait HttpSend: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

pub struct ReqwestSend {
    client: reqwest::Client,
}

impl ReqwestSend {
    pub fn new() -> anyhow::Result<Self> {
        use anyhow::Context;

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpSend for ReqwestSend {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status
                .canonical_reason()
                .unwrap_or("Unknown")
                .to_string(),
            body,
        })
    }
}

/// Issues one request against the base endpoint and returns the parsed
/// JSON payload. Logs a diagnostic line per send through the console
/// port.
pub struct Transport<'a> {
    sender: &'a dyn HttpSend,
    console: &'a dyn Console,
    base_url: String,
}

impl<'a> Transport<'a> {
    pub fn new(sender: &'a dyn HttpSend, console: &'a dyn Console, base_url: &str) -> Self {
        Self {
            sender,
            console,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Sends `method path` with an optional JSON body. The JSON
    /// content-type is always set; caller headers are merged on top
    /// and only replace it when they name it explicitly. A non-2xx
    /// status maps to `ApiError::Http`.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<&Value>,
        extra_headers: &[(String, String)],
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        for (name, value) in extra_headers {
            if name.eq_ignore_ascii_case("content-type") {
                headers.retain(|(n, _)| !n.eq_ignore_ascii_case("content-type"));
            }
            headers.push((name.clone(), value.clone()));
        }

        self.console
            .info(&format!("Sending request: {} {}", method, url));

        let body = match body {
            Some(value) => Some(serde_json::to_string(value)?),
            None => None,
        };

        let response = self
            .sender
            .send(HttpRequest {
                method: method.to_string(),
                url,
                headers,
                body,
            })
            .await?;

        if !(200..300).contains(&response.status) {
            return Err(ApiError::Http {
                status: response.status,
                status_text: response.status_text,
            });
        }

        // The remote returns an empty body for some valid requests
        // (e.g. an unknown product id); treat it as JSON null.
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&response.body)?)
    }
}
