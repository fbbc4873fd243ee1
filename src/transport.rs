//! HTTP transport to the EasySlip API.

use crate::config::ApiConfig;
use crate::credentials::AccessToken;
use crate::error::{Error, Result};
use crate::request::{Method, OutboundRequest, RequestBody};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Status and decoded body of an API response.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// JSON body; non-JSON bodies are kept as a string value.
    pub body: Value,
}

impl TransportResponse {
    /// Whether the status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Canonical reason phrase for the status.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        StatusCode::from_u16(self.status)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or("Unknown Status")
    }
}

/// Executes outbound requests.
///
/// Implementations return every HTTP response, whatever its status, and use
/// `Err` only for failures that produced no response.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` authorized with `token`.
    async fn send(&self, request: &OutboundRequest, token: &AccessToken) -> Result<TransportResponse>;

    /// Absolute URL `request` will be sent to.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be formed.
    fn url_for(&self, request: &OutboundRequest) -> Result<reqwest::Url>;
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for the given API settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("easyslip-node/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Base URL requests are sent under.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &OutboundRequest, token: &AccessToken) -> Result<TransportResponse> {
        let url = self.url_for(request)?;
        debug!("{} {}", request.method.as_str(), url.path());

        let builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        }
        .bearer_auth(token.expose())
        .header(reqwest::header::ACCEPT, "application/json");

        let builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(body),
            RequestBody::Multipart(form) => {
                let file = Part::bytes(form.file.data.to_vec())
                    .file_name(form.file.upload_file_name().to_string())
                    .mime_str(form.file.upload_mime_type())
                    .map_err(|e| Error::InvalidRequest(format!("bad attachment MIME type: {e}")))?;
                let multipart = form
                    .fields
                    .iter()
                    .fold(Form::new().part("file", file), |multipart, (name, value)| {
                        multipart.text(name.clone(), value.clone())
                    });
                builder.multipart(multipart)
            }
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text))
        };

        debug!("EasySlip responded with status {}", status);
        Ok(TransportResponse { status, body })
    }

    fn url_for(&self, request: &OutboundRequest) -> Result<reqwest::Url> {
        request.url(&self.base_url)
    }
}
