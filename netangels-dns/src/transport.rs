//! HTTP transport
//!
//! One request in, one status code and body out. Status codes are not
//! interpreted here: each operation decides which codes mean success. The
//! [`Transport`] trait is the seam tests use to replace the network.

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use crate::config::ClientConfig;
use crate::error::{ClientError, Operation, Result};
use crate::session::Token;
use crate::utils::log_sanitizer::truncate_for_log;

/// Encoded request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// `application/x-www-form-urlencoded`.
    Form(String),
    /// `application/json`.
    Json(String),
}

impl RequestBody {
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Form(_) => "application/x-www-form-urlencoded",
            Self::Json(_) => "application/json",
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Form(s) | Self::Json(s) => s,
        }
    }
}

/// A fully described API request.
#[derive(Clone)]
pub struct ApiRequest {
    /// Which client operation issued the request; attached to any error.
    pub operation: Operation,
    pub method: Method,
    pub url: String,
    /// Sent as `Authorization: Bearer <token>` when present, even if empty.
    pub bearer: Option<Token>,
    pub body: Option<RequestBody>,
}

impl ApiRequest {
    pub fn new(operation: Operation, method: Method, url: impl Into<String>) -> Self {
        Self {
            operation,
            method,
            url: url.into(),
            bearer: None,
            body: None,
        }
    }

    #[must_use]
    pub fn bearer(mut self, token: Token) -> Self {
        self.bearer = Some(token);
        self
    }

    #[must_use]
    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }
}

impl std::fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Form bodies carry the API key.
        let body = self.body.as_ref().map(|body| match body {
            RequestBody::Form(_) => "<form>".to_string(),
            RequestBody::Json(json) => truncate_for_log(json),
        });
        f.debug_struct("ApiRequest")
            .field("operation", &self.operation)
            .field("method", &self.method)
            .field("url", &self.url)
            .field("bearer", &self.bearer)
            .field("body", &body)
            .finish()
    }
}

/// Raw API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends [`ApiRequest`]s.
///
/// Implementations return `Err` only when no HTTP response was obtained
/// (connection failure, timeout, unreadable body).
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// [`Transport`] backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// 创建带超时配置的 HTTP Client
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ClientError::HttpClientInit {
                detail: e.to_string(),
            })?;
        Ok(Self { client })
    }

    /// Use an existing client (custom proxy, TLS roots, ...).
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let operation = request.operation;
        log::debug!("[{operation}] {} {}", request.method, request.url);

        let mut builder = self.client.request(request.method, &request.url);
        if let Some(token) = &request.bearer {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token.as_str()));
        }
        if let Some(body) = request.body {
            // Form bodies carry the API key; only JSON bodies are logged.
            if let RequestBody::Json(json) = &body {
                log::debug!("[{operation}] Request Body: {}", truncate_for_log(json));
            }
            let content_type = body.content_type();
            let text = match body {
                RequestBody::Form(s) | RequestBody::Json(s) => s,
            };
            builder = builder.header(CONTENT_TYPE, content_type).body(text);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout {
                    operation,
                    detail: e.to_string(),
                }
            } else {
                ClientError::NetworkError {
                    operation,
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        log::debug!("[{operation}] Response Status: {status}");

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::NetworkError {
                operation,
                detail: format!("Failed to read response body: {e}"),
            })?;

        // The token endpoint answers with the token itself.
        if operation != Operation::Authenticate {
            log::debug!("[{operation}] Response Body: {}", truncate_for_log(&body));
        }

        Ok(ApiResponse { status, body })
    }
}
