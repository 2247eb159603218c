use bytes::Bytes;
use rag_logging::{rag_debug, rag_trace};
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{ClientSettings, FileBlob, RequestError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    /// Multipart form with a single file part.
    File { field: String, file: FileBlob },
}

/// One HTTP exchange against the configured backend. `path` is relative to
/// the base URL and may carry a query string.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn post_json(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            headers: Vec::new(),
            body: RequestBody::Json(body),
        }
    }

    pub fn post_file(path: impl Into<String>, field: impl Into<String>, file: FileBlob) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            headers: Vec::new(),
            body: RequestBody::File {
                field: field.into(),
                file,
            },
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A success response. The body is kept raw; callers decode what they need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Bytes,
}

impl ApiResponse {
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, RequestError> {
        serde_json::from_slice(&self.body).map_err(|err| RequestError::decode(err.to_string()))
    }
}

/// Issues HTTP calls against a base endpoint. Every failure comes back as a
/// typed `RequestError`.
#[async_trait::async_trait]
pub trait RequestClient: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, RequestError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new(settings: ClientSettings) -> Result<Self, RequestError> {
        // No timeouts: failures are whatever the transport itself reports.
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|err| RequestError::transport(err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }
}

#[async_trait::async_trait]
impl RequestClient for ReqwestClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, RequestError> {
        rag_trace!(
            "Sending {:?} {} with {} extra header(s)",
            request.method,
            request.path,
            request.headers.len()
        );
        let url = self.settings.endpoint(&request.path).map_err(|err| {
            RequestError::invalid(format!("invalid endpoint {}: {err}", request.path))
        })?;

        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(value.to_string()),
            RequestBody::File { field, file } => {
                let FileBlob {
                    file_name,
                    content_type,
                    bytes,
                } = file;
                let part = Part::bytes(bytes.to_vec())
                    .mime_str(&content_type)
                    .map_err(|err| {
                        RequestError::invalid(format!(
                            "content type {content_type:?} for {file_name}: {err}"
                        ))
                    })?
                    .file_name(file_name);
                builder.multipart(Form::new().part(field, part))
            }
        };

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| RequestError::decode(format!("response body interrupted: {err}")))?;
        rag_debug!(
            "{:?} {} -> {} ({} bytes)",
            request.method,
            request.path,
            status.as_u16(),
            body.len()
        );

        if !status.is_success() {
            let message = server_message(&body).unwrap_or_else(|| status.to_string());
            return Err(RequestError::Http {
                status: status.as_u16(),
                message,
            });
        }

        Ok(ApiResponse {
            status: status.as_u16(),
            body,
        })
    }
}

/// Message from a structured error body: the first of `detail`, `error`,
/// `message`, unwrapping `{ "message": .. }` objects.
fn server_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    ["detail", "error", "message"]
        .into_iter()
        .find_map(|key| match value.get(key)? {
            Value::String(text) => Some(text.clone()),
            Value::Object(inner) => inner
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
            Value::Null => None,
            other => Some(other.to_string()),
        })
}

fn map_reqwest_error(err: reqwest::Error) -> RequestError {
    if err.is_connect() {
        return RequestError::transport(format!("connection failed: {err}"));
    }
    RequestError::transport(err.to_string())
}
