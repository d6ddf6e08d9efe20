//! Request and response types for the gateway

use crate::{ClientError, Result};
use bytes::Bytes;
use reqwest::{header::HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// HTTP verbs supported by the gateway
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A single call to issue through the gateway
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    /// HTTP verb
    pub method: Method,
    /// Absolute URL or path relative to the base URL
    pub path: String,
    /// Optional JSON payload
    pub body: Option<serde_json::Value>,
}

impl Request {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn post<B: Serialize + ?Sized>(path: impl Into<String>, body: &B) -> Result<Self> {
        Self::new(Method::Post, path).with_body(body)
    }

    pub fn put<B: Serialize + ?Sized>(path: impl Into<String>, body: &B) -> Result<Self> {
        Self::new(Method::Put, path).with_body(body)
    }

    /// Attach a JSON payload
    pub fn with_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// Response returned by the transport, buffered
#[derive(Clone, Debug)]
pub struct ApiResponse {
    /// Final URL of the request
    pub url: String,
    /// HTTP status
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body
    pub body: Bytes,
}

impl ApiResponse {
    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| {
            ClientError::InvalidResponse(format!("{} from {}: {}", self.status, self.url, e))
        })
    }

    /// Body as UTF-8 text, lossy
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Content type header, if present
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    /// Error envelope the backend embeds in otherwise successful responses:
    /// exactly `{"error_message": "...", "status": 404}`. Resources may carry
    /// a user field named `error_message`, so any other shape is data.
    pub(crate) fn embedded_error(&self) -> Option<(u16, String)> {
        let value: serde_json::Value = serde_json::from_slice(&self.body).ok()?;
        let envelope = value.as_object()?;
        if envelope.len() != 2 {
            return None;
        }
        let message = envelope.get("error_message")?.as_str()?.to_string();
        let status = u16::try_from(envelope.get("status")?.as_u64()?).ok()?;
        Some((status, message))
    }
}
