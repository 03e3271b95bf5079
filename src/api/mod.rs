//! Server API
//!
//! Typed wrappers over the servlet endpoints, organized by domain. Every call
//! goes through a [`Transport`], so the wrappers run the same against the
//! browser's fetch and against the test mock.

mod auth;
mod business;
mod comment;
mod follow;
mod http;
#[cfg(test)]
pub mod mock;
mod profile;

use std::fmt;
use std::sync::Arc;

use futures::future::LocalBoxFuture;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

pub use business::ProfileForm;
pub use comment::{CommentFilter, NewComment};
pub use http::HttpTransport;

// ========================
// Wire Types
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        })
    }
}

/// One request. `params` go in the query string for GET/DELETE and in a
/// form-encoded body for POST.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub params: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self { method: Method::Get, path: path.into(), params: Vec::new() }
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self { method: Method::Post, path: path.into(), params: Vec::new() }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self { method: Method::Delete, path: path.into(), params: Vec::new() }
    }

    pub fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.push((key.to_string(), value.into()));
        self
    }

    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// Final URL after redirects
    pub url: String,
    pub body: String,
}

impl ApiResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Moves requests to the server and back
pub trait Transport: Send + Sync {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, ApiError>>;
}

// ========================
// Client
// ========================

#[derive(Clone)]
pub struct Api {
    transport: Arc<dyn Transport>,
}

impl Api {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Send and reject non-2xx answers
    pub(crate) async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let path = request.path.clone();
        let response = self.transport.send(request).await?;
        if !response.ok() {
            log::warn!("[API] {} answered {}", path, response.status);
            return Err(ApiError::Status { status: response.status, url: path });
        }
        Ok(response)
    }

    pub(crate) async fn fetch_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        serde_json::from_str(&response.body).map_err(ApiError::decode)
    }
}

/// Percent-encode one path segment or form value
pub fn encode(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

/// `application/x-www-form-urlencoded` body for POST params
pub fn encode_form(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use super::mock::MockTransport;

    #[test]
    fn test_encode_form() {
        let params = vec![
            ("content".to_string(), "hi there & bye".to_string()),
            ("businessId".to_string(), "b1".to_string()),
        ];
        assert_eq!(encode_form(&params), "content=hi%20there%20%26%20bye&businessId=b1");
    }

    #[test]
    fn test_non_ok_becomes_status_error() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/business/7", 404, "not found");
        let api = Api::new(mock.clone());

        let err = block_on(api.business("7")).unwrap_err();
        assert_eq!(err, ApiError::Status { status: 404, url: "/business/7".into() });
    }

    #[test]
    fn test_bad_json_is_decode_error() {
        let mock = MockTransport::new();
        mock.respond(Method::Get, "/businesses", 200, "<html>");
        let api = Api::new(mock.clone());

        assert!(matches!(block_on(api.list_businesses()), Err(ApiError::Decode(_))));
    }
}
