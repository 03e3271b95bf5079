//! Browser Transport
//!
//! `fetch` through gloo-net. Cookies ride along on same-origin requests, which
//! is how the servlets know who is logged in.

use futures::future::{FutureExt, LocalBoxFuture};
use gloo_net::http::Request;

use super::{encode_form, ApiRequest, ApiResponse, Method, Transport};
use crate::error::ApiError;

pub struct HttpTransport {
    base: String,
}

impl HttpTransport {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

fn network(e: gloo_net::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

impl Transport for HttpTransport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, ApiError>> {
        async move {
            let url = format!("{}{}", self.base, request.path);
            let query = request.params.iter().map(|(k, v)| (k.as_str(), v.as_str()));

            let built = match request.method {
                Method::Get => Request::get(&url).query(query).build(),
                Method::Delete => Request::delete(&url).query(query).build(),
                Method::Post => Request::post(&url)
                    .header("Content-Type", "application/x-www-form-urlencoded")
                    .body(encode_form(&request.params)),
            }
            .map_err(network)?;

            log::debug!("[HTTP] {} {}", request.method, url);
            let response = built.send().await.map_err(network)?;
            let status = response.status();
            let final_url = response.url();
            let body = response.text().await.map_err(network)?;

            Ok(ApiResponse { status, url: final_url, body })
        }
        .boxed_local()
    }
}
