//! Recording transport for tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use futures::future::{FutureExt, LocalBoxFuture};

use super::{ApiRequest, ApiResponse, Method, Transport};
use crate::error::ApiError;

#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<String, (u16, String)>>,
    log: Mutex<Vec<ApiRequest>>,
}

/// Route key: method, path and (except for POST) the query string
fn route_key(method: Method, path_and_query: &str) -> String {
    format!("{} {}", method, path_and_query)
}

fn request_key(request: &ApiRequest) -> String {
    if request.params.is_empty() || request.method == Method::Post {
        return route_key(request.method, &request.path);
    }
    let query = request
        .params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");
    route_key(request.method, &format!("{}?{}", request.path, query))
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Answer `method path_and_query` with a canned response
    pub fn respond(&self, method: Method, path_and_query: &str, status: u16, body: &str) {
        self.routes
            .lock()
            .unwrap()
            .insert(route_key(method, path_and_query), (status, body.to_string()));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.log.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<ApiRequest> {
        self.requests().into_iter().filter(|r| r.path == path).collect()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, ApiError>> {
        let key = request_key(&request);
        let path = request.path.clone();
        self.log.lock().unwrap().push(request);
        let found = self.routes.lock().unwrap().get(&key).cloned();
        async move {
            match found {
                Some((status, body)) => Ok(ApiResponse { status, url: path, body }),
                None => Err(ApiError::Network(format!("no route for {}", key))),
            }
        }
        .boxed_local()
    }
}
