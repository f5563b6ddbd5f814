//! In-process HTTP server that records requests and replies with a scripted response.

#![allow(dead_code)]

use axum::extract::State;
use axum::http::header::LOCATION;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use configzio::{ConfigzioClient, ConfigzioConfig, TokenProvider};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// Scripted response.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
    pub delay: Option<Duration>,
    pub location: Option<String>,
}

impl Reply {
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
            location: None,
        }
    }

    /// Wait before answering.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Answer with a `Location` header.
    pub fn redirect_to(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// A request as seen by the mock server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Clone)]
pub struct MockServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    reply: Arc<Mutex<Reply>>,
    routes: Arc<Mutex<HashMap<String, Reply>>>,
}

impl MockServer {
    /// Start a server answering every request with `status` and `body`.
    pub async fn start(status: u16, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = MockServer {
            base_url: format!("http://{}", addr),
            requests: Arc::new(Mutex::new(Vec::new())),
            reply: Arc::new(Mutex::new(Reply::new(status, body))),
            routes: Arc::new(Mutex::new(HashMap::new())),
        };

        let app = Router::new().fallback(record).with_state(server.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        server
    }

    /// Change the scripted response for subsequent requests.
    pub fn reply_with(&self, status: u16, body: &str) {
        *self.reply.lock().unwrap() = Reply::new(status, body);
    }

    /// Replace the default response, including delay and headers.
    pub fn reply(&self, reply: Reply) {
        *self.reply.lock().unwrap() = reply;
    }

    /// Answer requests for `path` with `reply` instead of the default.
    pub fn route(&self, path: &str, reply: Reply) {
        self.routes.lock().unwrap().insert(path.to_string(), reply);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests()
            .pop()
            .expect("server has not received any request")
    }

    /// Client for `application` pointed at this server.
    pub fn client(
        &self,
        application: &str,
        token_provider: Option<Arc<dyn TokenProvider>>,
    ) -> ConfigzioClient {
        let config = ConfigzioConfig::new(application).with_base_url(&self.base_url);
        ConfigzioClient::from_config(config, token_provider).unwrap()
    }
}

async fn record(
    State(server): State<MockServer>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let path = uri.path().to_string();
    server.requests.lock().unwrap().push(RecordedRequest {
        method,
        path: path.clone(),
        headers,
        body,
    });

    let routed = server.routes.lock().unwrap().get(&path).cloned();
    let reply = routed.unwrap_or_else(|| server.reply.lock().unwrap().clone());

    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }

    let status = StatusCode::from_u16(reply.status).unwrap();
    match reply.location {
        Some(location) => (status, [(LOCATION, location)], reply.body).into_response(),
        None => (status, reply.body).into_response(),
    }
}

/// Install a test subscriber honouring RUST_LOG. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
