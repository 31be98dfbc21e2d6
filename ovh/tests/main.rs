use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use ovhapi_core::time::{from_unix_seconds, DateTime};
use ovhapi_core::{Context, Error, HttpSend, Result};


/// Server time answered by `MockApi` on `/auth/time`.
const SERVER_TIME: i64 = 1_700_000_000;

/// MockApi answers `/auth/time` with `SERVER_TIME` and every other route with
/// the configured status and body, recording all requests it sees.
#[derive(Debug, Clone)]
pub struct MockApi {
    status: u16,
    body: &'static str,
    time_body: Option<&'static str>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

/// Recorded is the part of a request the tests look at.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: http::Method,
    pub uri: String,
    pub headers: http::HeaderMap,
    pub body: Bytes,
}

impl MockApi {
    pub fn new(status: u16, body: &'static str) -> Self {
        Self {
            status,
            body,
            time_body: None,
            requests: Arc::default(),
        }
    }

    pub fn with_time_body(mut self, body: &'static str) -> Self {
        self.time_body = Some(body);
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("lock poisoned").clone()
    }

    pub fn last_request(&self) -> Recorded {
        self.requests()
            .pop()
            .expect("at least one request must be sent")
    }
}

#[async_trait]
impl HttpSend for MockApi {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let is_time = req.uri().path().ends_with("/auth/time");
        let (parts, body) = req.into_parts();
        self.requests.lock().expect("lock poisoned").push(Recorded {
            method: parts.method,
            uri: parts.uri.to_string(),
            headers: parts.headers,
            body,
        });

        let (status, body) = if is_time {
            let body = self.time_body.map(str::to_string);
            (200, body.unwrap_or_else(|| SERVER_TIME.to_string()))
        } else {
            (self.status, self.body.to_string())
        };

        Ok(http::Response::builder()
            .status(status)
            .body(Bytes::from(body))
            .expect("response must be valid"))
    }
}

/// Unreachable fails every request like a refused connection.
#[derive(Debug)]
pub struct Unreachable;

#[async_trait]
impl HttpSend for Unreachable {
    async fn http_send(&self, _: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        Err(Error::transport("connection refused"))
    }
}

pub fn init(http: impl HttpSend) -> Context {
    let _ = env_logger::builder().is_test(true).try_init();

    Context::new().with_http_send(http)
}

/// Local time, five seconds ahead of the server.
pub fn local_time() -> DateTime {
    from_unix_seconds(SERVER_TIME + 5).expect("time must be valid")
}
