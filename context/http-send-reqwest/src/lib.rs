// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Reqwest-based transport for the ovhapi client.
//!
//! `ReqwestHttpSend` implements the `HttpSend` trait from `ovhapi_core`.
//! The wrapped `reqwest::Client` owns the connection pool and is shared by
//! every call made through the same `Context`.
//!
//! ## Example
//!
//! ```no_run
//! use ovhapi_core::Context;
//! use ovhapi_http_send_reqwest::ReqwestHttpSend;
//! use reqwest::Client;
//!
//! let client = Client::builder()
//!     .pool_max_idle_per_host(10)
//!     .user_agent("my-app/1.0")
//!     .build()
//!     .unwrap();
//!
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use log::debug;
use ovhapi_core::{Error, HttpSend, RequestTimeout, Result};
use reqwest::{Client, Request};

/// Reqwest-based implementation of the `HttpSend` trait.
///
/// The [`RequestTimeout`] extension of the incoming request is applied as the
/// per-request timeout, covering connect, headers and body.
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let timeout = req.extensions().get::<RequestTimeout>().copied();
        let url = req.uri().to_string();

        let mut req = Request::try_from(req).map_err(|e| {
            Error::transport("failed to build transport request")
                .with_source(e)
                .with_context(format!("url: {url}"))
        })?;
        if let Some(RequestTimeout(timeout)) = timeout {
            *req.timeout_mut() = Some(timeout);
        }

        debug!("sending {} {url}", req.method());
        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| classify_error(e, &url))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| classify_error(e, &url))?;
        Ok(http::Response::from_parts(parts, bs))
    }
}

fn classify_error(err: reqwest::Error, url: &str) -> Error {
    let e = if err.is_timeout() {
        Error::timeout("request timed out")
    } else {
        Error::transport("failed to send request")
    };

    e.with_source(err).with_context(format!("url: {url}"))
}
