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

use http::Method;
use log::debug;
use ovhapi_core::time::{now, unix_seconds, DateTime};
use ovhapi_core::{Error, Result};

use crate::constants::TIME_PATH;
use crate::dispatch::Dispatcher;

/// Measure the clock offset between the local host and the server.
///
/// Returns `local - server` in seconds. Signatures carry `local - offset`
/// so that they fall into the server freshness window even when the local
/// clock is skewed.
pub(crate) async fn sync_time_delta(dispatcher: &Dispatcher, time: Option<DateTime>) -> Result<i64> {
    let req = dispatcher.build_request::<()>(Method::GET, TIME_PATH, None)?;
    let resp = dispatcher.send(req).await?;
    resp.decode_error(&[200])?;

    let server_time: i64 = resp.json()?;
    let local_time = unix_seconds(time.unwrap_or_else(now));
    let delta = local_time.checked_sub(server_time).ok_or_else(|| {
        Error::response_invalid("server time is out of range")
            .with_context(format!("server time: {server_time}"))
    })?;

    debug!("server time is {server_time}, local clock is {delta}s ahead");
    Ok(delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Endpoint;
    use async_trait::async_trait;
    use bytes::Bytes;
    use ovhapi_core::time::from_unix_seconds;
    use ovhapi_core::{Context, ErrorKind, HttpSend};
    use std::time::Duration;

    #[derive(Debug)]
    struct TimeServer {
        status: u16,
        body: &'static str,
    }

    #[async_trait]
    impl HttpSend for TimeServer {
        async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
            assert_eq!(req.uri(), "https://eu.api.ovh.com/1.0/auth/time");
            assert!(req.headers().get("x-ovh-signature").is_none());

            Ok(http::Response::builder()
                .status(self.status)
                .body(Bytes::from_static(self.body.as_bytes()))
                .expect("response must be valid"))
        }
    }

    #[derive(Debug)]
    struct Unreachable;

    #[async_trait]
    impl HttpSend for Unreachable {
        async fn http_send(&self, _: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
            Err(Error::transport("connection refused"))
        }
    }

    fn dispatcher(http: impl HttpSend) -> Dispatcher {
        Dispatcher::new(
            Context::new().with_http_send(http),
            Endpoint::resolve("ovh-eu"),
            "app".to_string(),
            Duration::from_secs(10),
        )
    }

    #[tokio::test]
    async fn test_sync_time_delta() {
        let d = dispatcher(TimeServer {
            status: 200,
            body: "1700000000",
        });

        let local = from_unix_seconds(1_700_000_005).unwrap();
        assert_eq!(sync_time_delta(&d, Some(local)).await.unwrap(), 5);

        let local = from_unix_seconds(1_699_999_990).unwrap();
        assert_eq!(sync_time_delta(&d, Some(local)).await.unwrap(), -10);
    }

    #[tokio::test]
    async fn test_sync_time_delta_invalid_body() {
        let d = dispatcher(TimeServer {
            status: 200,
            body: "\"yesterday\"",
        });

        let err = sync_time_delta(&d, None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResponseInvalid);
    }

    #[tokio::test]
    async fn test_sync_time_delta_out_of_range() {
        let d = dispatcher(TimeServer {
            status: 200,
            body: "-9223372036854775808",
        });

        let local = from_unix_seconds(1_700_000_000).unwrap();
        let err = sync_time_delta(&d, Some(local)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResponseInvalid);
    }

    #[tokio::test]
    async fn test_sync_time_delta_server_error() {
        let d = dispatcher(TimeServer {
            status: 503,
            body: "",
        });

        let err = sync_time_delta(&d, None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RemoteOpaque);
        assert_eq!(err.to_string(), "503 - Service Unavailable");
    }

    #[tokio::test]
    async fn test_sync_time_delta_transport_error() {
        let err = sync_time_delta(&dispatcher(Unreachable), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
