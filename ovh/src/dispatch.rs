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

use std::time::Duration;

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Method};
use log::debug;
use ovhapi_core::{Context, Error, RequestTimeout, Result};
use serde::Serialize;

use crate::constants::*;
use crate::sign_request::SigningUrl;
use crate::{Endpoint, Response};

/// Dispatcher builds and sends unsigned requests against one endpoint.
///
/// It holds everything a call needs except the signing material, which is
/// enough for the clock calibration done before the client exists.
#[derive(Debug, Clone)]
pub(crate) struct Dispatcher {
    ctx: Context,
    endpoint: Endpoint,
    application_key: String,
    timeout: Duration,
}

impl Dispatcher {
    pub(crate) fn new(
        ctx: Context,
        endpoint: Endpoint,
        application_key: String,
        timeout: Duration,
    ) -> Self {
        Self {
            ctx,
            endpoint,
            application_key,
            timeout,
        }
    }

    pub(crate) fn context(&self) -> &Context {
        &self.ctx
    }

    pub(crate) fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub(crate) fn application_key(&self) -> &str {
        &self.application_key
    }

    pub(crate) fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build the request for `path` with the optional JSON payload.
    ///
    /// The body is empty, not absent, when there is no payload.
    pub(crate) fn build_request<T: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        payload: Option<&T>,
    ) -> Result<http::Request<Bytes>> {
        let target = self.endpoint.url(path);

        let body = match payload {
            Some(v) => Some(serde_json::to_vec(v).map_err(|e| {
                Error::encode_failed("failed to serialize payload")
                    .with_source(e)
                    .with_context(format!("url: {target}"))
            })?),
            None => None,
        };

        let mut req = http::Request::builder()
            .method(method)
            .uri(target.as_str())
            .body(Bytes::new())
            .map_err(|e| {
                Error::config_invalid("failed to build request, check the configured endpoint")
                    .with_source(e)
                    .with_context(format!("url: {target}"))
            })?;

        if let Some(body) = body {
            req.headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
            *req.body_mut() = Bytes::from(body);
        }
        req.headers_mut().insert(
            X_OVH_APPLICATION,
            HeaderValue::from_str(&self.application_key)?,
        );
        req.extensions_mut().insert(RequestTimeout(self.timeout));
        req.extensions_mut().insert(SigningUrl(target));

        Ok(req)
    }

    /// Send the request and normalize the answer.
    pub(crate) async fn send(&self, req: http::Request<Bytes>) -> Result<Response> {
        let method = req.method().clone();
        let url = req.uri().to_string();

        debug!("calling {method} {url}");
        let resp: Response = self.ctx.http_send(req).await?.into();
        debug!("{method} {url} returned {}", resp.status);

        Ok(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ovhapi_core::ErrorKind;
    use pretty_assertions::assert_eq;
    use serde::ser::Error as _;
    use serde::Serializer;

    fn dispatcher(endpoint: &str) -> Dispatcher {
        Dispatcher::new(
            Context::new(),
            Endpoint::resolve(endpoint),
            "app".to_string(),
            Duration::from_secs(3),
        )
    }

    #[test]
    fn test_build_request_without_payload() {
        let req = dispatcher("ovh-eu")
            .build_request::<()>(Method::GET, "/me", None)
            .unwrap();

        assert_eq!(req.method(), Method::GET);
        assert_eq!(req.uri(), "https://eu.api.ovh.com/1.0/me");
        assert!(req.body().is_empty());
        assert_eq!(req.headers()[X_OVH_APPLICATION], "app");
        assert!(req.headers().get(CONTENT_TYPE).is_none());
        assert_eq!(
            req.extensions().get::<RequestTimeout>(),
            Some(&RequestTimeout(Duration::from_secs(3)))
        );
        assert_eq!(
            req.extensions().get::<SigningUrl>(),
            Some(&SigningUrl("https://eu.api.ovh.com/1.0/me".to_string()))
        );
    }

    #[test]
    fn test_build_request_with_payload() {
        let payload = serde_json::json!({"description": "web"});
        let req = dispatcher("ovh-eu")
            .build_request(Method::PUT, "/me", Some(&payload))
            .unwrap();

        assert_eq!(req.body().as_ref(), br#"{"description":"web"}"#);
        assert_eq!(
            req.headers()[CONTENT_TYPE],
            "application/json;charset=utf-8"
        );
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _: S) -> std::result::Result<S::Ok, S::Error> {
            Err(S::Error::custom("not serializable"))
        }
    }

    #[test]
    fn test_build_request_encode_failed() {
        let err = dispatcher("ovh-eu")
            .build_request(Method::POST, "/me", Some(&Unserializable))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EncodeFailed);
    }

    #[test]
    fn test_build_request_invalid_literal_endpoint() {
        let err = dispatcher("https://bad host/1.0")
            .build_request::<()>(Method::GET, "/me", None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_build_request_unknown_endpoint() {
        // The path alone is a valid request target, the transport rejects it later.
        let req = dispatcher("unknown")
            .build_request::<()>(Method::GET, "/auth/time", None)
            .unwrap();
        assert_eq!(req.uri(), "/auth/time");
    }
}
