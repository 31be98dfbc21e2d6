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

use bytes::Bytes;
use http::StatusCode;
use ovhapi_core::{ApiError, Error, Result};
use serde::de::DeserializeOwned;

/// Response is the normalized result of a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status code returned by the service.
    pub status: StatusCode,
    /// Reason phrase of the status, like `Not Found`, or `Unknown` for
    /// codes without a registered phrase.
    pub status_text: String,
    /// Raw response body, may be empty.
    pub body: Bytes,
}

impl Response {
    /// Check the status against the expected codes.
    ///
    /// - `Ok(())` if the status is one of `expected`.
    /// - [`ovhapi_core::ErrorKind::RemoteApi`] if the body decodes as an
    ///   [`ApiError`]. The error message is the payload message and the
    ///   payload itself is available through [`Error::api_error`].
    /// - [`ovhapi_core::ErrorKind::RemoteOpaque`] with `"<code> - <status text>"`
    ///   otherwise.
    pub fn decode_error(&self, expected: &[u16]) -> Result<()> {
        if expected.contains(&self.status.as_u16()) {
            return Ok(());
        }

        match self.api_error() {
            Some(api_error) => Err(Error::remote_api(api_error)),
            None => Err(Error::remote_opaque(format!(
                "{} - {}",
                self.status.as_u16(),
                self.status_text
            ))),
        }
    }

    /// Decode the body as the structured error payload of the service.
    pub fn api_error(&self) -> Option<ApiError> {
        serde_json::from_slice(&self.body).ok()
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| {
            Error::response_invalid("failed to decode response body")
                .with_source(e)
                .with_context(format!("status: {}", self.status))
        })
    }

    /// Body as lossy utf-8 text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

impl From<http::Response<Bytes>> for Response {
    fn from(resp: http::Response<Bytes>) -> Self {
        let (parts, body) = resp.into_parts();

        Self {
            status: parts.status,
            status_text: parts
                .status
                .canonical_reason()
                .unwrap_or("Unknown")
                .to_string(),
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ovhapi_core::ErrorKind;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn response(status: u16, body: &'static str) -> Response {
        http::Response::builder()
            .status(status)
            .body(Bytes::from_static(body.as_bytes()))
            .unwrap()
            .into()
    }

    #[test]
    fn test_expected_status() {
        let resp = response(200, "");
        assert!(resp.decode_error(&[200]).is_ok());
        assert!(response(204, "").decode_error(&[200, 204]).is_ok());
    }

    #[test]
    fn test_remote_api_error() {
        let resp = response(
            404,
            r#"{"errorCode":"X","httpCode":"404","message":"not found"}"#,
        );

        let err = resp.decode_error(&[200]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RemoteApi);
        assert_eq!(err.to_string(), "not found");

        let payload = err.api_error().unwrap();
        assert_eq!(payload.error_code, "X");
        assert_eq!(payload.http_code, "404");
        assert_eq!(payload.message, "not found");
    }

    #[test_case(500, "<html>Internal Server Error</html>", "500 - Internal Server Error"; "html page")]
    #[test_case(502, "", "502 - Bad Gateway"; "empty body")]
    #[test_case(503, "[1,2,3]", "503 - Service Unavailable"; "shape mismatch")]
    #[test_case(520, "", "520 - Unknown"; "unregistered status")]
    fn test_remote_opaque_error(status: u16, body: &'static str, expected: &str) {
        let err = response(status, body).decode_error(&[200]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RemoteOpaque);
        assert_eq!(err.to_string(), expected);
        assert!(err.api_error().is_none());
    }

    #[test]
    fn test_from_http_response() {
        let resp = response(404, "gone");
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
        assert_eq!(resp.status_text, "Not Found");
        assert_eq!(resp.text(), "gone");
    }

    #[test]
    fn test_json() {
        let resp = response(200, "1700000000");
        assert_eq!(resp.json::<i64>().unwrap(), 1_700_000_000);

        let err = response(200, "\"now\"").json::<i64>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResponseInvalid);
    }
}
