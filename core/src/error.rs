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

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// The error type for ovhapi operations
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
    context: Vec<String>,
    api_error: Option<ApiError>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration error (unknown endpoint, missing credentials, broken config file)
    ConfigInvalid,

    /// Request cannot be built (invalid header values, etc.)
    RequestInvalid,

    /// Payload cannot be serialized to JSON
    EncodeFailed,

    /// DNS, connect, TLS or IO failure while talking to the remote service
    Transport,

    /// The configured timeout elapsed before the call completed
    Timeout,

    /// The remote service answered with an unexpected status and a structured error
    RemoteApi,

    /// The remote service answered with an unexpected status and no structured error
    RemoteOpaque,

    /// Response body cannot be decoded into the expected shape
    ResponseInvalid,

    /// Unexpected errors (IO, missing components, etc.)
    Unexpected,
}

/// ApiError is the structured error payload returned by the remote service.
///
/// Every field is optional on the wire and defaults to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiError {
    /// Machine readable error code, like `Client::NotFound`.
    #[serde(rename = "errorCode")]
    pub error_code: String,
    /// HTTP code as reported by the service, may duplicate the status code.
    #[serde(rename = "httpCode")]
    pub http_code: String,
    /// Human readable message.
    pub message: String,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
            context: Vec::new(),
            api_error: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Add a context line, like the url or the endpoint being called.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the context lines attached to this error.
    pub fn context(&self) -> &[String] {
        &self.context
    }

    /// Get the structured error returned by the remote service, if any.
    pub fn api_error(&self) -> Option<&ApiError> {
        self.api_error.as_ref()
    }

    /// Check if this error happened while talking to the remote service.
    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport | ErrorKind::Timeout)
    }

    /// Check if this error was returned by the remote service.
    pub fn is_remote(&self) -> bool {
        matches!(self.kind, ErrorKind::RemoteApi | ErrorKind::RemoteOpaque)
    }
}

// Convenience constructors
impl Error {
    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create an encode failed error
    pub fn encode_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EncodeFailed, message)
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Create a timeout error
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// Create a remote error carrying the decoded payload.
    ///
    /// The message of the returned error is the message of the payload.
    pub fn remote_api(api_error: ApiError) -> Self {
        let mut err = Self::new(ErrorKind::RemoteApi, api_error.message.clone());
        err.api_error = Some(api_error);
        err
    }

    /// Create a remote error for responses without a structured payload.
    pub fn remote_opaque(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RemoteOpaque, message)
    }

    /// Create a response invalid error
    pub fn response_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ResponseInvalid, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::EncodeFailed => write!(f, "encode failed"),
            ErrorKind::Transport => write!(f, "transport error"),
            ErrorKind::Timeout => write!(f, "timed out"),
            ErrorKind::RemoteApi => write!(f, "remote api error"),
            ErrorKind::RemoteOpaque => write!(f, "remote error"),
            ErrorKind::ResponseInvalid => write!(f, "invalid response"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_remote_api_error_uses_payload_message() {
        let payload = ApiError {
            error_code: "Client::NotFound".to_string(),
            http_code: "404".to_string(),
            message: "not found".to_string(),
        };

        let err = Error::remote_api(payload.clone());
        assert_eq!(err.kind(), ErrorKind::RemoteApi);
        assert_eq!(err.to_string(), "not found");
        assert_eq!(err.api_error(), Some(&payload));
        assert!(err.is_remote());
        assert!(!err.is_transport());
    }

    #[test]
    fn test_api_error_missing_fields_default_to_empty() {
        let payload: ApiError = serde_json::from_str(r#"{"message":"boom"}"#).unwrap();
        assert_eq!(payload.error_code, "");
        assert_eq!(payload.http_code, "");
        assert_eq!(payload.message, "boom");
    }

    #[test]
    fn test_invalid_header_value_is_request_invalid() {
        let err: Error = http::HeaderValue::from_str("bad\nvalue").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_timeout_is_transport() {
        let err = Error::timeout("deadline elapsed").with_context("url: https://example.com");
        assert!(err.is_transport());
        assert_eq!(err.context(), ["url: https://example.com".to_string()]);
    }
}
