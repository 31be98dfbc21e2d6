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

//! OVH api request signer

use http::header::ACCEPT;
use http::HeaderValue;
use log::debug;
use ovhapi_core::hash::hex_sha1_parts;
use ovhapi_core::time::{now, unix_seconds, DateTime};
use ovhapi_core::{Context, Error, Result, SignRequest, SigningCredential};

use crate::constants::*;
use crate::Credential;

/// SigningUrl is the target string the request was built from.
///
/// `http::Uri` normalizes its text form, a host-only target gains a trailing
/// `/`, while the server checks the signature against the raw target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SigningUrl(pub(crate) String);

/// RequestSigner that implements the OVH api signature.
///
/// ```text
/// X-Ovh-Signature: "$1$" + hex(sha1(secret+consumer+method+url+body+timestamp))
/// ```
///
/// The timestamp is the local time corrected by the clock offset measured
/// against the server when the client was built.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSigner {
    time_delta: i64,
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a signer with the clock offset `local - server` in seconds.
    pub fn new(time_delta: i64) -> Self {
        Self {
            time_delta,
            time: None,
        }
    }

    /// Specify the local signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Clock offset applied by this signer.
    pub fn time_delta(&self) -> i64 {
        self.time_delta
    }

    /// Timestamp sent to the server: local time minus the clock offset.
    ///
    /// Saturates at the `i64` bounds.
    pub fn timestamp(&self) -> i64 {
        unix_seconds(self.time.unwrap_or_else(now)).saturating_sub(self.time_delta)
    }
}

#[async_trait::async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _ctx: &Context,
        parts: &mut http::request::Parts,
        body: &[u8],
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let cred = credential
            .filter(|c| c.is_valid())
            .ok_or_else(|| {
                Error::config_invalid(
                    "missing credential: application key, application secret and consumer key are required",
                )
            })?;

        let timestamp = self.timestamp();
        let url = match parts.extensions.get::<SigningUrl>() {
            Some(SigningUrl(url)) => url.clone(),
            None => parts.uri.to_string(),
        };
        let signature = signature(
            &cred.application_secret,
            &cred.consumer_key,
            parts.method.as_str(),
            &url,
            body,
            timestamp,
        );
        debug!("signed {} {url} at {timestamp}", parts.method);

        parts
            .headers
            .insert(X_OVH_TIMESTAMP, HeaderValue::from(timestamp));
        parts
            .headers
            .insert(X_OVH_CONSUMER, HeaderValue::from_str(&cred.consumer_key)?);
        parts
            .headers
            .insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));
        parts.headers.insert(X_OVH_SIGNATURE, {
            let mut value = HeaderValue::from_str(&signature)?;
            value.set_sensitive(true);
            value
        });

        Ok(())
    }
}

/// Compute the signature of a request.
///
/// The six values are joined by `+` in this exact order and hashed with
/// SHA1. The server recomputes the same digest, so the output must stay
/// byte-identical for identical inputs.
pub fn signature(
    application_secret: &str,
    consumer_key: &str,
    method: &str,
    url: &str,
    body: &[u8],
    timestamp: i64,
) -> String {
    let timestamp = timestamp.to_string();
    let digest = hex_sha1_parts([
        application_secret.as_bytes(),
        b"+",
        consumer_key.as_bytes(),
        b"+",
        method.as_bytes(),
        b"+",
        url.as_bytes(),
        b"+",
        body,
        b"+",
        timestamp.as_bytes(),
    ]);

    format!("{SIGNATURE_VERSION}{digest}")
}
