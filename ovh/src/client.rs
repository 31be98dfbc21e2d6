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

use std::fmt::{Debug, Formatter};
use std::time::Duration;

use http::Method;
use log::{debug, warn};
use ovhapi_core::time::DateTime;
use ovhapi_core::{Context, Result, SignRequest};
use serde::Serialize;

use crate::clock::sync_time_delta;
use crate::constants::DEFAULT_TIMEOUT;
use crate::dispatch::Dispatcher;
use crate::{Config, Credential, Endpoint, RequestSigner, Response};

/// Client for the OVH api family.
///
/// A client is built once, which costs one round trip to calibrate the
/// clock, and then reused for many calls. It is cheap to clone and safe to
/// share between tasks.
#[derive(Clone)]
pub struct Client {
    dispatcher: Dispatcher,
    credential: Credential,
    signer: RequestSigner,
}

impl Debug for Client {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", self.dispatcher.endpoint())
            .field("credential", &self.credential)
            .field("timeout", &self.dispatcher.timeout())
            .field("time_delta", &self.signer.time_delta())
            .finish()
    }
}

impl Client {
    /// Create a builder for the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client from the given context and config.
    pub async fn new(ctx: Context, config: Config) -> Result<Self> {
        Self::builder()
            .with_context(ctx)
            .with_config(config)
            .build()
            .await
    }

    /// Create a client from env values and config files, using the default context.
    #[cfg(feature = "default-context")]
    pub async fn new_default() -> Result<Self> {
        let ctx = crate::default_context();
        let config = Config::new()
            .from_env(&ctx)
            .from_config_files(&ctx)
            .await?;

        Self::new(ctx, config).await
    }

    /// Create a client for `endpoint`, with credentials from env values and
    /// config files, using the default context.
    #[cfg(feature = "default-context")]
    pub async fn new_endpoint(endpoint: &str) -> Result<Self> {
        let ctx = crate::default_context();
        let config = Config::new()
            .with_endpoint(endpoint)
            .from_env(&ctx)
            .from_config_files(&ctx)
            .await?;

        Self::new(ctx, config).await
    }

    /// Base endpoint of this client.
    pub fn endpoint(&self) -> &Endpoint {
        self.dispatcher.endpoint()
    }

    /// Application key sent with every call.
    pub fn application_key(&self) -> &str {
        self.dispatcher.application_key()
    }

    /// Timeout applied to every call.
    pub fn timeout(&self) -> Duration {
        self.dispatcher.timeout()
    }

    /// Clock offset `local - server` in seconds, measured at construction.
    pub fn time_delta(&self) -> i64 {
        self.signer.time_delta()
    }

    /// Call the api and sign the request if `need_auth` is true.
    ///
    /// `path` is appended to the endpoint as is. `payload`, if any, is sent
    /// as JSON. Unauthenticated calls carry no signature headers at all, some
    /// routes (`/auth/time`, `/auth/credential`, parts of `/order`) reject
    /// requests that have them.
    ///
    /// The response is returned whatever its status, use
    /// [`Response::decode_error`] to check it.
    pub async fn call<T: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        payload: Option<&T>,
        need_auth: bool,
    ) -> Result<Response> {
        let req = self.dispatcher.build_request(method, path, payload)?;

        let req = if need_auth {
            let (mut parts, body) = req.into_parts();
            self.signer
                .sign_request(
                    self.dispatcher.context(),
                    &mut parts,
                    &body,
                    Some(&self.credential),
                )
                .await?;
            http::Request::from_parts(parts, body)
        } else {
            req
        };

        self.dispatcher.send(req).await
    }

    /// Issue an authenticated GET request on `path`.
    pub async fn get(&self, path: &str) -> Result<Response> {
        self.call::<()>(Method::GET, path, None, true).await
    }

    /// Issue an unauthenticated GET request on `path`.
    pub async fn get_unauth(&self, path: &str) -> Result<Response> {
        self.call::<()>(Method::GET, path, None, false).await
    }

    /// Issue an authenticated POST request on `path`.
    pub async fn post<T: Serialize + ?Sized>(&self, path: &str, data: &T) -> Result<Response> {
        self.call(Method::POST, path, Some(data), true).await
    }

    /// Issue an unauthenticated POST request on `path`.
    pub async fn post_unauth<T: Serialize + ?Sized>(
        &self,
        path: &str,
        data: &T,
    ) -> Result<Response> {
        self.call(Method::POST, path, Some(data), false).await
    }

    /// Issue an authenticated PUT request on `path`.
    pub async fn put<T: Serialize + ?Sized>(&self, path: &str, data: &T) -> Result<Response> {
        self.call(Method::PUT, path, Some(data), true).await
    }

    /// Issue an unauthenticated PUT request on `path`.
    pub async fn put_unauth<T: Serialize + ?Sized>(
        &self,
        path: &str,
        data: &T,
    ) -> Result<Response> {
        self.call(Method::PUT, path, Some(data), false).await
    }

    /// Issue an authenticated DELETE request on `path`.
    pub async fn delete(&self, path: &str) -> Result<Response> {
        self.call::<()>(Method::DELETE, path, None, true).await
    }

    /// Issue an unauthenticated DELETE request on `path`.
    pub async fn delete_unauth(&self, path: &str) -> Result<Response> {
        self.call::<()>(Method::DELETE, path, None, false).await
    }
}

/// ClientBuilder assembles a [`Client`].
///
/// `build` resolves the endpoint, then calibrates the clock against the
/// server before handing out the client. A client is never returned without
/// a measured clock offset.
#[derive(Debug, Default)]
pub struct ClientBuilder {
    ctx: Context,
    config: Config,
    time: Option<DateTime>,
}

impl ClientBuilder {
    /// Set the context providing the transport.
    pub fn with_context(mut self, ctx: Context) -> Self {
        self.ctx = ctx;
        self
    }

    /// Set the config.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Specify the local time used for calibration and signing.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Build the client.
    pub async fn build(self) -> Result<Client> {
        let name = self.config.endpoint.clone().unwrap_or_default();
        let endpoint = Endpoint::resolve(&name);
        if endpoint.is_empty() {
            warn!("endpoint {name:?} is unknown, calls will fail to reach the api");
        }

        let credential = self.config.credential();
        let timeout = self.config.timeout.unwrap_or(DEFAULT_TIMEOUT);
        let dispatcher = Dispatcher::new(
            self.ctx,
            endpoint,
            credential.application_key.clone(),
            timeout,
        );

        let time_delta = sync_time_delta(&dispatcher, self.time).await?;
        let signer = match self.time {
            Some(time) => RequestSigner::new(time_delta).with_time(time),
            None => RequestSigner::new(time_delta),
        };
        debug!("client ready for {}", dispatcher.endpoint());

        Ok(Client {
            dispatcher,
            credential,
            signer,
        })
    }
}
