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

use ini::Ini;
use log::debug;
use ovhapi_core::{utils::Redact, Context, Error, Result};

use crate::constants::*;
use crate::Credential;

/// Config carries all the configuration for the ovh client.
///
/// Values set explicitly always win. `from_env` and `from_config_files` only
/// fill the fields that are still unset, so calling them in that order gives
/// the usual precedence: explicit value, then env, then config files.
#[derive(Clone, Default)]
pub struct Config {
    /// `endpoint` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OVH_ENDPOINT`]
    /// - `endpoint` in the `[default]` section of the config files
    pub endpoint: Option<String>,
    /// `application_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OVH_APPLICATION_KEY`]
    /// - `application_key` in the section named after the endpoint
    pub application_key: Option<String>,
    /// `application_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OVH_APPLICATION_SECRET`]
    /// - `application_secret` in the section named after the endpoint
    pub application_secret: Option<String>,
    /// `consumer_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OVH_CONSUMER_KEY`]
    /// - `consumer_key` in the section named after the endpoint
    pub consumer_key: Option<String>,
    /// Timeout applied to every call, defaults to 180 seconds.
    pub timeout: Option<Duration>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set endpoint, either a known name like `ovh-eu` or a base URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set application_key
    pub fn with_application_key(mut self, application_key: impl Into<String>) -> Self {
        self.application_key = Some(application_key.into());
        self
    }

    /// Set application_secret
    pub fn with_application_secret(mut self, application_secret: impl Into<String>) -> Self {
        self.application_secret = Some(application_secret.into());
        self
    }

    /// Set consumer_key
    pub fn with_consumer_key(mut self, consumer_key: impl Into<String>) -> Self {
        self.consumer_key = Some(consumer_key.into());
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = non_empty(ctx.env_var(OVH_ENDPOINT)) {
            self.endpoint.get_or_insert(v);
        }
        if let Some(v) = non_empty(ctx.env_var(OVH_APPLICATION_KEY)) {
            self.application_key.get_or_insert(v);
        }
        if let Some(v) = non_empty(ctx.env_var(OVH_APPLICATION_SECRET)) {
            self.application_secret.get_or_insert(v);
        }
        if let Some(v) = non_empty(ctx.env_var(OVH_CONSUMER_KEY)) {
            self.consumer_key.get_or_insert(v);
        }

        self
    }

    /// Load config from `/etc/ovh.conf`, `~/.ovh.conf` and `./ovh.conf`.
    ///
    /// Later files override earlier ones. Missing files are skipped.
    pub async fn from_config_files(self, ctx: &Context) -> Result<Self> {
        self.from_config_paths(ctx, &OVH_CONFIG_FILES).await
    }

    /// Load config from the given INI files, from lowest to highest priority.
    pub async fn from_config_paths(mut self, ctx: &Context, paths: &[&str]) -> Result<Self> {
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            if let Some(conf) = load_ini(ctx, path).await? {
                files.push(conf);
            }
        }
        if files.is_empty() {
            return Ok(self);
        }

        let lookup = |section: &str, key: &str| -> Option<String> {
            files
                .iter()
                .rev()
                .find_map(|conf| conf.get_from(Some(section), key))
                .filter(|v| !v.is_empty())
                .map(|v| v.to_string())
        };

        if self.endpoint.is_none() {
            self.endpoint = lookup(OVH_CONFIG_DEFAULT_SECTION, "endpoint");
        }

        let Some(section) = self.endpoint.clone() else {
            debug!("no endpoint configured, skip loading credentials from config files");
            return Ok(self);
        };

        if self.application_key.is_none() {
            self.application_key = lookup(&section, "application_key");
        }
        if self.application_secret.is_none() {
            self.application_secret = lookup(&section, "application_secret");
        }
        if self.consumer_key.is_none() {
            self.consumer_key = lookup(&section, "consumer_key");
        }

        Ok(self)
    }

    /// Build the credential out of this config, missing values are left empty.
    pub fn credential(&self) -> Credential {
        Credential::new(
            self.application_key.clone().unwrap_or_default(),
            self.application_secret.clone().unwrap_or_default(),
            self.consumer_key.clone().unwrap_or_default(),
        )
    }
}

async fn load_ini(ctx: &Context, path: &str) -> Result<Option<Ini>> {
    let Some(expanded) = ctx.expand_home_dir(path) else {
        debug!("failed to expand homedir for path: {path}");
        return Ok(None);
    };

    let content = match ctx.file_read_as_string(&expanded).await {
        Ok(content) => content,
        Err(err) => {
            debug!("skip config file {expanded}: {err}");
            return Ok(None);
        }
    };

    let conf = Ini::load_from_str(&content).map_err(|e| {
        Error::config_invalid("failed to parse config file")
            .with_source(e)
            .with_context(format!("path: {expanded}"))
    })?;

    debug!("loaded config file {expanded}");
    Ok(Some(conf))
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|v| !v.is_empty())
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("application_key", &self.application_key)
            .field(
                "application_secret",
                &self.application_secret.as_ref().map(Redact::from),
            )
            .field("consumer_key", &self.consumer_key.as_ref().map(Redact::from))
            .field("timeout", &self.timeout)
            .finish()
    }
}
