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

use ovhapi_core::{utils::Redact, SigningCredential};

/// Credential for the ovh api.
#[derive(Clone, Default)]
pub struct Credential {
    /// Application key, sent in clear in every request.
    pub application_key: String,
    /// Application secret, only folded into signatures.
    pub application_secret: String,
    /// Consumer key scoping the identity calls are made for.
    pub consumer_key: String,
}

impl Credential {
    /// Create a new credential.
    pub fn new(
        application_key: impl Into<String>,
        application_secret: impl Into<String>,
        consumer_key: impl Into<String>,
    ) -> Self {
        Self {
            application_key: application_key.into(),
            application_secret: application_secret.into(),
            consumer_key: consumer_key.into(),
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("application_key", &self.application_key)
            .field("application_secret", &Redact::from(&self.application_secret))
            .field("consumer_key", &Redact::from(&self.consumer_key))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.application_key.is_empty()
            && !self.application_secret.is_empty()
            && !self.consumer_key.is_empty()
    }
}
