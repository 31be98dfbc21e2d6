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

use std::fmt::{Display, Formatter};

/// Known API deployments, keyed by their short name.
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("ovh-eu", "https://eu.api.ovh.com/1.0"),
    ("ovh-ca", "https://ca.api.ovh.com/1.0"),
    ("kimsufi-eu", "https://eu.api.kimsufi.com/1.0"),
    ("kimsufi-ca", "https://ca.api.kimsufi.com/1.0"),
    ("soyoustart-eu", "https://eu.api.soyoustart.com/1.0"),
    ("soyoustart-ca", "https://ca.api.soyoustart.com/1.0"),
    ("runabove-ca", "https://api.runabove.com/1.0"),
];

/// Endpoint is the base URL every call path is appended to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Endpoint(String);

impl Endpoint {
    /// Resolve an endpoint by name.
    ///
    /// - A name containing `/` is taken as a literal base URL.
    /// - A known name maps to its deployment in [`ENDPOINTS`].
    /// - Anything else resolves to the empty endpoint. Requests built on it
    ///   fail once they reach the transport.
    pub fn resolve(name: &str) -> Self {
        if name.contains('/') {
            return Self(name.to_string());
        }

        ENDPOINTS
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, url)| Self(url.to_string()))
            .unwrap_or_default()
    }

    /// Base URL of this endpoint.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the name given to `resolve` was not recognized.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Full target URL for `path`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.0, path)
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("ovh-eu", "https://eu.api.ovh.com/1.0"; "ovh eu")]
    #[test_case("ovh-ca", "https://ca.api.ovh.com/1.0"; "ovh ca")]
    #[test_case("kimsufi-eu", "https://eu.api.kimsufi.com/1.0"; "kimsufi eu")]
    #[test_case("soyoustart-ca", "https://ca.api.soyoustart.com/1.0"; "soyoustart ca")]
    #[test_case("runabove-ca", "https://api.runabove.com/1.0"; "runabove ca")]
    fn test_resolve_known(name: &str, expected: &str) {
        assert_eq!(Endpoint::resolve(name).as_str(), expected);
    }

    #[test]
    fn test_resolve_literal_url() {
        let ep = Endpoint::resolve("https://api.example.com/1.0");
        assert_eq!(ep.as_str(), "https://api.example.com/1.0");
        assert_eq!(ep.url("/me"), "https://api.example.com/1.0/me");
    }

    #[test]
    fn test_resolve_unknown() {
        let ep = Endpoint::resolve("ovh-us-west");
        assert!(ep.is_empty());
        assert_eq!(ep.url("/auth/time"), "/auth/time");

        assert!(Endpoint::resolve("").is_empty());
    }
}
