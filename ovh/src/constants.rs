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

// Env values used by the ovh client.
pub const OVH_ENDPOINT: &str = "OVH_ENDPOINT";
pub const OVH_APPLICATION_KEY: &str = "OVH_APPLICATION_KEY";
pub const OVH_APPLICATION_SECRET: &str = "OVH_APPLICATION_SECRET";
pub const OVH_CONSUMER_KEY: &str = "OVH_CONSUMER_KEY";

/// Config files, from lowest to highest priority.
pub const OVH_CONFIG_FILES: [&str; 3] = ["/etc/ovh.conf", "~/.ovh.conf", "./ovh.conf"];
pub const OVH_CONFIG_DEFAULT_SECTION: &str = "default";

// Headers used by the ovh client.
pub const X_OVH_APPLICATION: &str = "x-ovh-application";
pub const X_OVH_TIMESTAMP: &str = "x-ovh-timestamp";
pub const X_OVH_CONSUMER: &str = "x-ovh-consumer";
pub const X_OVH_SIGNATURE: &str = "x-ovh-signature";

pub const CONTENT_TYPE_JSON: &str = "application/json;charset=utf-8";
pub const ACCEPT_JSON: &str = "application/json";

/// Version tag prepended to every signature.
pub const SIGNATURE_VERSION: &str = "$1$";

/// Unauthenticated route returning the server time in epoch seconds.
pub const TIME_PATH: &str = "/auth/time";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(180);
