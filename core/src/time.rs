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

//! Time related utils.

use crate::Error;
use chrono::Utc;

/// DateTime is the alias for chrono::DateTime<Utc>.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Seconds since unix epoch of the given time.
pub fn unix_seconds(t: DateTime) -> i64 {
    t.timestamp()
}

/// Build a datetime from seconds since unix epoch.
pub fn from_unix_seconds(secs: i64) -> crate::Result<DateTime> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| Error::unexpected(format!("timestamp {secs} is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_seconds_round_trip() {
        let t = from_unix_seconds(1_700_000_000).unwrap();
        assert_eq!(unix_seconds(t), 1_700_000_000);
    }

    #[test]
    fn test_from_unix_seconds_out_of_range() {
        assert!(from_unix_seconds(i64::MAX).is_err());
    }
}
