// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;

use chrono::DateTime;
use chrono::SecondsFormat;
use serde::Deserialize;
use serde::Serialize;

pub const MINUTE_MS: i64 = 60 * 1000;
pub const HOUR_MS: i64 = 60 * MINUTE_MS;
pub const DAY_MS: i64 = 24 * HOUR_MS;

/// A point in time, as milliseconds since the Unix epoch.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn as_millis(self) -> i64 {
        self.0
    }

    #[cfg(feature = "clock")]
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp_millis())
    }

    /// The most recent local midnight at or before this timestamp.
    #[cfg(feature = "clock")]
    pub fn start_of_local_day(self) -> Self {
        use chrono::Local;
        use chrono::TimeZone;

        let Some(utc) = DateTime::from_timestamp_millis(self.0) else {
            return self;
        };
        let midnight = utc.with_timezone(&Local).date_naive().and_hms_opt(0, 0, 0);
        match midnight.and_then(|m| Local.from_local_datetime(&m).earliest()) {
            Some(local) => Self(local.timestamp_millis()),
            None => self,
        }
    }

    /// Local date and time to the minute, e.g. `2024-01-15 11:00`.
    #[cfg(feature = "clock")]
    pub fn local_datetime(self) -> String {
        use chrono::Local;

        match DateTime::from_timestamp_millis(self.0) {
            Some(utc) => utc.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
            None => self.to_string(),
        }
    }

    /// Shift by a signed number of milliseconds, saturating at the ends of
    /// the representable range.
    pub fn offset(self, millis: i64) -> Self {
        Self(self.0.saturating_add(millis))
    }

    /// Signed milliseconds from `other` to `self`.
    pub fn millis_since(self, other: Timestamp) -> i64 {
        self.0.saturating_sub(other.0)
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match DateTime::from_timestamp_millis(self.0) {
            Some(ts) => write!(f, "{}", ts.to_rfc3339_opts(SecondsFormat::Secs, true)),
            None => write!(f, "{}ms", self.0),
        }
    }
}
