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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

/// The broad category of an error. Every category here is a caller bug
/// (bad input or bad configuration), so there is nothing to retry.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    /// A rating outside of 1-4.
    InvalidRating,
    /// A card status string that is not one of the four known statuses.
    InvalidStatus,
    /// A configuration that the scheduler cannot work with.
    InvalidConfig,
    Other,
}

#[derive(Debug)]
pub struct ErrorReport {
    kind: ErrorKind,
    message: String,
}

impl ErrorReport {
    pub fn new(message: &str) -> Self {
        Self::with_kind(ErrorKind::Other, message)
    }

    pub fn with_kind(kind: ErrorKind, message: &str) -> Self {
        Self {
            kind,
            message: message.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

impl Error for ErrorReport {}

impl From<toml::de::Error> for ErrorReport {
    fn from(value: toml::de::Error) -> Self {
        let message = format!("invalid configuration: {}", value.message());
        ErrorReport::with_kind(ErrorKind::InvalidConfig, &message)
    }
}

pub type Fallible<T> = Result<T, ErrorReport>;

/// Return an error of the given kind.
pub fn fail_with<T>(kind: ErrorKind, message: impl Into<String>) -> Fallible<T> {
    Err(ErrorReport::with_kind(kind, &message.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ErrorReport::new("directory does not exist.");
        assert_eq!(err.to_string(), "error: directory does not exist.");
        assert_eq!(err.kind(), ErrorKind::Other);
    }

    #[test]
    fn test_fail_with_kind() {
        let result: Fallible<()> = fail_with(ErrorKind::InvalidRating, "invalid rating: 7");
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRating);
        assert_eq!(err.message(), "invalid rating: 7");
    }
}
