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

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorKind;
use crate::error::ErrorReport;
use crate::error::fail_with;

/// The user's self-assessed recall quality for one review. Persisted as the
/// integers 1-4.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Rating {
    Again = 1,
    Hard = 2,
    Good = 3,
    Easy = 4,
}

impl Rating {
    pub const ALL: [Rating; 4] = [Rating::Again, Rating::Hard, Rating::Good, Rating::Easy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Again => "again",
            Rating::Hard => "hard",
            Rating::Good => "good",
            Rating::Easy => "easy",
        }
    }
}

impl TryFrom<u8> for Rating {
    type Error = ErrorReport;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Rating::Again),
            2 => Ok(Rating::Hard),
            3 => Ok(Rating::Good),
            4 => Ok(Rating::Easy),
            _ => fail_with(ErrorKind::InvalidRating, format!("invalid rating: {value}")),
        }
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value as u8
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_integer_values() -> Fallible<()> {
        for (value, rating) in (1u8..=4).zip(Rating::ALL) {
            assert_eq!(Rating::try_from(value)?, rating);
            assert_eq!(u8::from(rating), value);
        }
        Ok(())
    }

    #[test]
    fn test_invalid_rating() {
        for value in [0u8, 5, 255] {
            let err = Rating::try_from(value).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidRating);
        }
    }

    #[test]
    fn test_serde_as_integer() {
        assert_eq!(serde_json::to_string(&Rating::Good).unwrap(), "3");
        let rating: Rating = serde_json::from_str("4").unwrap();
        assert_eq!(rating, Rating::Easy);
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }
}
