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
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorKind;
use crate::error::ErrorReport;
use crate::error::fail_with;

/// The scheduling phase of a card.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStatus {
    /// Never reviewed.
    New,
    /// Climbing the learning steps.
    Learning,
    /// Graduated; intervals are measured in days.
    Review,
    /// Lapsed out of review and climbing the relearning steps.
    Relearning,
}

impl CardStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardStatus::New => "new",
            CardStatus::Learning => "learning",
            CardStatus::Review => "review",
            CardStatus::Relearning => "relearning",
        }
    }
}

impl FromStr for CardStatus {
    type Err = ErrorReport;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "new" => Ok(CardStatus::New),
            "learning" => Ok(CardStatus::Learning),
            "review" => Ok(CardStatus::Review),
            "relearning" => Ok(CardStatus::Relearning),
            _ => fail_with(
                ErrorKind::InvalidStatus,
                format!("invalid card status: {value}"),
            ),
        }
    }
}

impl TryFrom<String> for CardStatus {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Display for CardStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_string_forms() -> Fallible<()> {
        for status in [
            CardStatus::New,
            CardStatus::Learning,
            CardStatus::Review,
            CardStatus::Relearning,
        ] {
            assert_eq!(status.as_str().parse::<CardStatus>()?, status);
        }
        Ok(())
    }

    #[test]
    fn test_unknown_status() {
        let err = CardStatus::try_from("suspended".to_string()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidStatus);
        assert_eq!(err.to_string(), "error: invalid card status: suspended");
    }

    #[test]
    fn test_serde_uses_literal_strings() {
        let json = serde_json::to_string(&CardStatus::Relearning).unwrap();
        assert_eq!(json, "\"relearning\"");
        let parsed: Result<CardStatus, _> = serde_json::from_str("\"Review\"");
        assert!(parsed.is_err());
    }
}
