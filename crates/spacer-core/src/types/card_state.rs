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

use serde::Deserialize;
use serde::Serialize;

use crate::config::SrsConfig;
use crate::types::card_status::CardStatus;
use crate::types::timestamp::Timestamp;

/// The memory state of a single card.
///
/// This is a value: the scheduler never mutates one, it returns a new state
/// for every review.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardState {
    /// The card's scheduling phase.
    pub status: CardStatus,
    /// The review interval in days. Only drives timing once the card is in
    /// review; during the learning and relearning steps it is carried along.
    pub interval: f64,
    /// The multiplier applied to the interval on a successful review.
    pub ease: f64,
    /// When the card next becomes eligible for review.
    pub due_date: Timestamp,
    /// Index into the active step list (learning or relearning).
    pub learning_step: u32,
    /// The number of times the card lapsed out of review.
    pub lapse_count: u32,
    /// The number of completed review-phase evaluations.
    pub review_count: u32,
}

impl CardState {
    /// The state of a freshly created card, due immediately.
    pub fn new(config: &SrsConfig, created_at: Timestamp) -> Self {
        Self {
            status: CardStatus::New,
            interval: 0.0,
            ease: config.starting_ease(),
            due_date: created_at,
            learning_step: 0,
            lapse_count: 0,
            review_count: 0,
        }
    }
}
