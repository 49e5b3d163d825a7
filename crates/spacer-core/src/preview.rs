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

use serde::Serialize;

use crate::config::SrsConfig;
use crate::scheduler::Wait;
use crate::scheduler::plan;
use crate::types::card_state::CardState;
use crate::types::rating::Rating;

/// The wait each rating would produce, formatted for display on the rating
/// buttons.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct IntervalPreview {
    pub again: String,
    pub hard: String,
    pub good: String,
    pub easy: String,
}

impl IntervalPreview {
    pub fn get(&self, rating: Rating) -> &str {
        match rating {
            Rating::Again => &self.again,
            Rating::Hard => &self.hard,
            Rating::Good => &self.good,
            Rating::Easy => &self.easy,
        }
    }
}

/// The wait that rating `state` with `rating` would schedule.
pub fn preview_wait(rating: Rating, state: &CardState, config: &SrsConfig) -> Wait {
    plan(rating, state, config).1
}

/// Preview all four ratings without touching `state`.
pub fn preview_intervals(state: &CardState, config: &SrsConfig) -> IntervalPreview {
    let label = |rating| preview_wait(rating, state, config).format();
    IntervalPreview {
        again: label(Rating::Again),
        hard: label(Rating::Hard),
        good: label(Rating::Good),
        easy: label(Rating::Easy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;
    use crate::scheduler::compute_next_state;
    use crate::types::card_status::CardStatus;
    use crate::types::timestamp::DAY_MS;
    use crate::types::timestamp::Timestamp;

    fn state(status: CardStatus, interval: f64, ease: f64, step: u32) -> CardState {
        CardState {
            status,
            interval,
            ease,
            due_date: Timestamp::from_millis(0),
            learning_step: step,
            lapse_count: 0,
            review_count: 5,
        }
    }

    #[test]
    fn test_new_card() {
        let config = SrsConfig::default();
        let card = CardState::new(&config, Timestamp::from_millis(0));
        let preview = preview_intervals(&card, &config);
        assert_eq!(preview.again, "1m");
        assert_eq!(preview.hard, "1m");
        assert_eq!(preview.good, "10m");
        assert_eq!(preview.easy, "4d");
    }

    #[test]
    fn test_learning_card_on_last_step() {
        let config = SrsConfig::default();
        let card = state(CardStatus::Learning, 0.0, 2.5, 1);
        let preview = preview_intervals(&card, &config);
        assert_eq!(preview.again, "1m");
        assert_eq!(preview.hard, "10m");
        assert_eq!(preview.good, "1.0d");
        assert_eq!(preview.easy, "4d");
    }

    #[test]
    fn test_review_card() {
        let config = SrsConfig::default();
        let card = state(CardStatus::Review, 10.0, 2.5, 0);
        let preview = preview_intervals(&card, &config);
        assert_eq!(preview.again, "10m");
        assert_eq!(preview.hard, "12d");
        assert_eq!(preview.good, "25d");
        assert_eq!(preview.easy, "1.1mo");
        assert_eq!(preview.get(Rating::Good), "25d");
    }

    #[test]
    fn test_relearning_card() -> Fallible<()> {
        let config = SrsConfig::default();
        let card = state(CardStatus::Relearning, 10.0, 2.3, 0);
        let preview = preview_intervals(&card, &config);
        assert_eq!(preview.again, "10m");
        assert_eq!(preview.hard, "10m");
        assert_eq!(preview.good, "5d");
        assert_eq!(preview.easy, "7d");

        let config = SrsConfig::builder().relearning_steps([10.0, 90.0]).build()?;
        let preview = preview_intervals(&card, &config);
        assert_eq!(preview.good, "1.5h");
        Ok(())
    }

    #[test]
    fn test_preview_matches_scheduler() -> Fallible<()> {
        let config = SrsConfig::builder().learning_steps([1.0, 10.0, 60.0]).build()?;
        let now = Timestamp::from_millis(1_705_312_800_000);
        let cards = [
            CardState::new(&config, now),
            state(CardStatus::Learning, 0.0, 2.5, 1),
            state(CardStatus::Learning, 0.0, 2.5, 2),
            state(CardStatus::Review, 1.0, 2.5, 0),
            state(CardStatus::Review, 10.0, 1.3, 0),
            state(CardStatus::Review, 30000.0, 2.5, 0),
            state(CardStatus::Relearning, 10.0, 2.3, 0),
            state(CardStatus::Relearning, 1.0, 2.3, 3),
        ];
        for card in cards {
            for rating in Rating::ALL {
                let wait = preview_wait(rating, &card, &config);
                let outcome = compute_next_state(rating, &card, &config, now);
                assert_eq!(
                    outcome.new_state.due_date.millis_since(now),
                    wait.as_millis()
                );
                if outcome.new_state.status == CardStatus::Review {
                    assert_eq!(wait, Wait::Days(outcome.new_state.interval));
                    assert_eq!(wait.as_millis(), outcome.new_state.interval as i64 * DAY_MS);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_preview_does_not_mutate() {
        let config = SrsConfig::default();
        let card = state(CardStatus::Review, 10.0, 2.5, 0);
        let copy = card;
        let _ = preview_intervals(&card, &config);
        assert_eq!(card, copy);
    }
}
