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

//! The card state machine.
//!
//! New and learning cards climb the learning steps (minutes) until they
//! graduate into review. Review cards grow their interval (days) by the
//! ease factor. A lapse sends a review card down the relearning steps, after
//! which it returns to review with a shortened interval.

use crate::config::SrsConfig;
use crate::format::format_days;
use crate::format::format_minutes;
use crate::interval::ease_after_easy;
use crate::interval::ease_after_easy_relearn;
use crate::interval::ease_after_hard;
use crate::interval::ease_after_lapse;
use crate::interval::easy_interval;
use crate::interval::easy_lapse_interval;
use crate::interval::good_interval;
use crate::interval::hard_interval;
use crate::interval::is_last_step;
use crate::interval::lapse_interval;
use crate::interval::step_minutes;
use crate::interval::valid_step;
use crate::types::card_state::CardState;
use crate::types::card_status::CardStatus;
use crate::types::rating::Rating;
use crate::types::timestamp::DAY_MS;
use crate::types::timestamp::MINUTE_MS;
use crate::types::timestamp::Timestamp;

/// How long a card waits after a review.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Wait {
    /// A learning or relearning step.
    Minutes(f64),
    /// A review interval.
    Days(f64),
}

impl Wait {
    pub fn as_millis(self) -> i64 {
        match self {
            Wait::Minutes(minutes) => (minutes * MINUTE_MS as f64).round() as i64,
            Wait::Days(days) => (days * DAY_MS as f64).round() as i64,
        }
    }

    /// Human-readable duration, e.g. `10m` or `25d`.
    pub fn format(self) -> String {
        match self {
            Wait::Minutes(minutes) => format_minutes(minutes),
            Wait::Days(days) => format_days(days),
        }
    }
}

/// The result of reviewing a card.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ReviewOutcome {
    pub new_state: CardState,
    /// Whether the card's lapse count has reached the leech threshold.
    pub is_leech: bool,
    pub next_review_date: Timestamp,
}

/// Compute a card's next state after it has been rated at `reviewed_at`.
///
/// This is a pure function: the same inputs always produce the same outcome,
/// and `state` is left untouched.
pub fn compute_next_state(
    rating: Rating,
    state: &CardState,
    config: &SrsConfig,
    reviewed_at: Timestamp,
) -> ReviewOutcome {
    let (next, wait) = plan(rating, state, config);
    let due_date = reviewed_at.offset(wait.as_millis());
    let new_state = CardState { due_date, ..next };
    ReviewOutcome {
        new_state,
        is_leech: new_state.lapse_count >= config.leech_threshold(),
        next_review_date: due_date,
    }
}

/// [`compute_next_state`] at the current time.
#[cfg(feature = "clock")]
pub fn review_now(rating: Rating, state: &CardState, config: &SrsConfig) -> ReviewOutcome {
    compute_next_state(rating, state, config, Timestamp::now())
}

/// The next state (with its due date not yet set) and the wait before it is
/// due. Shared with the previews so that they cannot disagree with the
/// scheduler.
pub(crate) fn plan(rating: Rating, state: &CardState, config: &SrsConfig) -> (CardState, Wait) {
    match state.status {
        CardStatus::New | CardStatus::Learning => plan_learning(rating, state, config),
        CardStatus::Review => plan_review(rating, state, config),
        CardStatus::Relearning => plan_relearning(rating, state, config),
    }
}

fn plan_learning(rating: Rating, state: &CardState, config: &SrsConfig) -> (CardState, Wait) {
    let steps = config.learning_steps();
    let step = state.learning_step;
    match rating {
        Rating::Again => {
            let next = CardState {
                status: CardStatus::Learning,
                learning_step: 0,
                ..*state
            };
            (next, Wait::Minutes(step_minutes(steps, 0)))
        }
        Rating::Hard => {
            let next = CardState {
                status: CardStatus::Learning,
                learning_step: valid_step(steps, step),
                ..*state
            };
            (next, Wait::Minutes(step_minutes(steps, step)))
        }
        Rating::Good => {
            if is_last_step(steps, step) {
                graduate(state, config.graduating_interval())
            } else {
                let next = CardState {
                    status: CardStatus::Learning,
                    learning_step: step + 1,
                    ..*state
                };
                (next, Wait::Minutes(step_minutes(steps, step + 1)))
            }
        }
        Rating::Easy => graduate(state, config.easy_interval()),
    }
}

fn graduate(state: &CardState, interval: f64) -> (CardState, Wait) {
    let next = CardState {
        status: CardStatus::Review,
        interval,
        learning_step: 0,
        review_count: state.review_count + 1,
        ..*state
    };
    (next, Wait::Days(interval))
}

fn plan_review(rating: Rating, state: &CardState, config: &SrsConfig) -> (CardState, Wait) {
    let CardState { interval, ease, .. } = *state;
    match rating {
        Rating::Again => {
            // The interval is kept as-is: it is halved (or cut to 70%) when
            // the card leaves relearning.
            let next = CardState {
                status: CardStatus::Relearning,
                learning_step: 0,
                ease: ease_after_lapse(ease, config),
                lapse_count: state.lapse_count + 1,
                ..*state
            };
            (
                next,
                Wait::Minutes(step_minutes(config.relearning_steps(), 0)),
            )
        }
        Rating::Hard => reviewed(
            state,
            hard_interval(interval, config),
            ease_after_hard(ease, config),
        ),
        Rating::Good => reviewed(state, good_interval(interval, ease, config), ease),
        Rating::Easy => reviewed(
            state,
            easy_interval(interval, ease, config),
            ease_after_easy(ease),
        ),
    }
}

fn reviewed(state: &CardState, interval: f64, ease: f64) -> (CardState, Wait) {
    let next = CardState {
        status: CardStatus::Review,
        interval,
        ease,
        review_count: state.review_count + 1,
        ..*state
    };
    (next, Wait::Days(interval))
}

fn plan_relearning(rating: Rating, state: &CardState, config: &SrsConfig) -> (CardState, Wait) {
    let steps = config.relearning_steps();
    let step = state.learning_step;
    match rating {
        Rating::Again => {
            let next = CardState {
                learning_step: 0,
                ..*state
            };
            (next, Wait::Minutes(step_minutes(steps, 0)))
        }
        Rating::Hard => {
            let next = CardState {
                learning_step: valid_step(steps, step),
                ..*state
            };
            (next, Wait::Minutes(step_minutes(steps, step)))
        }
        Rating::Good => {
            if is_last_step(steps, step) {
                relearned(state, lapse_interval(state.interval, config), state.ease)
            } else {
                let next = CardState {
                    learning_step: step + 1,
                    ..*state
                };
                (next, Wait::Minutes(step_minutes(steps, step + 1)))
            }
        }
        Rating::Easy => relearned(
            state,
            easy_lapse_interval(state.interval, config),
            ease_after_easy_relearn(state.ease),
        ),
    }
}

fn relearned(state: &CardState, interval: f64, ease: f64) -> (CardState, Wait) {
    let next = CardState {
        status: CardStatus::Review,
        interval,
        ease,
        learning_step: 0,
        review_count: state.review_count + 1,
        ..*state
    };
    (next, Wait::Days(interval))
}
