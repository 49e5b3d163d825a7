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

use spacer_core::Rating;
use spacer_core::ReviewOutcome;
use spacer_core::SrsConfig;
use spacer_core::Timestamp;
use spacer_core::compute_next_state;
use spacer_core::format_due_relative;

use crate::db::Database;
use crate::error::Fallible;
use crate::error::fail;

/// Rate a card, persisting its new state along with the previous one.
pub fn rate_card(
    db: &mut Database,
    config: &SrsConfig,
    card_id: &str,
    rating: u8,
    now: Timestamp,
    time_taken_ms: Option<u32>,
) -> Fallible<ReviewOutcome> {
    let rating = Rating::try_from(rating)?;
    let Some(state) = db.get_card_state(card_id)? else {
        return fail(format!("no such card: {card_id}"));
    };
    let outcome = compute_next_state(rating, &state, config, now);
    let next = &outcome.new_state;
    log::debug!(
        "{card_id} {rating}: {} -> {} step={} I={}d E={:.2} due={}",
        state.status,
        next.status,
        next.learning_step,
        next.interval,
        next.ease,
        next.due_date
    );
    db.save_review(card_id, rating, &state, next, now, time_taken_ms)?;
    if outcome.is_leech {
        log::warn!("{card_id} is a leech ({} lapses)", next.lapse_count);
    }
    Ok(outcome)
}

pub fn print_outcome(card_id: &str, outcome: &ReviewOutcome, now: Timestamp) {
    let state = &outcome.new_state;
    println!(
        "{card_id}: {}, due {} ({}).",
        state.status,
        format_due_relative(state, now),
        outcome.next_review_date.local_datetime()
    );
    if outcome.is_leech {
        println!(
            "{card_id} has lapsed {} times and is a leech. Consider rewriting or suspending it.",
            state.lapse_count
        );
    }
}

#[cfg(test)]
mod tests {
    use spacer_core::CardState;
    use spacer_core::CardStatus;
    use spacer_core::DAY_MS;
    use spacer_core::MINUTE_MS;

    use super::*;
    use crate::cmd::add::add_card;
    use crate::cmd::deck::DEFAULT_DECK;
    use crate::helper::temp_database;

    const T: i64 = 1_705_312_800_000;

    #[test]
    fn test_rate_new_card() -> Fallible<()> {
        let (_dir, mut db) = temp_database()?;
        let config = SrsConfig::default();
        let now = Timestamp::from_millis(T);
        add_card(&mut db, &config, DEFAULT_DECK, "a", "q", "a", now)?;
        let outcome = rate_card(&mut db, &config, "a", 3, now, None)?;
        assert_eq!(outcome.new_state.status, CardStatus::Learning);
        assert_eq!(outcome.next_review_date.as_millis(), T + 10 * MINUTE_MS);
        assert_eq!(db.get_card_state("a")?, Some(outcome.new_state));
        Ok(())
    }

    #[test]
    fn test_invalid_rating_changes_nothing() -> Fallible<()> {
        let (_dir, mut db) = temp_database()?;
        let config = SrsConfig::default();
        let now = Timestamp::from_millis(T);
        let state = add_card(&mut db, &config, DEFAULT_DECK, "a", "q", "a", now)?;
        for rating in [0, 5] {
            let err = rate_card(&mut db, &config, "a", rating, now, None).unwrap_err();
            assert_eq!(err.to_string(), format!("error: invalid rating: {rating}"));
        }
        assert_eq!(db.get_card_state("a")?, Some(state));
        assert_eq!(db.review_count_since(None, Timestamp::from_millis(0))?, 0);
        Ok(())
    }

    #[test]
    fn test_rate_missing_card() -> Fallible<()> {
        let (_dir, mut db) = temp_database()?;
        let err = rate_card(
            &mut db,
            &SrsConfig::default(),
            "ghost",
            3,
            Timestamp::from_millis(T),
            None,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "error: no such card: ghost");
        Ok(())
    }

    #[test]
    fn test_leech_is_reported() -> Fallible<()> {
        let (_dir, mut db) = temp_database()?;
        let config = SrsConfig::builder().leech_threshold(1).build()?;
        let now = Timestamp::from_millis(T);
        let state = CardState {
            status: CardStatus::Review,
            interval: 10.0,
            ..CardState::new(&config, now)
        };
        db.add_card(DEFAULT_DECK, "a", "q", "a", &state, now)?;
        let outcome = rate_card(&mut db, &config, "a", 1, now, None)?;
        assert!(outcome.is_leech);
        assert_eq!(outcome.new_state.lapse_count, 1);

        let later = now.offset(10 * MINUTE_MS);
        let outcome = rate_card(&mut db, &config, "a", 3, later, None)?;
        assert_eq!(outcome.new_state.status, CardStatus::Review);
        assert_eq!(outcome.new_state.interval, 5.0);
        assert_eq!(outcome.next_review_date.as_millis(), later.as_millis() + 5 * DAY_MS);
        Ok(())
    }

    #[test]
    fn test_time_taken_is_logged() -> Fallible<()> {
        let (_dir, mut db) = temp_database()?;
        let config = SrsConfig::default();
        let now = Timestamp::from_millis(T);
        add_card(&mut db, &config, DEFAULT_DECK, "a", "q", "a", now)?;
        rate_card(&mut db, &config, "a", 3, now, Some(2500))?;
        let reviews = db.reviews_since(None, now)?;
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].prev_status, CardStatus::New);
        assert_eq!(reviews[0].time_taken_ms, Some(2500));
        Ok(())
    }
}
