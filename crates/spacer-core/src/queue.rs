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

use crate::format::is_due;
use crate::types::card_state::CardState;
use crate::types::card_status::CardStatus;
use crate::types::timestamp::Timestamp;

fn priority(status: CardStatus) -> u8 {
    match status {
        CardStatus::Learning => 0,
        CardStatus::Relearning => 1,
        CardStatus::Review => 2,
        CardStatus::New => 3,
    }
}

/// How many new cards may still be introduced today.
pub fn new_card_allowance(daily_limit: usize, introduced_today: usize) -> usize {
    daily_limit.saturating_sub(introduced_today)
}

/// Select the cards to study now, in the order they should be shown.
///
/// Learning, relearning and review cards are included once due. New cards are
/// always eligible, but at most `new_cards` of them are included. Cards are
/// ordered learning, relearning, review, new; ties are broken by due date.
pub fn study_queue<K>(
    cards: Vec<(K, CardState)>,
    now: Timestamp,
    new_cards: usize,
) -> Vec<(K, CardState)> {
    let mut queue: Vec<(K, CardState)> = cards
        .into_iter()
        .filter(|(_, state)| state.status == CardStatus::New || is_due(state, now))
        .collect();
    queue.sort_by_key(|(_, state)| (priority(state.status), state.due_date));
    let mut new_seen = 0;
    queue.retain(|(_, state)| {
        if state.status != CardStatus::New {
            return true;
        }
        new_seen += 1;
        new_seen <= new_cards
    });
    queue
}

/// The earliest due date after `now` among cards that have been studied.
/// New cards are excluded: they are always available.
pub fn next_due_date<'a>(
    cards: impl IntoIterator<Item = &'a CardState>,
    now: Timestamp,
) -> Option<Timestamp> {
    cards
        .into_iter()
        .filter(|state| state.status != CardStatus::New && state.due_date > now)
        .map(|state| state.due_date)
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SrsConfig;
    use crate::types::timestamp::MINUTE_MS;

    const T: i64 = 1_705_312_800_000;

    fn card(status: CardStatus, due_offset: i64) -> CardState {
        CardState {
            status,
            ..CardState::new(&SrsConfig::default(), Timestamp::from_millis(T + due_offset))
        }
    }

    fn keys(queue: &[(&'static str, CardState)]) -> Vec<&'static str> {
        queue.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_priority_order() {
        let cards = vec![
            ("new", card(CardStatus::New, 0)),
            ("review", card(CardStatus::Review, -MINUTE_MS)),
            ("relearning", card(CardStatus::Relearning, -MINUTE_MS)),
            ("learning-late", card(CardStatus::Learning, -MINUTE_MS)),
            ("learning-early", card(CardStatus::Learning, -10 * MINUTE_MS)),
        ];
        let queue = study_queue(cards, Timestamp::from_millis(T), 20);
        assert_eq!(
            keys(&queue),
            vec!["learning-early", "learning-late", "relearning", "review", "new"]
        );
    }

    #[test]
    fn test_cards_not_yet_due_are_skipped() {
        let cards = vec![
            ("due", card(CardStatus::Review, 0)),
            ("later", card(CardStatus::Review, MINUTE_MS)),
            ("learning-later", card(CardStatus::Learning, MINUTE_MS)),
            ("new-later", card(CardStatus::New, MINUTE_MS)),
        ];
        let queue = study_queue(cards, Timestamp::from_millis(T), 20);
        assert_eq!(keys(&queue), vec!["due", "new-later"]);
    }

    #[test]
    fn test_new_card_limit() {
        let cards = vec![
            ("a", card(CardStatus::New, 0)),
            ("b", card(CardStatus::New, 1)),
            ("c", card(CardStatus::New, 2)),
            ("r", card(CardStatus::Review, 0)),
        ];
        let queue = study_queue(cards.clone(), Timestamp::from_millis(T), 2);
        assert_eq!(keys(&queue), vec!["r", "a", "b"]);
        let queue = study_queue(cards, Timestamp::from_millis(T), 0);
        assert_eq!(keys(&queue), vec!["r"]);
    }

    #[test]
    fn test_new_card_allowance() {
        assert_eq!(new_card_allowance(20, 5), 15);
        assert_eq!(new_card_allowance(20, 25), 0);
    }

    #[test]
    fn test_next_due_date() {
        let now = Timestamp::from_millis(T);
        let cards = [
            card(CardStatus::New, MINUTE_MS),
            card(CardStatus::Review, -MINUTE_MS),
            card(CardStatus::Review, 30 * MINUTE_MS),
            card(CardStatus::Relearning, 20 * MINUTE_MS),
            card(CardStatus::Learning, 0),
        ];
        assert_eq!(
            next_due_date(&cards, now),
            Some(Timestamp::from_millis(T + 20 * MINUTE_MS))
        );
        assert_eq!(next_due_date(&cards[..2], now), None);
    }
}
