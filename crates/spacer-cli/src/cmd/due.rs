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

use spacer_core::CardState;
use spacer_core::Timestamp;
use spacer_core::format_due_relative;
use spacer_core::new_card_allowance;
use spacer_core::study_queue;

use crate::cmd::deck::require_deck;
use crate::db::Database;
use crate::error::Fallible;

#[derive(Debug)]
pub struct DueCard {
    pub card_id: String,
    pub front: String,
    pub state: CardState,
}

/// The cards to study now, in order, from one deck or from all of them.
/// `day_start` is the start of the current day, used to count the new cards
/// already introduced today.
pub fn due_cards(
    db: &Database,
    deck_id: Option<&str>,
    now: Timestamp,
    day_start: Timestamp,
    daily_new_limit: usize,
) -> Fallible<Vec<DueCard>> {
    if let Some(deck_id) = deck_id {
        require_deck(db, deck_id)?;
    }
    let introduced = db.new_cards_introduced_since(deck_id, day_start)?;
    let allowance = new_card_allowance(daily_new_limit, introduced);
    log::debug!("{introduced} new cards introduced today; {allowance} more allowed");
    let cards = db
        .all_progress(deck_id)?
        .into_iter()
        .map(|row| ((row.card_id, row.front), row.state))
        .collect();
    let queue = study_queue(cards, now, allowance)
        .into_iter()
        .map(|((card_id, front), state)| DueCard {
            card_id,
            front,
            state,
        })
        .collect();
    Ok(queue)
}

pub fn print_due_cards(cards: &[DueCard], now: Timestamp) {
    if cards.is_empty() {
        println!("Nothing to study.");
        return;
    }
    for card in cards {
        let when = format_due_relative(&card.state, now);
        println!(
            "{}\t{}\t{}\t{}",
            card.card_id, card.state.status, when, card.front
        );
    }
}
