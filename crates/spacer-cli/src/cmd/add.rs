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
use spacer_core::SrsConfig;
use spacer_core::Timestamp;

use crate::cmd::deck::require_deck;
use crate::db::Database;
use crate::error::Fallible;
use crate::error::fail;

/// Create a card in a deck, due immediately.
pub fn add_card(
    db: &mut Database,
    config: &SrsConfig,
    deck_id: &str,
    card_id: &str,
    front: &str,
    back: &str,
    now: Timestamp,
) -> Fallible<CardState> {
    if card_id.trim().is_empty() {
        return fail("card id must not be empty.");
    }
    require_deck(db, deck_id)?;
    if db.get_card_state(card_id)?.is_some() {
        return fail(format!("card already exists: {card_id}"));
    }
    let state = CardState::new(config, now);
    db.add_card(deck_id, card_id, front, back, &state, now)?;
    log::info!("Added card {card_id} to deck {deck_id}");
    Ok(state)
}
