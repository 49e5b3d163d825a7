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

use spacer_core::Timestamp;

use crate::db::Database;
use crate::db::DeckRow;
use crate::error::Fallible;
use crate::error::fail;

/// The deck every new database starts with.
pub const DEFAULT_DECK: &str = "default";

pub fn create_deck(
    db: &mut Database,
    deck_id: &str,
    title: &str,
    description: Option<&str>,
    now: Timestamp,
) -> Fallible<()> {
    if deck_id.trim().is_empty() {
        return fail("deck id must not be empty.");
    }
    if title.trim().is_empty() {
        return fail("deck title must not be empty.");
    }
    if db.deck_exists(deck_id)? {
        return fail(format!("deck already exists: {deck_id}"));
    }
    db.add_deck(deck_id, title, description, now)?;
    log::info!("Created deck {deck_id}");
    Ok(())
}

/// Fail unless the deck exists.
pub fn require_deck(db: &Database, deck_id: &str) -> Fallible<()> {
    if db.deck_exists(deck_id)? {
        Ok(())
    } else {
        fail(format!("no such deck: {deck_id}"))
    }
}

pub fn print_decks(decks: &[DeckRow]) {
    for deck in decks {
        let noun = if deck.card_count == 1 { "card" } else { "cards" };
        match &deck.description {
            Some(description) => println!(
                "{}\t{}\t{} {noun}\t{description}",
                deck.deck_id, deck.title, deck.card_count
            ),
            None => println!("{}\t{}\t{} {noun}", deck.deck_id, deck.title, deck.card_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::temp_database;

    #[test]
    fn test_create_deck() -> Fallible<()> {
        let (_dir, mut db) = temp_database()?;
        let now = Timestamp::from_millis(0);
        create_deck(&mut db, "spanish", "Spanish", None, now)?;
        require_deck(&db, "spanish")?;
        require_deck(&db, DEFAULT_DECK)?;
        let err = create_deck(&mut db, "spanish", "Spanish", None, now).unwrap_err();
        assert_eq!(err.to_string(), "error: deck already exists: spanish");
        Ok(())
    }

    #[test]
    fn test_create_deck_rejects_blanks() -> Fallible<()> {
        let (_dir, mut db) = temp_database()?;
        let now = Timestamp::from_millis(0);
        assert!(create_deck(&mut db, " ", "Title", None, now).is_err());
        assert!(create_deck(&mut db, "id", "", None, now).is_err());
        assert_eq!(db.all_decks()?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_require_missing_deck() -> Fallible<()> {
        let (_dir, db) = temp_database()?;
        let err = require_deck(&db, "nope").unwrap_err();
        assert_eq!(err.to_string(), "error: no such deck: nope");
        Ok(())
    }
}
