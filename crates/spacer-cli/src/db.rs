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

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Row;
use rusqlite::Transaction;
use rusqlite::config::DbConfig;
use spacer_core::CardState;
use spacer_core::CardStatus;
use spacer_core::Rating;
use spacer_core::Timestamp;

use crate::error::Fallible;

pub struct Database {
    conn: Connection,
}

pub struct DeckRow {
    pub deck_id: String,
    pub title: String,
    pub description: Option<String>,
    pub card_count: usize,
}

pub struct ProgressRow {
    pub card_id: String,
    pub front: String,
    pub state: CardState,
}

/// A review log entry, as used by the session summary.
pub struct LoggedReview {
    pub card_id: String,
    pub prev_status: CardStatus,
    pub time_taken_ms: Option<u32>,
}

pub struct UndoneReview {
    pub card_id: String,
    pub rating: Rating,
    pub restored: CardState,
}

const PROGRESS_COLUMNS: &str =
    "p.status, p.interval, p.ease, p.due_date, p.learning_step, p.lapse_count, p.review_count";

impl Database {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let mut conn = Connection::open(database_path)?;
        conn.set_db_config(DbConfig::SQLITE_DBCONFIG_ENABLE_FKEY, true)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                log::debug!("Creating schema in {database_path}");
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        Ok(Self { conn })
    }

    pub fn add_deck(
        &mut self,
        deck_id: &str,
        title: &str,
        description: Option<&str>,
        created_at: Timestamp,
    ) -> Fallible<()> {
        self.conn.execute(
            "insert into decks (deck_id, title, description, created_at) values (?, ?, ?, ?);",
            (deck_id, title, description, created_at.as_millis()),
        )?;
        Ok(())
    }

    pub fn deck_exists(&self, deck_id: &str) -> Fallible<bool> {
        let sql = "select count(*) from decks where deck_id = ?;";
        let count: i64 = self.conn.query_row(sql, [deck_id], |row| row.get(0))?;
        Ok(count > 0)
    }

    /// Every deck with its card count, ordered by title.
    pub fn all_decks(&self) -> Fallible<Vec<DeckRow>> {
        let sql = "select d.deck_id, d.title, d.description, count(c.card_id) from decks d left join cards c on c.deck_id = d.deck_id group by d.deck_id order by d.title, d.deck_id;";
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            let card_count: i64 = row.get(3)?;
            result.push(DeckRow {
                deck_id: row.get(0)?,
                title: row.get(1)?,
                description: row.get(2)?,
                card_count: card_count as usize,
            });
        }
        Ok(result)
    }

    /// Insert a new card into a deck, with its initial state.
    pub fn add_card(
        &mut self,
        deck_id: &str,
        card_id: &str,
        front: &str,
        back: &str,
        state: &CardState,
        added_at: Timestamp,
    ) -> Fallible<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "insert into cards (card_id, deck_id, front, back, added_at) values (?, ?, ?, ?, ?);",
            (card_id, deck_id, front, back, added_at.as_millis()),
        )?;
        tx.execute(
            "insert into card_progress (card_id, status, interval, ease, due_date, learning_step, lapse_count, review_count, last_reviewed_at) values (?, ?, ?, ?, ?, ?, ?, ?, null);",
            (
                card_id,
                state.status.as_str(),
                state.interval,
                state.ease,
                state.due_date.as_millis(),
                state.learning_step,
                state.lapse_count,
                state.review_count,
            ),
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Get a card's current state. If no card with the given id exists,
    /// returns None.
    pub fn get_card_state(&self, card_id: &str) -> Fallible<Option<CardState>> {
        let sql = format!("select {PROGRESS_COLUMNS} from card_progress p where p.card_id = ?;");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([card_id])?;
        match rows.next()? {
            Some(row) => Ok(Some(read_state(row, 0)?)),
            None => Ok(None),
        }
    }

    /// Every card with its current state, ordered by card id. With a deck,
    /// only the cards in that deck.
    pub fn all_progress(&self, deck_id: Option<&str>) -> Fallible<Vec<ProgressRow>> {
        let sql = format!(
            "select c.card_id, c.front, {PROGRESS_COLUMNS} from cards c join card_progress p on p.card_id = c.card_id where (?1 is null or c.deck_id = ?1) order by c.card_id;"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([deck_id])?;
        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            result.push(ProgressRow {
                card_id: row.get(0)?,
                front: row.get(1)?,
                state: read_state(row, 2)?,
            });
        }
        Ok(result)
    }

    /// Persist the outcome of a review: the card's new state, plus a log
    /// entry holding the previous state so the review can be undone.
    pub fn save_review(
        &mut self,
        card_id: &str,
        rating: Rating,
        previous: &CardState,
        next: &CardState,
        reviewed_at: Timestamp,
        time_taken_ms: Option<u32>,
    ) -> Fallible<()> {
        let prev_state = serde_json::to_string(previous)?;
        let tx = self.conn.transaction()?;
        write_state(&tx, card_id, next, Some(reviewed_at))?;
        tx.execute(
            "insert into review_logs (card_id, rating, reviewed_at, time_taken_ms, prev_state) values (?, ?, ?, ?, ?);",
            (
                card_id,
                u8::from(rating),
                reviewed_at.as_millis(),
                time_taken_ms,
                prev_state,
            ),
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Restore the state recorded before the most recent review, and forget
    /// that review. Returns None if there is nothing to undo.
    pub fn undo_last_review(&mut self) -> Fallible<Option<UndoneReview>> {
        let tx = self.conn.transaction()?;
        let last: Option<(i64, String, u8, String)> = tx
            .query_row(
                "select review_id, card_id, rating, prev_state from review_logs order by review_id desc limit 1;",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .optional()?;
        let Some((review_id, card_id, rating, prev_state)) = last else {
            return Ok(None);
        };
        let restored: CardState = serde_json::from_str(&prev_state)?;
        let rating = Rating::try_from(rating)?;
        tx.execute("delete from review_logs where review_id = ?;", [review_id])?;
        let last_reviewed_at: Option<i64> = tx.query_row(
            "select max(reviewed_at) from review_logs where card_id = ?;",
            [&card_id],
            |row| row.get(0),
        )?;
        write_state(
            &tx,
            &card_id,
            &restored,
            last_reviewed_at.map(Timestamp::from_millis),
        )?;
        tx.commit()?;
        Ok(Some(UndoneReview {
            card_id,
            rating,
            restored,
        }))
    }

    /// The number of reviews done at or after `since`, optionally within one
    /// deck.
    pub fn review_count_since(&self, deck_id: Option<&str>, since: Timestamp) -> Fallible<usize> {
        let sql = "select count(*) from review_logs r join cards c on c.card_id = r.card_id where (?1 is null or c.deck_id = ?1) and r.reviewed_at >= ?2;";
        let count: i64 = self
            .conn
            .query_row(sql, (deck_id, since.as_millis()), |row| row.get(0))?;
        Ok(count as usize)
    }

    /// The number of distinct cards first reviewed (out of the new status)
    /// at or after `since`, optionally within one deck.
    pub fn new_cards_introduced_since(
        &self,
        deck_id: Option<&str>,
        since: Timestamp,
    ) -> Fallible<usize> {
        let sql = "select count(distinct r.card_id) from review_logs r join cards c on c.card_id = r.card_id where (?1 is null or c.deck_id = ?1) and r.reviewed_at >= ?2 and json_extract(r.prev_state, '$.status') = 'new';";
        let count: i64 = self
            .conn
            .query_row(sql, (deck_id, since.as_millis()), |row| row.get(0))?;
        Ok(count as usize)
    }

    /// The reviews done at or after `since`, oldest first, optionally within
    /// one deck.
    pub fn reviews_since(
        &self,
        deck_id: Option<&str>,
        since: Timestamp,
    ) -> Fallible<Vec<LoggedReview>> {
        let sql = "select r.card_id, json_extract(r.prev_state, '$.status'), r.time_taken_ms from review_logs r join cards c on c.card_id = r.card_id where (?1 is null or c.deck_id = ?1) and r.reviewed_at >= ?2 order by r.reviewed_at, r.review_id;";
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query((deck_id, since.as_millis()))?;
        let mut result = Vec::new();
        while let Some(row) = rows.next()? {
            let prev_status: String = row.get(1)?;
            result.push(LoggedReview {
                card_id: row.get(0)?,
                prev_status: prev_status.parse::<CardStatus>()?,
                time_taken_ms: row.get(2)?,
            });
        }
        Ok(result)
    }
}

fn read_state(row: &Row, offset: usize) -> Fallible<CardState> {
    let status: String = row.get(offset)?;
    let due_date: i64 = row.get(offset + 3)?;
    Ok(CardState {
        status: status.parse::<CardStatus>()?,
        interval: row.get(offset + 1)?,
        ease: row.get(offset + 2)?,
        due_date: Timestamp::from_millis(due_date),
        learning_step: row.get(offset + 4)?,
        lapse_count: row.get(offset + 5)?,
        review_count: row.get(offset + 6)?,
    })
}

fn write_state(
    tx: &Transaction,
    card_id: &str,
    state: &CardState,
    last_reviewed_at: Option<Timestamp>,
) -> Fallible<()> {
    let sql = "update card_progress set status = ?, interval = ?, ease = ?, due_date = ?, learning_step = ?, lapse_count = ?, review_count = ?, last_reviewed_at = ? where card_id = ?;";
    tx.execute(
        sql,
        (
            state.status.as_str(),
            state.interval,
            state.ease,
            state.due_date.as_millis(),
            state.learning_step,
            state.lapse_count,
            state.review_count,
            last_reviewed_at.map(Timestamp::as_millis),
            card_id,
        ),
    )?;
    Ok(())
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["cards"], |row| row.get(0))?;
    Ok(count > 0)
}
