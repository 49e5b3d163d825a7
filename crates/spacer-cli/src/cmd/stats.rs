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

use std::collections::HashSet;
use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use serde::Serialize;
use spacer_core::CardStatus;
use spacer_core::SrsConfig;
use spacer_core::Timestamp;
use spacer_core::is_due;
use spacer_core::next_due_date;

use crate::cmd::deck::require_deck;
use crate::db::Database;
use crate::db::LoggedReview;
use crate::error::Fallible;

/// Review cards with an interval of at least this many days are mature.
const MATURE_INTERVAL: f64 = 21.0;

#[derive(ValueEnum, Clone)]
pub enum StatsFormat {
    /// Plain text output.
    Text,
    /// JSON output.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Serialize, PartialEq, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    card_count: usize,
    new_count: usize,
    learning_count: usize,
    review_count: usize,
    relearning_count: usize,
    learning_due_count: usize,
    young_due_count: usize,
    mature_due_count: usize,
    leech_count: usize,
    today_review_count: usize,
    /// The earliest future due date of a studied card, if any.
    next_due_date: Option<Timestamp>,
    session: SessionSummary,
}

/// What was studied today.
#[derive(Serialize, PartialEq, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    /// Distinct cards reviewed.
    total_reviewed: usize,
    new_cards_learned: usize,
    review_cards: usize,
    learning_cards: usize,
    /// Mean of the recorded answer times, rounded. Zero if none were recorded.
    average_time_ms: u64,
}

pub fn collect_stats(
    db: &Database,
    config: &SrsConfig,
    deck_id: Option<&str>,
    now: Timestamp,
    day_start: Timestamp,
) -> Fallible<Stats> {
    if let Some(deck_id) = deck_id {
        require_deck(db, deck_id)?;
    }
    let rows = db.all_progress(deck_id)?;
    let mut stats = Stats {
        today_review_count: db.review_count_since(deck_id, day_start)?,
        next_due_date: next_due_date(rows.iter().map(|row| &row.state), now),
        session: summarize_session(&db.reviews_since(deck_id, day_start)?),
        ..Stats::default()
    };
    for row in rows {
        let state = row.state;
        let due = is_due(&state, now);
        stats.card_count += 1;
        match state.status {
            CardStatus::New => stats.new_count += 1,
            CardStatus::Learning => stats.learning_count += 1,
            CardStatus::Review => stats.review_count += 1,
            CardStatus::Relearning => stats.relearning_count += 1,
        }
        match state.status {
            CardStatus::Learning | CardStatus::Relearning if due => stats.learning_due_count += 1,
            CardStatus::Review if due && state.interval >= MATURE_INTERVAL => {
                stats.mature_due_count += 1
            }
            CardStatus::Review if due => stats.young_due_count += 1,
            _ => {}
        }
        if state.lapse_count >= config.leech_threshold() {
            stats.leech_count += 1;
        }
    }
    Ok(stats)
}

/// Summarize a day's reviews, oldest first. Each card counts once, under the
/// status it had before its first review of the day.
pub fn summarize_session(reviews: &[LoggedReview]) -> SessionSummary {
    let mut summary = SessionSummary::default();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut total_time: u64 = 0;
    let mut timed: u64 = 0;
    for review in reviews {
        if seen.insert(review.card_id.as_str()) {
            summary.total_reviewed += 1;
            match review.prev_status {
                CardStatus::New => summary.new_cards_learned += 1,
                CardStatus::Review => summary.review_cards += 1,
                CardStatus::Learning | CardStatus::Relearning => summary.learning_cards += 1,
            }
        }
        if let Some(ms) = review.time_taken_ms {
            total_time += u64::from(ms);
            timed += 1;
        }
    }
    if timed > 0 {
        summary.average_time_ms = (total_time + timed / 2) / timed;
    }
    summary
}

pub fn print_stats(stats: &Stats, format: StatsFormat) -> Fallible<()> {
    match format {
        StatsFormat::Text => {
            let session = &stats.session;
            println!("Cards:          {}", stats.card_count);
            println!("  new:          {}", stats.new_count);
            println!("  learning:     {}", stats.learning_count);
            println!("  review:       {}", stats.review_count);
            println!("  relearning:   {}", stats.relearning_count);
            println!("Due now:");
            println!("  learning:     {}", stats.learning_due_count);
            println!("  young review: {}", stats.young_due_count);
            println!("  mature review: {}", stats.mature_due_count);
            match stats.next_due_date {
                Some(ts) => println!("Next due:       {}", ts.local_datetime()),
                None => println!("Next due:       -"),
            }
            println!("Leeches:        {}", stats.leech_count);
            println!("Today:");
            println!("  reviews:      {}", stats.today_review_count);
            println!("  cards:        {}", session.total_reviewed);
            println!("    new:        {}", session.new_cards_learned);
            println!("    learning:   {}", session.learning_cards);
            println!("    review:     {}", session.review_cards);
            println!(
                "  average time: {:.1}s",
                session.average_time_ms as f64 / 1000.0
            );
        }
        StatsFormat::Json => {
            let stats_json = serde_json::to_string_pretty(stats)?;
            println!("{}", stats_json);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use spacer_core::CardState;
    use spacer_core::DAY_MS;
    use spacer_core::MINUTE_MS;

    use super::*;
    use crate::cmd::add::add_card;
    use crate::cmd::deck::DEFAULT_DECK;
    use crate::cmd::deck::create_deck;
    use crate::cmd::rate::rate_card;
    use crate::helper::temp_database;

    const T: i64 = 1_705_312_800_000;

    #[test]
    fn test_collect_stats() -> Fallible<()> {
        let (_dir, mut db) = temp_database()?;
        let config = SrsConfig::builder().leech_threshold(2).build()?;
        let day_start = Timestamp::from_millis(T);
        let now = day_start;
        let past = Timestamp::from_millis(T - DAY_MS);

        add_card(&mut db, &config, DEFAULT_DECK, "new", "q", "a", now)?;
        add_card(&mut db, &config, DEFAULT_DECK, "learning", "q", "a", now)?;
        rate_card(&mut db, &config, "learning", 1, now, Some(1500))?;
        let base = CardState::new(&config, past);
        let young = CardState {
            status: CardStatus::Review,
            interval: 3.0,
            ..base
        };
        let mature = CardState {
            status: CardStatus::Review,
            interval: 30.0,
            ..base
        };
        let leech = CardState {
            status: CardStatus::Relearning,
            interval: 30.0,
            lapse_count: 3,
            ..base
        };
        db.add_card(DEFAULT_DECK, "young", "q", "a", &young, past)?;
        db.add_card(DEFAULT_DECK, "mature", "q", "a", &mature, past)?;
        db.add_card(DEFAULT_DECK, "leech", "q", "a", &leech, past)?;

        let stats = collect_stats(&db, &config, None, now, day_start)?;
        assert_eq!(
            stats,
            Stats {
                card_count: 5,
                new_count: 1,
                learning_count: 1,
                review_count: 2,
                relearning_count: 1,
                learning_due_count: 1,
                young_due_count: 1,
                mature_due_count: 1,
                leech_count: 1,
                today_review_count: 1,
                next_due_date: Some(now.offset(MINUTE_MS)),
                session: SessionSummary {
                    total_reviewed: 1,
                    new_cards_learned: 1,
                    review_cards: 0,
                    learning_cards: 0,
                    average_time_ms: 1500,
                },
            }
        );
        Ok(())
    }

    #[test]
    fn test_collect_stats_per_deck() -> Fallible<()> {
        let (_dir, mut db) = temp_database()?;
        let config = SrsConfig::default();
        let now = Timestamp::from_millis(T);
        create_deck(&mut db, "spanish", "Spanish", None, now)?;
        add_card(&mut db, &config, DEFAULT_DECK, "pi", "pi", "3.14", now)?;
        add_card(&mut db, &config, "spanish", "hola", "hola", "hello", now)?;
        rate_card(&mut db, &config, "hola", 3, now, None)?;

        let stats = collect_stats(&db, &config, Some(DEFAULT_DECK), now, now)?;
        assert_eq!(stats.card_count, 1);
        assert_eq!(stats.new_count, 1);
        assert_eq!(stats.today_review_count, 0);
        assert_eq!(stats.next_due_date, None);
        assert_eq!(stats.session, SessionSummary::default());

        let stats = collect_stats(&db, &config, Some("spanish"), now, now)?;
        assert_eq!(stats.card_count, 1);
        assert_eq!(stats.learning_count, 1);
        assert_eq!(stats.today_review_count, 1);
        assert_eq!(stats.next_due_date, Some(now.offset(10 * MINUTE_MS)));
        assert_eq!(stats.session.new_cards_learned, 1);

        assert!(collect_stats(&db, &config, Some("french"), now, now).is_err());
        Ok(())
    }

    #[test]
    fn test_summarize_session() {
        let review = |card_id: &str, prev_status, time_taken_ms| LoggedReview {
            card_id: card_id.to_string(),
            prev_status,
            time_taken_ms,
        };
        let reviews = [
            review("a", CardStatus::New, Some(1000)),
            review("a", CardStatus::Learning, Some(2000)),
            review("b", CardStatus::Review, None),
            review("c", CardStatus::Relearning, Some(4001)),
            review("b", CardStatus::Relearning, None),
        ];
        assert_eq!(
            summarize_session(&reviews),
            SessionSummary {
                total_reviewed: 3,
                new_cards_learned: 1,
                review_cards: 1,
                learning_cards: 1,
                average_time_ms: 2334,
            }
        );
        assert_eq!(summarize_session(&[]), SessionSummary::default());
    }

    #[test]
    fn test_stats_json_is_camel_case() -> Fallible<()> {
        let json = serde_json::to_value(Stats::default())?;
        assert!(json.get("todayReviewCount").is_some());
        assert!(json.get("matureDueCount").is_some());
        assert!(json.get("nextDueDate").is_some_and(|v| v.is_null()));
        assert!(json["session"].get("averageTimeMs").is_some());
        Ok(())
    }
}
