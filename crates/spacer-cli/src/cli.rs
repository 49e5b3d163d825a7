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

use std::path::Path;
use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use spacer_core::Timestamp;

use crate::cmd::add::add_card;
use crate::cmd::config::load_config;
use crate::cmd::config::print_config;
use crate::cmd::deck::DEFAULT_DECK;
use crate::cmd::deck::create_deck;
use crate::cmd::deck::print_decks;
use crate::cmd::due::due_cards;
use crate::cmd::due::print_due_cards;
use crate::cmd::preview::card_preview;
use crate::cmd::preview::print_preview;
use crate::cmd::rate::print_outcome;
use crate::cmd::rate::rate_card;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::collect_stats;
use crate::cmd::stats::print_stats;
use crate::cmd::undo::undo_last_review;
use crate::db::Database;
use crate::error::ErrorReport;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the card database.
    #[arg(long, default_value = "spacer.sqlite3")]
    db: PathBuf,
    /// Path to a TOML file with scheduler settings.
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage decks.
    Deck {
        #[command(subcommand)]
        command: DeckCommand,
    },
    /// Add a new card.
    Add {
        /// Unique identifier of the card.
        card: String,
        /// The deck to add the card to.
        #[arg(long, default_value = DEFAULT_DECK)]
        deck: String,
        /// The prompt.
        #[arg(long)]
        front: String,
        /// The answer.
        #[arg(long)]
        back: String,
    },
    /// Rate a card after reviewing it.
    Rate {
        card: String,
        /// 1 = Again, 2 = Hard, 3 = Good, 4 = Easy.
        rating: u8,
        /// How long answering took, in milliseconds.
        #[arg(long)]
        time_ms: Option<u32>,
    },
    /// Undo the most recent rating.
    Undo,
    /// Show the wait each rating would schedule for a card.
    Preview { card: String },
    /// List the cards to study now.
    Due {
        /// Only study this deck.
        #[arg(long)]
        deck: Option<String>,
        /// The maximum number of new cards to introduce per day.
        #[arg(long, default_value_t = 20)]
        new_limit: usize,
    },
    /// Print collection statistics.
    Stats {
        /// Only count this deck.
        #[arg(long)]
        deck: Option<String>,
        /// Which output format to use.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
    },
    /// Print the effective scheduler configuration.
    Config,
}

#[derive(Subcommand)]
enum DeckCommand {
    /// Create a deck.
    Add {
        /// Unique identifier of the deck.
        deck: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// List the decks.
    List,
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let now = Timestamp::now();
    match cli.command {
        Command::Deck {
            command:
                DeckCommand::Add {
                    deck,
                    title,
                    description,
                },
        } => {
            let mut db = open_database(&cli.db)?;
            create_deck(&mut db, &deck, &title, description.as_deref(), now)?;
            println!("Created deck {deck}.");
        }
        Command::Deck {
            command: DeckCommand::List,
        } => {
            let db = open_database(&cli.db)?;
            print_decks(&db.all_decks()?);
        }
        Command::Add {
            card,
            deck,
            front,
            back,
        } => {
            let mut db = open_database(&cli.db)?;
            add_card(&mut db, &config, &deck, &card, &front, &back, now)?;
            println!("Added {card} to {deck}.");
        }
        Command::Rate {
            card,
            rating,
            time_ms,
        } => {
            let mut db = open_database(&cli.db)?;
            let outcome = rate_card(&mut db, &config, &card, rating, now, time_ms)?;
            print_outcome(&card, &outcome, now);
        }
        Command::Undo => {
            let mut db = open_database(&cli.db)?;
            undo_last_review(&mut db)?;
        }
        Command::Preview { card } => {
            let db = open_database(&cli.db)?;
            let preview = card_preview(&db, &config, &card)?;
            print_preview(&preview);
        }
        Command::Due { deck, new_limit } => {
            let db = open_database(&cli.db)?;
            let day_start = now.start_of_local_day();
            let cards = due_cards(&db, deck.as_deref(), now, day_start, new_limit)?;
            print_due_cards(&cards, now);
        }
        Command::Stats { deck, format } => {
            let db = open_database(&cli.db)?;
            let day_start = now.start_of_local_day();
            let stats = collect_stats(&db, &config, deck.as_deref(), now, day_start)?;
            print_stats(&stats, format)?;
        }
        Command::Config => {
            print_config(&config)?;
        }
    }
    Ok(())
}

fn open_database(path: &Path) -> Fallible<Database> {
    let path = path
        .to_str()
        .ok_or_else(|| ErrorReport::new("invalid path"))?;
    log::debug!("Opening database {path}");
    Database::new(path)
}
