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

//! spacer-core: the scheduling engine of the spacer flashcard system.
//!
//! This library is pure and synchronous. It provides:
//! - The card state machine (new, learning, review, relearning)
//! - Rating previews for the four rating buttons
//! - Due-date queries and duration formatting
//! - Validated scheduler configuration, loadable from TOML

pub mod config;
pub mod error;
pub mod format;
pub mod interval;
pub mod preview;
pub mod queue;
pub mod scheduler;
pub mod types;

// Re-exports for convenience
pub use config::{ConfigBuilder, SrsConfig};
pub use error::{ErrorKind, ErrorReport, Fallible};
pub use format::{format_days, format_due_relative, format_minutes, is_due, time_until_due};
pub use preview::{IntervalPreview, preview_intervals};
pub use queue::{new_card_allowance, next_due_date, study_queue};
pub use scheduler::{ReviewOutcome, Wait, compute_next_state};
#[cfg(feature = "clock")]
pub use scheduler::review_now;
pub use types::card_state::CardState;
pub use types::card_status::CardStatus;
pub use types::rating::Rating;
pub use types::timestamp::{DAY_MS, HOUR_MS, MINUTE_MS, Timestamp};
