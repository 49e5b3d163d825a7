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

use crate::db::Database;
use crate::error::Fallible;

/// Undo the most recent review by restoring the state saved before it.
pub fn undo_last_review(db: &mut Database) -> Fallible<()> {
    match db.undo_last_review()? {
        Some(undone) => {
            log::info!(
                "Undid {} rating of {}; restored status {}",
                undone.rating,
                undone.card_id,
                undone.restored.status
            );
            println!(
                "Undid '{}' on {}. It is {} again, due {}.",
                undone.rating,
                undone.card_id,
                undone.restored.status,
                undone.restored.due_date.local_datetime()
            );
        }
        None => {
            println!("Nothing to undo.");
        }
    }
    Ok(())
}
