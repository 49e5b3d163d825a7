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

use spacer_core::IntervalPreview;
use spacer_core::Rating;
use spacer_core::SrsConfig;
use spacer_core::preview_intervals;

use crate::db::Database;
use crate::error::Fallible;
use crate::error::fail;

pub fn card_preview(db: &Database, config: &SrsConfig, card_id: &str) -> Fallible<IntervalPreview> {
    let Some(state) = db.get_card_state(card_id)? else {
        return fail(format!("no such card: {card_id}"));
    };
    Ok(preview_intervals(&state, config))
}

pub fn print_preview(preview: &IntervalPreview) {
    for rating in Rating::ALL {
        println!(
            "{} {:<5} {}",
            u8::from(rating),
            rating.as_str(),
            preview.get(rating)
        );
    }
}
