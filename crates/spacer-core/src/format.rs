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

use crate::types::card_state::CardState;
use crate::types::timestamp::MINUTE_MS;
use crate::types::timestamp::Timestamp;

pub fn is_due(state: &CardState, now: Timestamp) -> bool {
    state.due_date <= now
}

/// Milliseconds until the card is due. Negative when overdue.
pub fn time_until_due(state: &CardState, now: Timestamp) -> i64 {
    state.due_date.millis_since(now)
}

/// Render a duration given in minutes: `45m`, `1.5h`, then days.
pub fn format_minutes(minutes: f64) -> String {
    if minutes < 60.0 {
        return format!("{}m", minutes.round() as i64);
    }
    let hours = minutes / 60.0;
    if hours < 24.0 {
        return format!("{hours:.1}h");
    }
    format_days(hours / 24.0)
}

/// Render a duration given in days: `1.5d`, `12d`, `2.3mo`, `1.2y`. Less
/// than a day is rendered in minutes or hours.
pub fn format_days(days: f64) -> String {
    if days < 1.0 {
        return format_minutes(days * 24.0 * 60.0);
    }
    if days < 2.0 {
        format!("{days:.1}d")
    } else if days < 30.0 {
        format!("{}d", days.round() as i64)
    } else if days < 365.0 {
        format!("{:.1}mo", days / 30.0)
    } else {
        format!("{:.1}y", days / 365.0)
    }
}

/// A phrase like `3 hours from now`. Rounds up, so a wait is never
/// understated.
pub fn format_due_relative(state: &CardState, now: Timestamp) -> String {
    let millis = time_until_due(state, now);
    if millis <= 0 {
        return "now".to_string();
    }
    let minutes = millis as f64 / MINUTE_MS as f64;
    if minutes < 60.0 {
        return from_now(minutes.ceil(), "minute");
    }
    let hours = minutes / 60.0;
    if hours < 24.0 {
        return from_now(hours.ceil(), "hour");
    }
    from_now((hours / 24.0).ceil(), "day")
}

fn from_now(count: f64, unit: &str) -> String {
    let count = count as i64;
    if count == 1 {
        format!("1 {unit} from now")
    } else {
        format!("{count} {unit}s from now")
    }
}
