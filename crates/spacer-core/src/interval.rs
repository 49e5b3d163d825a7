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

//! Interval and ease arithmetic shared by the scheduler and the previews.
//!
//! All review intervals are whole days, clamped to the configured maximum.

use crate::config::SrsConfig;

/// Ease lost on a lapse.
const LAPSE_EASE_PENALTY: f64 = 0.2;

/// Ease lost on a "hard" review.
const HARD_EASE_PENALTY: f64 = 0.15;

/// Ease gained on an "easy" review.
const EASY_EASE_BONUS: f64 = 0.15;

/// Ease gained when an "easy" rating ends relearning.
const RELEARN_EASY_EASE_BONUS: f64 = 0.1;

/// Fraction of the old interval kept when relearning ends via "good".
const LAPSE_INTERVAL_FACTOR: f64 = 0.5;

/// Fraction of the old interval kept when relearning ends via "easy".
const EASY_LAPSE_INTERVAL_FACTOR: f64 = 0.7;

fn clamp_days(days: f64, config: &SrsConfig) -> f64 {
    days.round().min(config.maximum_interval())
}

/// Duration in minutes of step `index`. Indices past the end of the list
/// (e.g. after the list was shortened) fall back to the first step.
pub fn step_minutes(steps: &[f64], index: u32) -> f64 {
    let index = index as usize;
    steps
        .get(index)
        .or_else(|| steps.first())
        .copied()
        .unwrap_or(0.0)
}

/// `index` if it names a step, otherwise the first step.
pub fn valid_step(steps: &[f64], index: u32) -> u32 {
    if (index as usize) < steps.len() {
        index
    } else {
        0
    }
}

/// Whether `index` is the last step (or beyond it).
pub fn is_last_step(steps: &[f64], index: u32) -> bool {
    index as usize + 1 >= steps.len()
}

pub fn hard_interval(interval: f64, config: &SrsConfig) -> f64 {
    let days = (interval * config.hard_multiplier()).max(interval + 1.0);
    clamp_days(days, config)
}

pub fn good_interval(interval: f64, ease: f64, config: &SrsConfig) -> f64 {
    clamp_days(interval * ease, config)
}

pub fn easy_interval(interval: f64, ease: f64, config: &SrsConfig) -> f64 {
    clamp_days(interval * ease * config.easy_bonus(), config)
}

/// Interval of a card that finishes relearning via "good".
pub fn lapse_interval(interval: f64, config: &SrsConfig) -> f64 {
    let days = (interval * LAPSE_INTERVAL_FACTOR).round();
    clamp_days(days.max(config.lapse_min_interval()), config)
}

/// Interval of a card that skips the rest of relearning via "easy".
pub fn easy_lapse_interval(interval: f64, config: &SrsConfig) -> f64 {
    let days = (interval * EASY_LAPSE_INTERVAL_FACTOR).round();
    clamp_days(days.max(config.lapse_min_interval()), config)
}

pub fn ease_after_lapse(ease: f64, config: &SrsConfig) -> f64 {
    (ease - LAPSE_EASE_PENALTY).max(config.minimum_ease())
}

pub fn ease_after_hard(ease: f64, config: &SrsConfig) -> f64 {
    (ease - HARD_EASE_PENALTY).max(config.minimum_ease())
}

pub fn ease_after_easy(ease: f64) -> f64 {
    ease + EASY_EASE_BONUS
}

pub fn ease_after_easy_relearn(ease: f64) -> f64 {
    ease + RELEARN_EASY_EASE_BONUS
}
