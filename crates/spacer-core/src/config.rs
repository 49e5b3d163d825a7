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

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorKind;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail_with;

/// Scheduler configuration.
///
/// A value of this type has always been validated: the only ways to get one
/// are [`ConfigBuilder::build`], [`SrsConfig::from_toml`] and `Default`.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(try_from = "ConfigBuilder")]
pub struct SrsConfig {
    learning_steps: Vec<f64>,
    relearning_steps: Vec<f64>,
    graduating_interval: f64,
    easy_interval: f64,
    starting_ease: f64,
    minimum_ease: f64,
    easy_bonus: f64,
    hard_multiplier: f64,
    lapse_min_interval: f64,
    maximum_interval: f64,
    leech_threshold: u32,
}

impl SrsConfig {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Parse and validate a TOML document. Missing keys take their default
    /// values; unknown keys are rejected.
    pub fn from_toml(text: &str) -> Fallible<Self> {
        let builder: ConfigBuilder = toml::from_str(text)?;
        builder.build()
    }

    /// Step durations, in minutes, of the learning ladder.
    pub fn learning_steps(&self) -> &[f64] {
        &self.learning_steps
    }

    /// Step durations, in minutes, of the relearning ladder.
    pub fn relearning_steps(&self) -> &[f64] {
        &self.relearning_steps
    }

    /// Days assigned when a learning card graduates via "good".
    pub fn graduating_interval(&self) -> f64 {
        self.graduating_interval
    }

    /// Days assigned when a learning card graduates via "easy".
    pub fn easy_interval(&self) -> f64 {
        self.easy_interval
    }

    pub fn starting_ease(&self) -> f64 {
        self.starting_ease
    }

    pub fn minimum_ease(&self) -> f64 {
        self.minimum_ease
    }

    pub fn easy_bonus(&self) -> f64 {
        self.easy_bonus
    }

    pub fn hard_multiplier(&self) -> f64 {
        self.hard_multiplier
    }

    /// Floor, in days, for the interval of a card returning from relearning.
    pub fn lapse_min_interval(&self) -> f64 {
        self.lapse_min_interval
    }

    /// Ceiling, in days, for every interval.
    pub fn maximum_interval(&self) -> f64 {
        self.maximum_interval
    }

    /// Lapse count at which a card counts as a leech.
    pub fn leech_threshold(&self) -> u32 {
        self.leech_threshold
    }
}

impl Default for SrsConfig {
    fn default() -> Self {
        ConfigBuilder::default().into_config()
    }
}

impl TryFrom<ConfigBuilder> for SrsConfig {
    type Error = ErrorReport;

    fn try_from(builder: ConfigBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

/// Builds an [`SrsConfig`]. Starts from the defaults; also the shape of the
/// TOML configuration file.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigBuilder {
    learning_steps: Vec<f64>,
    relearning_steps: Vec<f64>,
    graduating_interval: f64,
    easy_interval: f64,
    starting_ease: f64,
    minimum_ease: f64,
    easy_bonus: f64,
    hard_multiplier: f64,
    lapse_min_interval: f64,
    maximum_interval: f64,
    leech_threshold: u32,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            learning_steps: vec![1.0, 10.0],
            relearning_steps: vec![10.0],
            graduating_interval: 1.0,
            easy_interval: 4.0,
            starting_ease: 2.5,
            minimum_ease: 1.3,
            easy_bonus: 1.3,
            hard_multiplier: 1.2,
            lapse_min_interval: 1.0,
            maximum_interval: 36500.0,
            leech_threshold: 8,
        }
    }
}

impl ConfigBuilder {
    pub fn learning_steps(mut self, minutes: impl Into<Vec<f64>>) -> Self {
        self.learning_steps = minutes.into();
        self
    }

    pub fn relearning_steps(mut self, minutes: impl Into<Vec<f64>>) -> Self {
        self.relearning_steps = minutes.into();
        self
    }

    pub fn graduating_interval(mut self, days: f64) -> Self {
        self.graduating_interval = days;
        self
    }

    pub fn easy_interval(mut self, days: f64) -> Self {
        self.easy_interval = days;
        self
    }

    pub fn starting_ease(mut self, ease: f64) -> Self {
        self.starting_ease = ease;
        self
    }

    pub fn minimum_ease(mut self, ease: f64) -> Self {
        self.minimum_ease = ease;
        self
    }

    pub fn easy_bonus(mut self, bonus: f64) -> Self {
        self.easy_bonus = bonus;
        self
    }

    pub fn hard_multiplier(mut self, multiplier: f64) -> Self {
        self.hard_multiplier = multiplier;
        self
    }

    pub fn lapse_min_interval(mut self, days: f64) -> Self {
        self.lapse_min_interval = days;
        self
    }

    pub fn maximum_interval(mut self, days: f64) -> Self {
        self.maximum_interval = days;
        self
    }

    pub fn leech_threshold(mut self, lapses: u32) -> Self {
        self.leech_threshold = lapses;
        self
    }

    pub fn build(self) -> Fallible<SrsConfig> {
        self.validate()?;
        Ok(self.into_config())
    }

    fn validate(&self) -> Fallible<()> {
        check_steps("learning_steps", &self.learning_steps)?;
        check_steps("relearning_steps", &self.relearning_steps)?;
        check_positive("minimum_ease", self.minimum_ease)?;
        check_positive("starting_ease", self.starting_ease)?;
        if self.starting_ease < self.minimum_ease {
            return invalid("starting_ease must not be below minimum_ease");
        }
        check_positive("easy_bonus", self.easy_bonus)?;
        check_positive("hard_multiplier", self.hard_multiplier)?;
        check_positive("maximum_interval", self.maximum_interval)?;
        for (name, days) in [
            ("graduating_interval", self.graduating_interval),
            ("easy_interval", self.easy_interval),
            ("lapse_min_interval", self.lapse_min_interval),
        ] {
            check_positive(name, days)?;
            if days > self.maximum_interval {
                return invalid(format!("{name} must not exceed maximum_interval"));
            }
        }
        if self.leech_threshold == 0 {
            return invalid("leech_threshold must be at least 1");
        }
        Ok(())
    }

    fn into_config(self) -> SrsConfig {
        SrsConfig {
            learning_steps: self.learning_steps,
            relearning_steps: self.relearning_steps,
            graduating_interval: self.graduating_interval,
            easy_interval: self.easy_interval,
            starting_ease: self.starting_ease,
            minimum_ease: self.minimum_ease,
            easy_bonus: self.easy_bonus,
            hard_multiplier: self.hard_multiplier,
            lapse_min_interval: self.lapse_min_interval,
            maximum_interval: self.maximum_interval,
            leech_threshold: self.leech_threshold,
        }
    }
}

fn invalid<T>(message: impl Into<String>) -> Fallible<T> {
    fail_with(
        ErrorKind::InvalidConfig,
        format!("invalid configuration: {}", message.into()),
    )
}

fn check_positive(name: &str, value: f64) -> Fallible<()> {
    if !(value.is_finite() && value > 0.0) {
        return invalid(format!("{name} must be a positive number"));
    }
    Ok(())
}

fn check_steps(name: &str, steps: &[f64]) -> Fallible<()> {
    if steps.is_empty() {
        return invalid(format!("{name} must not be empty"));
    }
    if !steps.iter().all(|m| m.is_finite() && *m > 0.0) {
        return invalid(format!("{name} must all be positive numbers of minutes"));
    }
    Ok(())
}
