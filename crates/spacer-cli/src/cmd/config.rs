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

use spacer_core::SrsConfig;

use crate::error::Fallible;
use crate::error::fail;

/// Load the scheduler configuration from a TOML file, or use the defaults if
/// no file is given.
pub fn load_config(path: Option<&Path>) -> Fallible<SrsConfig> {
    let Some(path) = path else {
        return Ok(SrsConfig::default());
    };
    if !path.exists() {
        return fail("config file does not exist.");
    }
    let text = std::fs::read_to_string(path)?;
    let config = SrsConfig::from_toml(&text)?;
    log::debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

pub fn print_config(config: &SrsConfig) -> Fallible<()> {
    let text = toml::to_string_pretty(config)?;
    print!("{text}");
    Ok(())
}
