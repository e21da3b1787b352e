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

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;

pub const CONFIG_FILE: &str = "flashdeck.toml";

pub const DEFAULT_MODULE_COUNT: u32 = 14;

/// Settings read from `flashdeck.toml` in the data directory. Every field is
/// optional.
#[derive(Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// How many modules exist. Identities run from 1 to this value.
    pub module_count: u32,
    pub host: String,
    pub port: u16,
    /// Open the study page in a browser once the server is listening.
    pub open_browser: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            module_count: DEFAULT_MODULE_COUNT,
            host: "127.0.0.1".to_string(),
            port: 8000,
            open_browser: true,
        }
    }
}

impl Config {
    pub fn parse(content: &str) -> Fallible<Self> {
        let config: Config = toml::from_str(content)?;
        if config.module_count == 0 {
            return fail("module_count must be at least 1.");
        }
        Ok(config)
    }

    /// Load the config file in `directory`, or the defaults if there is none.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE);
        if path.exists() {
            log::debug!("Loading configuration from {}", path.display());
            Config::parse(&read_to_string(path)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
