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

use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;

/// Identifies a module. Valid identities are the contiguous range
/// `1..=module_count`; the catalog rejects anything outside it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(u32);

impl ModuleId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn display_name(self) -> String {
        format!("Module {}", self.0)
    }

    /// Every identity for a catalog of the given size, in order.
    pub fn all(count: u32) -> impl Iterator<Item = ModuleId> {
        (1..=count).map(ModuleId)
    }
}

impl Display for ModuleId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ModuleId {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<u32>() {
            Ok(0) | Err(_) => Err(ErrorReport::new(format!("invalid module: {s}"))),
            Ok(n) => Ok(ModuleId(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(ModuleId::new(7).display_name(), "Module 7");
    }

    #[test]
    fn test_all() {
        let ids: Vec<ModuleId> = ModuleId::all(3).collect();
        assert_eq!(ids, vec![ModuleId::new(1), ModuleId::new(2), ModuleId::new(3)]);
    }

    #[test]
    fn test_parse() {
        assert_eq!("12".parse::<ModuleId>(), Ok(ModuleId::new(12)));
        assert!("0".parse::<ModuleId>().is_err());
        assert!("x".parse::<ModuleId>().is_err());
    }
}
