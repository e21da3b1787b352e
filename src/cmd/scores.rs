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

use clap::ValueEnum;

use crate::error::Fallible;
use crate::library::Library;

#[derive(ValueEnum, Clone)]
pub enum ScoresFormat {
    /// One line per module.
    Text,
    /// JSON output.
    Json,
}

impl Display for ScoresFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoresFormat::Text => write!(f, "text"),
            ScoresFormat::Json => write!(f, "json"),
        }
    }
}

pub fn print_scores(library: &Library, format: ScoresFormat) -> Fallible<()> {
    let summaries = library.catalog()?.summaries();
    match format {
        ScoresFormat::Text => {
            for summary in &summaries {
                let score = match summary.score {
                    Some(score) => score.to_string(),
                    None => "-".to_string(),
                };
                println!(
                    "{:<10} {:>4} cards {:>5}",
                    summary.name, summary.card_count, score
                );
            }
        }
        ScoresFormat::Json => {
            let json = serde_json::to_string_pretty(&summaries)?;
            println!("{json}");
        }
    }
    Ok(())
}
