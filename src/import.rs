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

use std::io::Read;

use csv::ReaderBuilder;
use csv::Writer;

use crate::error::Fallible;
use crate::types::card::CardId;
use crate::types::card::Flashcard;

pub type Row = Vec<String>;

/// Read every record of a comma-separated source. There is no header
/// handling: the first line is a row like any other. Records may have any
/// number of cells, and blank lines are skipped.
pub fn read_rows<R: Read>(source: R) -> Fallible<Vec<Row>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }
    Ok(rows)
}

/// Turn rows into cards. Rows whose first two cells are not both non-empty
/// are dropped; the survivors are trimmed and numbered from zero in row
/// order. A cell of only whitespace counts as present.
pub fn cards_from_rows(rows: &[Row]) -> Vec<Flashcard> {
    rows.iter()
        .filter_map(|row| {
            let term = row.first()?;
            let definition = row.get(1)?;
            if term.is_empty() || definition.is_empty() {
                None
            } else {
                Some((term.trim(), definition.trim()))
            }
        })
        .enumerate()
        .map(|(i, (term, definition))| Flashcard::new(CardId::new(i), term, definition))
        .collect()
}

/// Write cards as two-column rows that `read_rows` reads back.
pub fn write_cards<W: std::io::Write>(cards: &[Flashcard], sink: W) -> Fallible<()> {
    let mut writer = Writer::from_writer(sink);
    for card in cards {
        writer.write_record([card.term(), card.definition()])?;
    }
    writer.flush()?;
    Ok(())
}
