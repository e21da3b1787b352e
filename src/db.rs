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

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Transaction;

use crate::error::Fallible;
use crate::store::KeyValueStore;

/// The on-disk store: a single SQLite table of string entries.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let mut conn = Connection::open(database_path)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                log::debug!("Creating database schema.");
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        Ok(Self { conn })
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Fallible<Option<String>> {
        let sql = "select value from entries where key = ?;";
        let value: Option<String> = self
            .conn
            .query_row(sql, [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Fallible<()> {
        let sql = "insert into entries (key, value) values (?, ?) on conflict (key) do update set value = excluded.value;";
        self.conn.execute(sql, (key, value))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Fallible<()> {
        let sql = "delete from entries where key = ?;";
        self.conn.execute(sql, [key])?;
        Ok(())
    }
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["entries"], |row| row.get(0))?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_get_missing() -> Fallible<()> {
        let db = Database::new(":memory:")?;
        assert_eq!(db.get("module/1/cards")?, None);
        Ok(())
    }

    #[test]
    fn test_set_overwrites() -> Fallible<()> {
        let mut db = Database::new(":memory:")?;
        db.set("module/1/score", "40")?;
        db.set("module/1/score", "75")?;
        assert_eq!(db.get("module/1/score")?, Some("75".to_string()));
        Ok(())
    }

    #[test]
    fn test_remove() -> Fallible<()> {
        let mut db = Database::new(":memory:")?;
        db.set("module/1/score", "40")?;
        db.remove("module/1/score")?;
        db.remove("module/2/score")?;
        assert_eq!(db.get("module/1/score")?, None);
        Ok(())
    }

    #[test]
    fn test_reopen_keeps_entries() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("flashdeck.db");
        let path = path.to_str().unwrap();
        {
            let mut db = Database::new(path)?;
            db.set("module/3/cards", "[]")?;
        }
        let db = Database::new(path)?;
        assert_eq!(db.get("module/3/cards")?, Some("[]".to_string()));
        Ok(())
    }
}
