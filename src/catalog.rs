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

use serde::Serialize;

use crate::store::KeyValueStore;
use crate::types::card::Flashcard;
use crate::types::module_id::ModuleId;
use crate::types::score::Score;

pub struct Module {
    id: ModuleId,
    cards: Vec<Flashcard>,
    score: Option<Score>,
}

impl Module {
    pub fn name(&self) -> String {
        self.id.display_name()
    }

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn score(&self) -> Option<Score> {
        self.score
    }

    pub fn summary(&self) -> ModuleSummary {
        ModuleSummary {
            id: self.id,
            name: self.name(),
            card_count: self.cards.len(),
            score: self.score(),
        }
    }
}

/// What the menu shows for a module.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSummary {
    pub id: ModuleId,
    pub name: String,
    pub card_count: usize,
    pub score: Option<Score>,
}

/// The durable half of the application: every module, backed by a store.
///
/// The in-memory modules are authoritative. Writes that fail are logged and
/// dropped, so a broken store costs persistence but never consistency.
pub struct Catalog {
    modules: Vec<Module>,
    store: Box<dyn KeyValueStore + Send>,
}

impl Catalog {
    /// Load modules `1..=module_count` from the store. Missing or malformed
    /// entries load as an empty module with no score.
    pub fn load(store: Box<dyn KeyValueStore + Send>, module_count: u32) -> Self {
        let modules = ModuleId::all(module_count)
            .map(|id| Module {
                id,
                cards: load_cards(store.as_ref(), id),
                score: load_score(store.as_ref(), id),
            })
            .collect();
        Self { modules, store }
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn get(&self, id: ModuleId) -> Option<&Module> {
        self.modules.iter().find(|module| module.id == id)
    }

    pub fn summaries(&self) -> Vec<ModuleSummary> {
        self.modules.iter().map(Module::summary).collect()
    }

    /// Replace a module's cards and clear its score. Returns false, without
    /// touching anything, for an unknown module or an empty card set.
    pub fn replace_cards(&mut self, id: ModuleId, cards: Vec<Flashcard>) -> bool {
        if cards.is_empty() {
            return false;
        }
        let Some(module) = self.modules.iter_mut().find(|module| module.id == id) else {
            return false;
        };
        // The old score goes first, so a failed card write cannot leave it
        // next to the new cards.
        write(self.store.as_mut(), &score_key(id), None);
        match serde_json::to_string(&cards) {
            Ok(json) => write(self.store.as_mut(), &cards_key(id), Some(&json)),
            Err(e) => log::warn!("Failed to encode cards for module {id}: {e}"),
        }
        module.cards = cards;
        module.score = None;
        true
    }

    pub fn record_score(&mut self, id: ModuleId, score: Score) {
        let Some(module) = self.modules.iter_mut().find(|module| module.id == id) else {
            return;
        };
        module.score = Some(score);
        write(
            self.store.as_mut(),
            &score_key(id),
            Some(&score.percent().to_string()),
        );
    }
}

fn cards_key(id: ModuleId) -> String {
    format!("module/{id}/cards")
}

fn score_key(id: ModuleId) -> String {
    format!("module/{id}/score")
}

fn read<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Failed to read {key}: {e}");
            None
        }
    }
}

fn load_cards<S: KeyValueStore + ?Sized>(store: &S, id: ModuleId) -> Vec<Flashcard> {
    let key = cards_key(id);
    let Some(json) = read(store, &key) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<Flashcard>>(&json) {
        Ok(cards) => cards,
        Err(e) => {
            log::warn!("Ignoring malformed {key}: {e}");
            Vec::new()
        }
    }
}

fn load_score<S: KeyValueStore + ?Sized>(store: &S, id: ModuleId) -> Option<Score> {
    let key = score_key(id);
    let json = read(store, &key)?;
    match serde_json::from_str::<Option<u8>>(&json) {
        Ok(None) => None,
        Ok(Some(percent)) => {
            let score = Score::new(percent);
            if score.is_none() {
                log::warn!("Ignoring out-of-range {key}: {percent}");
            }
            score
        }
        Err(e) => {
            log::warn!("Ignoring malformed {key}: {e}");
            None
        }
    }
}

/// Write `value` under `key`, or remove the key when `value` is `None`.
fn write<S: KeyValueStore + ?Sized>(store: &mut S, key: &str, value: Option<&str>) {
    let result = match value {
        Some(value) => store.set(key, value),
        None => store.remove(key),
    };
    if let Err(e) = result {
        log::warn!("Failed to persist {key}, keeping it in memory only: {e}");
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tempfile::tempdir;

    use super::*;
    use crate::db::Database;
    use crate::error::Fallible;
    use crate::error::fail;
    use crate::store::testing::MemoryStore;
    use crate::types::card::CardId;

    fn cards(pairs: &[(&str, &str)]) -> Vec<Flashcard> {
        pairs
            .iter()
            .enumerate()
            .map(|(i, (term, definition))| Flashcard::new(CardId::new(i), *term, *definition))
            .collect()
    }

    #[test]
    fn test_load_empty_store() {
        let catalog = Catalog::load(Box::new(MemoryStore::new()), 14);
        assert_eq!(catalog.modules().len(), 14);
        assert_eq!(catalog.modules()[0].name(), "Module 1");
        assert_eq!(catalog.modules()[13].name(), "Module 14");
        assert!(catalog.modules().iter().all(|m| m.cards().is_empty()));
        assert!(catalog.modules().iter().all(|m| m.score().is_none()));
    }

    #[test]
    fn test_load_ignores_malformed_values() {
        let mut store = MemoryStore::new();
        store
            .entries
            .insert("module/1/cards".to_string(), "{not json".to_string());
        store
            .entries
            .insert("module/1/score".to_string(), "\"high\"".to_string());
        store
            .entries
            .insert("module/2/score".to_string(), "250".to_string());
        store
            .entries
            .insert("module/3/score".to_string(), "null".to_string());
        store
            .entries
            .insert("module/4/score".to_string(), "88".to_string());
        let catalog = Catalog::load(Box::new(store), 4);
        let m = catalog.modules();
        assert!(m[0].cards().is_empty());
        assert_eq!(m[0].score(), None);
        assert_eq!(m[1].score(), None);
        assert_eq!(m[2].score(), None);
        assert_eq!(m[3].score(), Score::new(88));
    }

    #[test]
    fn test_replace_cards_clears_score() {
        let mut catalog = Catalog::load(Box::new(MemoryStore::new()), 2);
        let id = ModuleId::new(2);
        assert!(catalog.replace_cards(id, cards(&[("Cat", "Animal")])));
        catalog.record_score(id, Score::compute(1, 1));
        assert!(catalog.replace_cards(id, cards(&[("Run", "Verb")])));
        let module = catalog.get(id).unwrap();
        assert_eq!(module.cards()[0].term(), "Run");
        assert_eq!(module.score(), None);
    }

    #[test]
    fn test_replace_cards_refuses_empty_and_unknown() {
        let mut catalog = Catalog::load(Box::new(MemoryStore::new()), 2);
        let id = ModuleId::new(1);
        assert!(catalog.replace_cards(id, cards(&[("Cat", "Animal")])));
        assert!(!catalog.replace_cards(id, Vec::new()));
        assert!(!catalog.replace_cards(ModuleId::new(3), cards(&[("Run", "Verb")])));
        assert_eq!(catalog.get(id).unwrap().cards().len(), 1);
        assert!(catalog.get(ModuleId::new(3)).is_none());
    }

    /// Delegates to a database, but fails every write after the first
    /// `writes_left`.
    struct FlakyStore {
        inner: Database,
        writes_left: usize,
    }

    impl FlakyStore {
        fn spend(&mut self) -> Fallible<()> {
            if self.writes_left == 0 {
                return fail("disk full");
            }
            self.writes_left -= 1;
            Ok(())
        }
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Fallible<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Fallible<()> {
            self.spend()?;
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Fallible<()> {
            self.spend()?;
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_partial_replace_never_pairs_old_score_with_new_cards() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("flashdeck.db");
        let path = path.to_str().unwrap();
        let id = ModuleId::new(1);
        {
            let mut catalog = Catalog::load(Box::new(Database::new(path)?), 1);
            catalog.replace_cards(id, cards(&[("Cat", "Animal")]));
            catalog.record_score(id, Score::compute(4, 5));
        }
        {
            let store = FlakyStore {
                inner: Database::new(path)?,
                writes_left: 1,
            };
            let mut catalog = Catalog::load(Box::new(store), 1);
            assert!(catalog.replace_cards(id, cards(&[("Run", "Verb")])));
        }
        let catalog = Catalog::load(Box::new(Database::new(path)?), 1);
        let module = catalog.get(id).unwrap();
        assert_eq!(module.cards()[0].term(), "Cat");
        assert_eq!(module.score(), None);
        Ok(())
    }

    #[test]
    fn test_write_failures_keep_memory_state() {
        let store = MemoryStore::read_only(HashMap::new());
        let mut catalog = Catalog::load(Box::new(store), 1);
        let id = ModuleId::new(1);
        assert!(catalog.replace_cards(id, cards(&[("Cat", "Animal")])));
        catalog.record_score(id, Score::compute(0, 1));
        let module = catalog.get(id).unwrap();
        assert_eq!(module.cards().len(), 1);
        assert_eq!(module.score(), Score::new(0));
    }
}
