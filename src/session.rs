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

use std::collections::HashMap;

use rand::Rng;

use crate::types::card::CardId;
use crate::types::card::Flashcard;
use crate::types::module_id::ModuleId;
use crate::types::score::Score;

/// Shuffle in place with Fisher-Yates: every ordering is equally likely
/// given a uniform `rng`.
pub fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// The transient half of the application: one pass through a deck.
#[derive(Debug)]
pub struct Session {
    module_id: ModuleId,
    deck: Vec<Flashcard>,
    position: usize,
    reveal: bool,
    ledger: HashMap<CardId, bool>,
}

/// What happened after an answer was recorded.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Progress {
    /// There is another card.
    Next,
    /// That was the last card; the deck has been scored.
    Finished(Score),
}

impl Session {
    /// Start a session over a shuffled copy of `cards`. Returns `None` for an
    /// empty deck.
    pub fn start<R: Rng>(
        module_id: ModuleId,
        mut cards: Vec<Flashcard>,
        rng: &mut R,
    ) -> Option<Self> {
        if cards.is_empty() {
            return None;
        }
        shuffle(&mut cards, rng);
        Some(Self {
            module_id,
            deck: cards,
            position: 0,
            reveal: false,
            ledger: HashMap::new(),
        })
    }

    pub fn module_id(&self) -> ModuleId {
        self.module_id
    }

    pub fn deck(&self) -> &[Flashcard] {
        &self.deck
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn reveal(&self) -> bool {
        self.reveal
    }

    pub fn current(&self) -> &Flashcard {
        &self.deck[self.position]
    }

    pub fn toggle_reveal(&mut self) {
        self.reveal = !self.reveal;
    }

    /// Record an answer for the current card and move on. Answering the last
    /// card leaves the position where it is and scores the deck.
    pub fn answer(&mut self, correct: bool) -> Progress {
        let id = self.current().id();
        self.ledger.insert(id, correct);
        if self.position + 1 < self.deck.len() {
            self.position += 1;
            self.reveal = false;
            Progress::Next
        } else {
            Progress::Finished(self.score())
        }
    }

    pub fn correct_count(&self) -> usize {
        self.ledger.values().filter(|correct| **correct).count()
    }

    pub fn score(&self) -> Score {
        Score::compute(self.correct_count(), self.deck.len())
    }

    /// The recorded answer for a card, if any.
    pub fn outcome(&self, id: CardId) -> Option<bool> {
        self.ledger.get(&id).copied()
    }

    /// Cards explicitly answered wrong, in deck order. Unanswered cards are
    /// not included.
    pub fn incorrect_cards(&self) -> Vec<Flashcard> {
        self.deck
            .iter()
            .filter(|card| self.outcome(card.id()) == Some(false))
            .cloned()
            .collect()
    }
}
