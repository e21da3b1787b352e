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

use std::mem::replace;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::catalog::ModuleSummary;
use crate::import::Row;
use crate::import::cards_from_rows;
use crate::session::Progress;
use crate::session::Session;
use crate::types::card::Flashcard;
use crate::types::module_id::ModuleId;
use crate::types::score::Score;

/// The current screen. The study and results screens own the session, so
/// there is no session outside of them.
#[derive(Debug)]
pub enum Screen {
    Menu,
    Study(Session),
    Results { session: Session, score: Score },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Menu,
    Study,
    Results,
}

/// Owns the catalog and the screen, and is the only way to change either.
///
/// Every operation is a complete transition. Operations that are not valid
/// on the current screen are ignored.
pub struct Controller {
    catalog: Catalog,
    screen: Screen,
    rng: StdRng,
}

impl Controller {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_rng(catalog, StdRng::from_entropy())
    }

    pub fn with_rng(catalog: Catalog, rng: StdRng) -> Self {
        Self {
            catalog,
            screen: Screen::Menu,
            rng,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn view(&self) -> View {
        match self.screen {
            Screen::Menu => View::Menu,
            Screen::Study(_) => View::Study,
            Screen::Results { .. } => View::Results,
        }
    }

    /// Replace a module's cards with the valid rows of `rows`. Returns the
    /// number of cards imported, or zero when nothing was changed.
    ///
    /// A session over the replaced module ends with the import, since its
    /// deck no longer belongs to the module.
    pub fn import(&mut self, module_id: ModuleId, rows: &[Row]) -> usize {
        let cards = cards_from_rows(rows);
        let count = cards.len();
        if count == 0 {
            log::debug!("Discarding import for module {module_id}: no valid rows.");
            return 0;
        }
        if !self.catalog.replace_cards(module_id, cards) {
            log::debug!("Discarding import for unknown module {module_id}.");
            return 0;
        }
        log::info!("Imported {count} cards into module {module_id}.");
        if self.active_module() == Some(module_id) {
            log::debug!("Ending the session over module {module_id}: its cards were replaced.");
            self.screen = Screen::Menu;
        }
        count
    }

    fn active_module(&self) -> Option<ModuleId> {
        match &self.screen {
            Screen::Menu => None,
            Screen::Study(session) | Screen::Results { session, .. } => Some(session.module_id()),
        }
    }

    pub fn start_session(&mut self, module_id: ModuleId) {
        let cards = match self.catalog.get(module_id) {
            Some(module) => module.cards().to_vec(),
            None => {
                log::debug!("Refusing to start unknown module {module_id}.");
                return;
            }
        };
        self.begin(module_id, cards);
    }

    pub fn reveal_toggle(&mut self) {
        match &mut self.screen {
            Screen::Study(session) => session.toggle_reveal(),
            _ => log::debug!("Ignoring reveal outside of a study session."),
        }
    }

    pub fn answer(&mut self, correct: bool) {
        let Screen::Study(session) = &mut self.screen else {
            log::debug!("Ignoring answer outside of a study session.");
            return;
        };
        match session.answer(correct) {
            Progress::Next => {}
            Progress::Finished(score) => {
                let module_id = session.module_id();
                log::debug!("Session for module {module_id} completed: {score}.");
                self.catalog.record_score(module_id, score);
                if let Screen::Study(session) = replace(&mut self.screen, Screen::Menu) {
                    self.screen = Screen::Results { session, score };
                }
            }
        }
    }

    /// Study the module's whole card set again, regardless of which deck the
    /// finished session used.
    pub fn retry_all(&mut self) {
        let Screen::Results { session, .. } = &self.screen else {
            log::debug!("Ignoring retry outside of the results screen.");
            return;
        };
        let module_id = session.module_id();
        let cards = self
            .catalog
            .get(module_id)
            .map(|module| module.cards().to_vec())
            .unwrap_or_default();
        self.begin(module_id, cards);
    }

    /// Study only the cards missed in the finished session. The score of
    /// that session is taken over the missed cards alone and replaces the
    /// module's score like any other.
    pub fn retry_incorrect(&mut self) {
        let Screen::Results { session, .. } = &self.screen else {
            log::debug!("Ignoring retry outside of the results screen.");
            return;
        };
        let module_id = session.module_id();
        let missed = session.incorrect_cards();
        self.begin(module_id, missed);
    }

    pub fn return_to_menu(&mut self) {
        self.screen = Screen::Menu;
    }

    fn begin(&mut self, module_id: ModuleId, cards: Vec<Flashcard>) {
        match Session::start(module_id, cards, &mut self.rng) {
            Some(session) => {
                log::debug!(
                    "Studying module {module_id} with {} cards.",
                    session.deck().len()
                );
                self.screen = Screen::Study(session);
            }
            None => log::debug!("Refusing to study module {module_id}: no cards."),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        match &self.screen {
            Screen::Menu => Snapshot::Menu {
                modules: self.catalog.summaries(),
            },
            Screen::Study(session) => Snapshot::Study(StudySnapshot {
                module_id: session.module_id(),
                module_name: session.module_id().display_name(),
                card: session.current().clone(),
                position: session.position(),
                deck_length: session.deck().len(),
                reveal: session.reveal(),
            }),
            Screen::Results { session, score } => Snapshot::Results(ResultsSnapshot {
                module_id: session.module_id(),
                module_name: session.module_id().display_name(),
                score: *score,
                correct_count: session.correct_count(),
                deck_length: session.deck().len(),
                answers: session
                    .deck()
                    .iter()
                    .map(|card| AnsweredCard {
                        card: card.clone(),
                        correct: session.outcome(card.id()),
                    })
                    .collect(),
                incorrect_cards: session.incorrect_cards(),
            }),
        }
    }
}

/// A read-only copy of everything the presentation layer may show.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum Snapshot {
    Menu { modules: Vec<ModuleSummary> },
    Study(StudySnapshot),
    Results(ResultsSnapshot),
}

#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySnapshot {
    pub module_id: ModuleId,
    pub module_name: String,
    pub card: Flashcard,
    pub position: usize,
    pub deck_length: usize,
    pub reveal: bool,
}

#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsSnapshot {
    pub module_id: ModuleId,
    pub module_name: String,
    pub score: Score,
    pub correct_count: usize,
    pub deck_length: usize,
    pub answers: Vec<AnsweredCard>,
    pub incorrect_cards: Vec<Flashcard>,
}

#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct AnsweredCard {
    pub card: Flashcard,
    pub correct: Option<bool>,
}
