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

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::html;

use crate::catalog::ModuleSummary;
use crate::controller::ResultsSnapshot;
use crate::controller::Snapshot;
use crate::controller::StudySnapshot;
use crate::study::state::ServerState;
use crate::study::template::page_template;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let snapshot = state.lock().snapshot();
    let body = match &snapshot {
        Snapshot::Menu { modules } => render_menu(modules),
        Snapshot::Study(study) => render_study(study),
        Snapshot::Results(results) => render_results(results),
    };
    let html = page_template(body);
    (StatusCode::OK, Html(html.into_string()))
}

pub async fn state_handler(State(state): State<ServerState>) -> Json<Snapshot> {
    Json(state.lock().snapshot())
}

fn render_menu(modules: &[ModuleSummary]) -> Markup {
    html! {
        div.root {
            h1 { "Modules" }
            table.modules {
                thead {
                    tr {
                        th { "Module" }
                        th { "Cards" }
                        th { "Last score" }
                        th {}
                        th {}
                    }
                }
                tbody {
                    @for module in modules {
                        tr {
                            td { (module.name) }
                            td.count { (module.card_count) }
                            td.score {
                                @match module.score {
                                    Some(score) => { (score.to_string()) }
                                    None => { "-" }
                                }
                            }
                            td {
                                form action="/" method="post" {
                                    input type="hidden" name="module" value=(module.id.to_string());
                                    input type="submit" name="action" value="Start" disabled[module.card_count == 0];
                                }
                            }
                            td {
                                form.upload action="/import" method="post" enctype="multipart/form-data" {
                                    input type="hidden" name="module" value=(module.id.to_string());
                                    input type="file" name="file" accept=".csv,text/csv";
                                    input type="submit" value="Upload";
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_study(study: &StudySnapshot) -> Markup {
    let progress = format!("{} / {}", study.position + 1, study.deck_length);
    html! {
        div.root {
            div.card {
                div.header {
                    h1 { (study.module_name) }
                    div.progress { (progress) }
                }
                div.content {
                    @if study.reveal {
                        div.definition { (study.card.definition()) }
                    } @else {
                        div.term { (study.card.term()) }
                    }
                }
                div.controls {
                    form action="/" method="post" {
                        input id="menu" type="submit" name="action" value="Menu";
                        div.spacer {}
                        input id="reveal" type="submit" name="action" value="Flip";
                        div.spacer {}
                        input id="incorrect" type="submit" name="action" value="Incorrect";
                        input id="correct" type="submit" name="action" value="Correct";
                    }
                }
            }
        }
    }
}

fn render_results(results: &ResultsSnapshot) -> Markup {
    html! {
        div.root {
            div.results {
                h1 { (results.module_name) " results" }
                p.score {
                    "Score: " (results.score.to_string())
                }
                p.tally {
                    (results.correct_count) " / " (results.deck_length) " correct"
                }
                table.answers {
                    tbody {
                        @for answer in &results.answers {
                            tr {
                                td { (answer.card.term()) }
                                td { (answer.card.definition()) }
                                td {
                                    @match answer.correct {
                                        Some(true) => { "correct" }
                                        Some(false) => { "incorrect" }
                                        None => { "-" }
                                    }
                                }
                            }
                        }
                    }
                }
                @if !results.incorrect_cards.is_empty() {
                    h2 { "Missed cards" }
                    ul.missed {
                        @for card in &results.incorrect_cards {
                            li { (card.term()) " = " (card.definition()) }
                        }
                    }
                }
                form action="/" method="post" {
                    input id="retry-all" type="submit" name="action" value="RetryAll";
                    input id="retry-incorrect" type="submit" name="action" value="RetryIncorrect" disabled[results.incorrect_cards.is_empty()];
                    input id="menu" type="submit" name="action" value="Menu";
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::card::CardId;
    use crate::types::card::Flashcard;
    use crate::types::module_id::ModuleId;

    fn study(reveal: bool) -> StudySnapshot {
        StudySnapshot {
            module_id: ModuleId::new(2),
            module_name: "Module 2".to_string(),
            card: Flashcard::new(CardId::new(0), "Cat", "Animal"),
            position: 0,
            deck_length: 3,
            reveal,
        }
    }

    #[test]
    fn test_study_shows_one_side() {
        let html = render_study(&study(false)).into_string();
        assert!(html.contains("Cat"));
        assert!(!html.contains("Animal"));
        assert!(html.contains("1 / 3"));
        let html = render_study(&study(true)).into_string();
        assert!(html.contains("Animal"));
        assert!(!html.contains("Cat"));
    }

    #[test]
    fn test_menu_disables_empty_modules() {
        let modules = vec![ModuleSummary {
            id: ModuleId::new(1),
            name: "Module 1".to_string(),
            card_count: 0,
            score: None,
        }];
        let html = render_menu(&modules).into_string();
        assert!(html.contains("Module 1"));
        assert!(html.contains("value=\"Start\" disabled"));
    }

    #[test]
    fn test_escapes_card_text() {
        let mut snapshot = study(false);
        snapshot.card = Flashcard::new(CardId::new(0), "<b>x</b>", "y");
        let html = render_study(&snapshot).into_string();
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
    }
}
