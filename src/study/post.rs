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

use axum::Form;
use axum::extract::Multipart;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::import::Row;
use crate::import::read_rows;
use crate::study::state::ServerState;
use crate::types::module_id::ModuleId;

#[derive(Debug, Deserialize)]
enum Action {
    Start,
    Flip,
    Correct,
    Incorrect,
    RetryAll,
    RetryIncorrect,
    Menu,
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
    module: Option<u32>,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Redirect {
    let mut controller = state.lock();
    match form.action {
        Action::Start => match form.module {
            Some(module) => controller.start_session(ModuleId::new(module)),
            None => log::error!("error: Start without a module."),
        },
        Action::Flip => controller.reveal_toggle(),
        Action::Correct => controller.answer(true),
        Action::Incorrect => controller.answer(false),
        Action::RetryAll => controller.retry_all(),
        Action::RetryIncorrect => controller.retry_incorrect(),
        Action::Menu => controller.return_to_menu(),
    }
    log::debug!("{:?} -> {:?}", form.action, controller.view());
    Redirect::to("/")
}

pub async fn import_handler(State(state): State<ServerState>, multipart: Multipart) -> Redirect {
    match read_upload(multipart).await {
        Ok((module, rows)) => {
            state.lock().import(module, &rows);
        }
        Err(e) => {
            log::error!("{e}");
        }
    }
    Redirect::to("/")
}

/// Read the whole upload before anything is imported.
async fn read_upload(mut multipart: Multipart) -> Fallible<(ModuleId, Vec<Row>)> {
    let mut module: Option<ModuleId> = None;
    let mut rows: Option<Vec<Row>> = None;
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(|name| name.to_string());
        match name.as_deref() {
            Some("module") => {
                module = Some(field.text().await?.parse::<ModuleId>()?);
            }
            Some("file") => {
                let bytes = field.bytes().await?;
                rows = Some(read_rows(bytes.as_ref())?);
            }
            _ => {}
        }
    }
    match (module, rows) {
        (Some(module), Some(rows)) => Ok((module, rows)),
        _ => fail("upload needs a module and a file."),
    }
}
