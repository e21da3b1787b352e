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

mod get;
mod post;
pub mod server;
mod state;
mod template;

#[cfg(test)]
mod tests {
    use std::fs::write;
    use std::time::Duration;

    use reqwest::Client;
    use reqwest::StatusCode;
    use reqwest::multipart::Form;
    use reqwest::multipart::Part;
    use serde_json::Value;
    use tempfile::TempDir;
    use tempfile::tempdir;
    use tokio::net::TcpStream;
    use tokio::spawn;
    use tokio::time::sleep;

    use crate::error::Fallible;
    use crate::library::Library;
    use crate::study::server::start_server;

    async fn serve() -> Fallible<(TempDir, String)> {
        let dir = tempdir()?;
        let port = portpicker::pick_unused_port().unwrap();
        write(
            dir.path().join("flashdeck.toml"),
            format!("module_count = 3\nport = {port}\nopen_browser = false\n"),
        )?;
        let library = Library::open(Some(dir.path().display().to_string()))?;
        spawn(async move { start_server(library).await });
        let bind = format!("127.0.0.1:{port}");
        loop {
            if let Ok(stream) = TcpStream::connect(&bind).await {
                drop(stream);
                break;
            }
            sleep(Duration::from_millis(1)).await;
        }
        Ok((dir, format!("http://{bind}")))
    }

    async fn state(base: &str) -> Value {
        let text = reqwest::get(format!("{base}/state.json"))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        serde_json::from_str(&text).unwrap()
    }

    async fn act(client: &Client, base: &str, form: &[(&str, &str)]) -> String {
        let response = client.post(format!("{base}/")).form(form).send().await.unwrap();
        assert!(response.status().is_success());
        response.text().await.unwrap()
    }

    #[tokio::test]
    async fn test_static_routes() -> Fallible<()> {
        let (_dir, base) = serve().await?;

        let response = reqwest::get(format!("{base}/style.css")).await.unwrap();
        assert!(response.status().is_success());
        assert_eq!(response.headers().get("content-type").unwrap(), "text/css");

        let response = reqwest::get(format!("{base}/herp-derp")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = reqwest::get(format!("{base}/")).await.unwrap();
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );
        let html = response.text().await.unwrap();
        assert!(html.contains("Module 1"));
        assert!(html.contains("Module 3"));
        assert!(!html.contains("Module 4"));
        Ok(())
    }

    #[tokio::test]
    async fn test_e2e() -> Fallible<()> {
        let (_dir, base) = serve().await?;
        let client = Client::new();

        // Upload two cards into module 1.
        let form = Form::new().text("module", "1").part(
            "file",
            Part::bytes(b"Cat,Animal\nRun,Verb\n".to_vec()).file_name("cards.csv"),
        );
        let response = client
            .post(format!("{base}/import"))
            .multipart(form)
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
        let snapshot = state(&base).await;
        assert_eq!(snapshot["view"], "menu");
        assert_eq!(snapshot["modules"][0]["cardCount"], 2);
        assert_eq!(snapshot["modules"][0]["score"], Value::Null);

        // Starting an empty module does nothing.
        act(&client, &base, &[("action", "Start"), ("module", "2")]).await;
        assert_eq!(state(&base).await["view"], "menu");

        let html = act(&client, &base, &[("action", "Start"), ("module", "1")]).await;
        assert!(html.contains("1 / 2"));

        // Flip the first card, then get it wrong.
        let snapshot = state(&base).await;
        let definition = snapshot["card"]["definition"].as_str().unwrap().to_string();
        let html = act(&client, &base, &[("action", "Flip")]).await;
        assert!(html.contains(&definition));
        let html = act(&client, &base, &[("action", "Incorrect")]).await;
        assert!(html.contains("2 / 2"));
        let html = act(&client, &base, &[("action", "Correct")]).await;
        assert!(html.contains("Score: 50%"));
        assert!(html.contains("Missed cards"));

        act(&client, &base, &[("action", "RetryIncorrect")]).await;
        let snapshot = state(&base).await;
        assert_eq!(snapshot["view"], "study");
        assert_eq!(snapshot["deckLength"], 1);

        act(&client, &base, &[("action", "Correct")]).await;
        let snapshot = state(&base).await;
        assert_eq!(snapshot["view"], "results");
        assert_eq!(snapshot["score"], 100);

        act(&client, &base, &[("action", "Menu")]).await;
        let snapshot = state(&base).await;
        assert_eq!(snapshot["view"], "menu");
        assert_eq!(snapshot["modules"][0]["score"], 100);
        Ok(())
    }

    #[tokio::test]
    async fn test_upload_without_valid_rows() -> Fallible<()> {
        let (_dir, base) = serve().await?;
        let client = Client::new();
        let form = Form::new().text("module", "2").part(
            "file",
            Part::bytes(b"just one column\n".to_vec()).file_name("cards.csv"),
        );
        let response = client
            .post(format!("{base}/import"))
            .multipart(form)
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
        assert_eq!(state(&base).await["modules"][1]["cardCount"], 0);
        Ok(())
    }
}
