#![allow(dead_code)]

use assistant_service::config::AssistantConfig;
use assistant_service::services::providers::TextProvider;
use assistant_service::startup::Application;
use service_core::config::Config as CoreConfig;
use std::collections::HashMap;
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
}

/// Configuration bound to a random local port, built from the given
/// variables instead of the process environment.
pub fn test_config(vars: &[(&str, &str)]) -> AssistantConfig {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let common = CoreConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
    };

    AssistantConfig::from_lookup(common, |key| vars.get(key).cloned())
        .expect("Failed to build test configuration")
}

impl TestApp {
    /// Spawn the application around the given provider.
    pub async fn spawn(provider: Arc<dyn TextProvider>) -> Self {
        let app = Application::build_with_provider(test_config(&[]), provider)
            .await
            .expect("Failed to build test application");
        Self::start(app).await
    }

    /// Spawn the application with the real Gemini provider.
    pub async fn spawn_with_gemini(vars: &[(&str, &str)]) -> Self {
        let app = Application::build(test_config(vars))
            .await
            .expect("Failed to build test application");
        Self::start(app).await
    }

    async fn start(app: Application) -> Self {
        let port = app.http_port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
        }
    }

    pub async fn post_prompt(&self, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/prompt", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to send request")
    }

    pub async fn post_raw(&self, body: &'static str) -> reqwest::Response {
        self.client
            .post(format!("{}/prompt", self.address))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to send request")
    }
}
