//! OpenAI-compatible chat completion client

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use veil_core::{Error, Result};

/// Connection settings for the model endpoint
#[derive(Debug, Clone)]
pub struct ModelSettings {
    /// Base URL; `/chat/completions` is appended
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub temperature: f32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434/v1".to_string(),
            model: "llama3.1".to_string(),
            api_key: None,
            timeout: Duration::from_secs(60),
            temperature: 0.0,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

pub struct ChatClient {
    settings: ModelSettings,
    client: reqwest::Client,
}

impl ChatClient {
    pub fn new(settings: ModelSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("veil/", env!("CARGO_PKG_VERSION")))
            .timeout(settings.timeout)
            .build()
            .map_err(|e| Error::Model(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    pub fn url(&self) -> String {
        format!("{}/chat/completions", self.settings.endpoint.trim_end_matches('/'))
    }

    /// Send one system + user exchange and return the reply text
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.settings.temperature,
        };

        let url = self.url();
        debug!(url = %url, model = %self.settings.model, "sending completion request");

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.settings.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Model(format!("Request to {} timed out", url))
            } else {
                Error::Model(format!("Request to {} failed: {}", url, e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::Model(format!("HTTP {}: {}", status, detail.trim())));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Model(format!("Malformed completion response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::Model("Completion response had no content".to_string()))
    }
}
