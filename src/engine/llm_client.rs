use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::engine::prompt_builder::SYSTEM_DIRECTIVE;

/// The narrative collaborator. The engine only ever talks through this
/// seam; tests substitute a scripted implementation.
pub trait Narrator: Send {
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Connection settings for any OpenAI-compatible chat endpoint
/// (LM Studio by default). Loaded with defaults when the file is
/// missing or unreadable; saved best-effort.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarratorConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub api_key: Option<String>,
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:1234/v1".into(),
            model: "local-model".into(),
            temperature: 0.7,
            api_key: None,
        }
    }
}

fn config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("founder_simulator");
    fs::create_dir_all(&path).ok();
    path.push("narrator.json");
    path
}

impl NarratorConfig {
    pub fn load() -> Self {
        fs::read_to_string(config_path())
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string_pretty(self) {
            let _ = fs::write(config_path(), json);
        }
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
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
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: String,
}

pub struct ChatClient {
    http: Client,
    config: NarratorConfig,
}

impl ChatClient {
    pub fn new(config: NarratorConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }
}

impl Narrator for ChatClient {
    fn generate(&self, prompt: &str) -> Result<String> {
        let req = ChatCompletionRequest {
            model: &self.config.model,
            temperature: self.config.temperature,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_DIRECTIVE,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let mut request = self.http.post(&url).json(&req);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let resp: ChatCompletionResponse = request
            .send()
            .context("narrator endpoint unreachable")?
            .error_for_status()
            .context("narrator endpoint returned an error status")?
            .json()
            .context("narrator reply was not a chat completion")?;

        resp.choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| anyhow!("chat completion carried no choices"))
    }
}
