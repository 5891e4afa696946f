// src/services/llm.rs
//! Text-generation fallback used when a command matches nothing in the command table.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MODEL_ID: &str = "HuggingFaceH4/zephyr-7b-beta";
pub const MAX_NEW_TOKENS: u32 = 512;
pub const REPETITION_PENALTY: f32 = 1.03;

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that can interact with Ethereum blockchain data and DeFiLlama API. ";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("request to generation backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("generation backend returned status {status}: {body}")]
    Backend { status: u16, body: String },

    #[error("generation backend returned no text")]
    EmptyOutput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Two-message exchange sent for an unrecognised command.
pub fn fallback_messages(command: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            role: Role::System,
            content: SYSTEM_PROMPT.to_string(),
        },
        ChatMessage {
            role: Role::User,
            content: format!("The command received is: {command}. What should I reply?"),
        },
    ]
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    do_sample: bool,
    repetition_penalty: f32,
    return_full_text: bool,
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Debug, Deserialize)]
struct InferenceCandidate {
    generated_text: String,
}

/// Hugging Face inference API backend with greedy decoding.
#[derive(Debug, Clone)]
pub struct HuggingFaceGenerator {
    http: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
}

impl HuggingFaceGenerator {
    pub fn new(http: reqwest::Client, inference_url: &str, api_token: Option<String>) -> Self {
        Self {
            http,
            endpoint: format!("{}/{}", inference_url.trim_end_matches('/'), MODEL_ID),
            api_token,
        }
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceGenerator {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String, GenerationError> {
        let prompt = zephyr_prompt(messages);
        let body = InferenceRequest {
            inputs: &prompt,
            parameters: GenerationParameters {
                max_new_tokens: MAX_NEW_TOKENS,
                do_sample: false,
                repetition_penalty: REPETITION_PENALTY,
                return_full_text: false,
            },
        };

        let mut request = self.http.post(&self.endpoint).json(&body);
        if let Some(token) = self.api_token.as_deref() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Backend {
                status: status.as_u16(),
                body,
            });
        }

        let candidates: Vec<InferenceCandidate> = response.json().await?;
        candidates
            .into_iter()
            .next()
            .map(|c| c.generated_text)
            .ok_or(GenerationError::EmptyOutput)
    }
}

/// Zephyr chat template, ending on the assistant turn so the model answers.
fn zephyr_prompt(messages: &[ChatMessage]) -> String {
    let mut prompt = String::new();
    for message in messages {
        let tag = match message.role {
            Role::System => "<|system|>",
            Role::User => "<|user|>",
        };
        prompt.push_str(tag);
        prompt.push('\n');
        prompt.push_str(&message.content);
        prompt.push_str("</s>\n");
    }
    prompt.push_str("<|assistant|>\n");
    prompt
}
