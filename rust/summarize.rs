use anyhow::{Context, Result, bail};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{config::AppConfig, error::ServiceError};

pub const MAX_SUMMARY_INPUT_CHARS: usize = 4000;
pub const MAX_OUTPUT_TOKENS: u32 = 500;
pub const TEMPERATURE: f32 = 0.7;
pub const PROMPT_PREFIX: &str = "Fornisci un riassunto breve e conciso del seguente testo:\n\n";
const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// The part of `text` sent for summarization: its first 4000 characters.
pub fn summary_payload(text: &str) -> &str {
    match text.char_indices().nth(MAX_SUMMARY_INPUT_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Asks the completion service for a short summary of `text`.
pub async fn summarize(
    client: &Client,
    config: &AppConfig,
    text: &str,
) -> Result<String, ServiceError> {
    let payload = summary_payload(text);
    let Some(api_key) = config.api_key.as_deref() else {
        return Err(ServiceError::MissingApiKey);
    };

    debug!(
        payload_chars = payload.chars().count(),
        model = %config.model,
        "requesting summary"
    );

    let summary = request_completion(client, config, api_key, payload)
        .await
        .map_err(ServiceError::processing)?;

    info!(summary_chars = summary.chars().count(), "summary received");
    Ok(summary)
}

async fn request_completion(
    client: &Client,
    config: &AppConfig,
    api_key: &str,
    payload: &str,
) -> Result<String> {
    let url = format!(
        "{}{}",
        config.base_url.trim_end_matches('/'),
        CHAT_COMPLETIONS_PATH
    );
    let request = ChatRequest {
        model: &config.model,
        messages: vec![ChatMessage {
            role: "user",
            content: format!("{PROMPT_PREFIX}{payload}"),
        }],
        max_tokens: MAX_OUTPUT_TOKENS,
        temperature: TEMPERATURE,
    };

    let response = client
        .post(url)
        .bearer_auth(api_key)
        .json(&request)
        .send()
        .await
        .context("Failed to call completion endpoint")?;

    let completion = ensure_success(response)
        .await?
        .json::<ChatResponse>()
        .await
        .context("Failed to decode completion response")?;

    let content = completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .context("completion response contained no message")?;

    Ok(content.trim().to_string())
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    bail!("completion API request failed with status {status}: {body}");
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}
