//! Suggestion requester
//!
//! Sends the two-message prompt to an OpenAI-compatible chat completion
//! endpoint and returns the first choice's text. No retries.

pub(crate) mod client;
pub(crate) mod types;

use serde_json::Value;

use crate::consts::{MAX_TOKENS, TEMPERATURE};
use crate::error::{AppError, RequestError};
use crate::prompt::PromptMessage;

pub(crate) use client::{CompletionClient, HttpClient};
pub(crate) use types::{ChatRequest, ChatResponse, Usage};

/// Raw model output, untrusted
#[derive(Debug, Clone, Default)]
pub(crate) struct Suggestion {
    pub(crate) raw: String,
    /// Full response body, only kept in verbose mode
    pub(crate) diagnostics: Option<Value>,
}

impl Suggestion {
    pub(crate) fn usage(&self) -> Option<Usage> {
        let usage = self.diagnostics.as_ref()?.get("usage")?;
        serde_json::from_value(usage.clone()).ok()
    }
}

pub(crate) trait SuggestionRequester {
    fn request(
        &self,
        api_key: &str,
        base_url: &str,
        model: &str,
        messages: &[PromptMessage],
        verbose: bool,
    ) -> Result<Suggestion, AppError>;
}

/// Requester backed by a [`CompletionClient`]
#[derive(Debug, Default)]
pub(crate) struct ChatRequester<C> {
    client: C,
}

impl<C: CompletionClient> ChatRequester<C> {
    pub(crate) fn new(client: C) -> Self {
        Self { client }
    }
}

pub(crate) fn build_request<'a>(model: &'a str, messages: &'a [PromptMessage]) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages,
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
    }
}

/// First choice's message content, trimmed. Null content is an empty suggestion.
pub(crate) fn parse_completion(body: &Value) -> Result<String, RequestError> {
    let response: ChatResponse = serde_json::from_value(body.clone())
        .map_err(|e| RequestError::Malformed(e.to_string()))?;
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| RequestError::Malformed("response has no choices".to_string()))?;
    if let Some(usage) = response.usage {
        tracing::debug!(
            "Token usage: prompt={:?} completion={:?} total={:?}",
            usage.prompt_tokens,
            usage.completion_tokens,
            usage.total_tokens
        );
    }
    Ok(choice
        .message
        .and_then(|m| m.content)
        .map(|c| c.trim().to_string())
        .unwrap_or_default())
}

impl<C: CompletionClient> SuggestionRequester for ChatRequester<C> {
    fn request(
        &self,
        api_key: &str,
        base_url: &str,
        model: &str,
        messages: &[PromptMessage],
        verbose: bool,
    ) -> Result<Suggestion, AppError> {
        if api_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "An API key is required to request a suggestion".to_string(),
            ));
        }

        let request = build_request(model, messages);
        tracing::debug!(
            "Requesting suggestion from {} with model {} ({} messages)",
            base_url,
            model,
            messages.len()
        );
        let body = self.client.complete(api_key, base_url, &request)?;
        let raw = parse_completion(&body)?;

        Ok(Suggestion {
            raw,
            diagnostics: verbose.then_some(body),
        })
    }
}
