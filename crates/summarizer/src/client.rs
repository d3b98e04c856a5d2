use crate::error::{Result, SummarizerError};
use crate::Summarize;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SYSTEM_PROMPT: &str = "You are a code analysis assistant. Summarize the \
submitted code in a few short sentences of plain language: what it does, its \
main functions, and any notable control flow. Do not quote the code back.";

const MAX_TOKENS: u32 = 512;

/// Configuration for the OpenAI-compatible summarizer.
#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Summarizer backed by a chat-completions endpoint.
#[derive(Debug)]
pub struct OpenAiSummarizer {
    http: Client,
    config: SummarizerConfig,
}

impl OpenAiSummarizer {
    /// Build the client. Fails when no API key is configured, so the server
    /// refuses to start half-wired rather than erroring on every request.
    pub fn new(config: SummarizerConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(SummarizerError::MissingApiKey);
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(SummarizerError::Request)?;

        Ok(Self { http, config })
    }
}

#[async_trait]
impl Summarize for OpenAiSummarizer {
    async fn summarize(&self, code: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: code.to_string(),
                },
            ],
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.config.api_base))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SummarizerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let content = extract_content(parsed)?;

        log::debug!("Summarizer returned {} chars", content.len());
        Ok(content)
    }
}

/// First choice content, trimmed. No choices or blank content is an error.
fn extract_content(response: ChatResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .map(|c| c.trim().to_string())
        .ok_or(SummarizerError::EmptyResponse)
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_rejected() {
        let err = OpenAiSummarizer::new(SummarizerConfig::default()).unwrap_err();
        assert!(matches!(err, SummarizerError::MissingApiKey));
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"A small script."}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content, "A small script.");
    }

    #[test]
    fn test_no_choices_is_empty_response() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        let err = extract_content(parsed).unwrap_err();
        assert!(matches!(err, SummarizerError::EmptyResponse));
    }

    #[test]
    fn test_blank_content_is_empty_response() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"   "}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        let err = extract_content(parsed).unwrap_err();
        assert!(matches!(err, SummarizerError::EmptyResponse));
    }

    #[test]
    fn test_content_is_trimmed() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"  A script.\n"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(extract_content(parsed).unwrap(), "A script.");
    }

    #[test]
    fn test_request_serialization() {
        let request = ChatRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "def f(): pass".to_string(),
            }],
            max_tokens: MAX_TOKENS,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 512);
    }
}
