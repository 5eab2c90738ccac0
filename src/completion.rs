// src/completion.rs
//! Single round-trip chat-completions client for an OpenAI-compatible endpoint

use crate::config::OptimizerConfig;
use crate::error::OptimizeError;
use serde::{Deserialize, Serialize};
use tracing::info;

const COMPLETION_TIMEOUT_SECS: u64 = 120;

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
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

pub struct CompletionClient {
    client: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl CompletionClient {
    pub fn new(config: &OptimizerConfig) -> Result<Self, OptimizeError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(COMPLETION_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                OptimizeError::Completion(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            url: config.completion_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    /// Send one prompt as a single user message and return the trimmed
    /// completion. Any transport, auth, or rate-limit failure aborts the
    /// pipeline; there is no retry.
    pub async fn complete(&self, prompt: &str) -> Result<String, OptimizeError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
        };

        info!("Calling completion endpoint ({})", self.model);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| OptimizeError::Completion(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(OptimizeError::Completion(format!(
                "Provider returned status {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| OptimizeError::Completion(format!("Failed to parse response: {}", e)))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                OptimizeError::Completion("Provider returned no completion choices".to_string())
            })?;

        Ok(content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let request = ChatCompletionRequest {
            model: "llama-3.3-70b-versatile",
            messages: vec![ChatMessage {
                role: "user",
                content: "rewrite this",
            }],
            temperature: 0.2,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "llama-3.3-70b-versatile");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "rewrite this");
        assert!((json["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  rewritten  "}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        let content = parsed.choices[0].message.content.as_deref().unwrap();
        assert_eq!(content.trim(), "rewritten");
    }
}
