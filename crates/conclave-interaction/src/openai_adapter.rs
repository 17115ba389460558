//! OpenAiAdapter - chat-completion style REST implementation.
//!
//! Sends the persona's system prompt plus the mapped history to a
//! chat-completions endpoint and extracts the generated text from the first
//! choice.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use conclave_core::persona::ModelProvider;

use crate::adapter::{AdapterError, ModelAdapter, TurnRequest};

const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
const BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Adapter that talks to an OpenAI-style chat-completion HTTP API.
#[derive(Clone)]
pub struct OpenAiAdapter {
    client: Client,
    api_key: String,
    model: String,
}

impl OpenAiAdapter {
    /// Creates a new adapter with the provided API key and the default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
        }
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn build_messages(request: &TurnRequest) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(request.history.len() + 1);
        messages.push(ChatMessage {
            role: "system".to_string(),
            content: request.system_prompt.clone(),
        });
        for entry in &request.history {
            messages.push(ChatMessage {
                role: entry.role.as_str().to_string(),
                content: entry.content.clone(),
            });
        }
        messages
    }

    async fn send_request(&self, body: &ChatCompletionRequest) -> Result<String, AdapterError> {
        let response = self
            .client
            .post(BASE_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| AdapterError::Provider {
                status_code: None,
                message: format!("request failed: {err}"),
                is_retryable: err.is_connect() || err.is_timeout(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| AdapterError::Parse(err.to_string()))?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl ModelAdapter for OpenAiAdapter {
    fn provider(&self) -> ModelProvider {
        ModelProvider::OpenAi
    }

    async fn generate_reply(&self, request: &TurnRequest) -> Result<String, AdapterError> {
        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: Self::build_messages(request),
            max_tokens: Some(request.max_tokens),
        };

        self.send_request(&body).await
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
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

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String, AdapterError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(AdapterError::EmptyResponse)
}

fn map_http_error(status: StatusCode, body: String) -> AdapterError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    AdapterError::Provider {
        status_code: Some(status.as_u16()),
        message,
        is_retryable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::HistoryMessage;

    #[test]
    fn test_build_messages_puts_system_first() {
        let request = TurnRequest::new(
            "You are Ada.",
            vec![
                HistoryMessage::user("Brin: hello"),
                HistoryMessage::assistant("hello back"),
            ],
        );

        let messages = OpenAiAdapter::build_messages(&request);
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, "You are Ada.");
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[2].role, "assistant");
    }

    #[test]
    fn test_request_serialization_shape() {
        let body = ChatCompletionRequest {
            model: "gpt-4o".to_string(),
            messages: vec![ChatMessage {
                role: "system".to_string(),
                content: "sys".to_string(),
            }],
            max_tokens: Some(400),
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "gpt-4o");
        assert_eq!(value["max_tokens"], 400);
        assert_eq!(value["messages"][0]["role"], "system");
    }

    #[test]
    fn test_map_http_error_extracts_upstream_message() {
        let err = map_http_error(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"error": {"message": "rate limit exceeded"}}"#.to_string(),
        );
        match err {
            AdapterError::Provider {
                status_code,
                message,
                is_retryable,
            } => {
                assert_eq!(status_code, Some(429));
                assert_eq!(message, "rate limit exceeded");
                assert!(is_retryable);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_map_http_error_falls_back_to_raw_body() {
        let err = map_http_error(StatusCode::UNAUTHORIZED, "nope".to_string());
        match err {
            AdapterError::Provider {
                status_code,
                message,
                is_retryable,
            } => {
                assert_eq!(status_code, Some(401));
                assert_eq!(message, "nope");
                assert!(!is_retryable);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_extract_text_response_empty_choices() {
        let response = ChatCompletionResponse { choices: vec![] };
        assert!(matches!(
            extract_text_response(response),
            Err(AdapterError::EmptyResponse)
        ));
    }
}
