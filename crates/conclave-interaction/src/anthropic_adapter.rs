//! AnthropicAdapter - message-completion style REST implementation.
//!
//! Sends the persona's system prompt in the dedicated `system` field and the
//! mapped history as the message array, then extracts the generated text
//! from the first `text` content block.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use conclave_core::persona::ModelProvider;

use crate::adapter::{AdapterError, HistoryRole, ModelAdapter, TurnRequest};

const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";
const BASE_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Sent when the mapped history would otherwise start with (or consist
/// solely of) assistant turns; the messages endpoint requires a leading
/// user message.
const KICKOFF_MESSAGE: &str = "Begin the conversation in character.";

/// Adapter that talks to an Anthropic-style message-completion HTTP API.
#[derive(Clone)]
pub struct AnthropicAdapter {
    client: Client,
    api_key: String,
    model: String,
}

impl AnthropicAdapter {
    /// Creates a new adapter with the provided API key and the default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_ANTHROPIC_MODEL.to_string(),
        }
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Maps the history to the wire shape.
    ///
    /// The messages endpoint rejects consecutive same-role entries and
    /// requires the array to start with a user message, so consecutive
    /// same-role history entries are coalesced and a kickoff user message is
    /// inserted when needed.
    fn build_messages(request: &TurnRequest) -> Vec<ApiMessage> {
        let mut messages: Vec<ApiMessage> = Vec::with_capacity(request.history.len());

        for entry in &request.history {
            let role = entry.role.as_str();
            match messages.last_mut() {
                Some(last) if last.role == role => {
                    last.content.push('\n');
                    last.content.push_str(&entry.content);
                }
                _ => messages.push(ApiMessage {
                    role: role.to_string(),
                    content: entry.content.clone(),
                }),
            }
        }

        let needs_kickoff = messages
            .first()
            .map(|m| m.role == HistoryRole::Assistant.as_str())
            .unwrap_or(true);
        if needs_kickoff {
            messages.insert(
                0,
                ApiMessage {
                    role: HistoryRole::User.as_str().to_string(),
                    content: KICKOFF_MESSAGE.to_string(),
                },
            );
        }

        messages
    }

    async fn send_request(&self, body: &CreateMessageRequest) -> Result<String, AdapterError> {
        let response = self
            .client
            .post(BASE_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
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

        let parsed: CreateMessageResponse = response
            .json()
            .await
            .map_err(|err| AdapterError::Parse(err.to_string()))?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl ModelAdapter for AnthropicAdapter {
    fn provider(&self) -> ModelProvider {
        ModelProvider::Anthropic
    }

    async fn generate_reply(&self, request: &TurnRequest) -> Result<String, AdapterError> {
        let body = CreateMessageRequest {
            model: self.model.clone(),
            messages: Self::build_messages(request),
            max_tokens: request.max_tokens,
            system: Some(request.system_prompt.clone()),
        };

        self.send_request(&body).await
    }
}

#[derive(Serialize)]
struct CreateMessageRequest {
    model: String,
    messages: Vec<ApiMessage>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
}

#[derive(Serialize)]
struct ApiMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct CreateMessageResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: CreateMessageResponse) -> Result<String, AdapterError> {
    response
        .content
        .into_iter()
        .find_map(|block| match block {
            ContentBlock::Text { text } => Some(text),
        })
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
    fn test_build_messages_coalesces_same_role_runs() {
        let request = TurnRequest::new(
            "sys",
            vec![
                HistoryMessage::user("Brin: hello"),
                HistoryMessage::user("Cole: hi all"),
                HistoryMessage::assistant("greetings"),
            ],
        );

        let messages = AnthropicAdapter::build_messages(&request);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "user");
        assert_eq!(messages[0].content, "Brin: hello\nCole: hi all");
        assert_eq!(messages[1].role, "assistant");
    }

    #[test]
    fn test_build_messages_inserts_kickoff_when_empty() {
        let request = TurnRequest::new("sys", Vec::new());
        let messages = AnthropicAdapter::build_messages(&request);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, "user");
        assert_eq!(messages[0].content, KICKOFF_MESSAGE);
    }

    #[test]
    fn test_build_messages_inserts_kickoff_before_leading_assistant() {
        let request = TurnRequest::new("sys", vec![HistoryMessage::assistant("my opener")]);
        let messages = AnthropicAdapter::build_messages(&request);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "user");
        assert_eq!(messages[1].role, "assistant");
    }

    #[test]
    fn test_request_serialization_shape() {
        let body = CreateMessageRequest {
            model: DEFAULT_ANTHROPIC_MODEL.to_string(),
            messages: vec![ApiMessage {
                role: "user".to_string(),
                content: "hello".to_string(),
            }],
            max_tokens: 400,
            system: Some("sys".to_string()),
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["system"], "sys");
        assert_eq!(value["max_tokens"], 400);
        assert_eq!(value["messages"][0]["role"], "user");
    }

    #[test]
    fn test_response_text_extraction() {
        let parsed: CreateMessageResponse = serde_json::from_str(
            r#"{"content": [{"type": "text", "text": "a reply"}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text_response(parsed).unwrap(), "a reply");
    }

    #[test]
    fn test_map_http_error_extracts_upstream_message() {
        let err = map_http_error(
            StatusCode::SERVICE_UNAVAILABLE,
            r#"{"error": {"type": "overloaded_error", "message": "overloaded"}}"#.to_string(),
        );
        match err {
            AdapterError::Provider {
                status_code,
                message,
                is_retryable,
            } => {
                assert_eq!(status_code, Some(503));
                assert_eq!(message, "overloaded");
                assert!(is_retryable);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
