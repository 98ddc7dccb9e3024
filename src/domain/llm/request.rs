use serde::{Deserialize, Serialize};

use super::{Message, MessageRole};

/// Parameters for a single completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl LlmRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            temperature: None,
        }
    }

    pub fn builder() -> LlmRequestBuilder {
        LlmRequestBuilder::new()
    }

    /// Concatenated text of all system messages, if any
    pub fn system_text(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .messages
            .iter()
            .filter(|m| m.role == MessageRole::System)
            .map(|m| m.content_text())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n\n"))
        }
    }

    /// Concatenated text of all non-system messages, in order
    pub fn prompt_text(&self) -> String {
        self.messages
            .iter()
            .filter(|m| m.role != MessageRole::System)
            .map(|m| m.content_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Builder for LlmRequest
#[derive(Debug, Default)]
pub struct LlmRequestBuilder {
    messages: Vec<Message>,
    temperature: Option<f32>,
}

impl LlmRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn user(self, content: impl Into<String>) -> Self {
        self.message(Message::user(content))
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn build(self) -> LlmRequest {
        LlmRequest {
            messages: self.messages,
            temperature: self.temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = LlmRequest::builder()
            .message(Message::system("You review insurance policies"))
            .user("Is physiotherapy covered?")
            .temperature(0.0)
            .build();

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.temperature, Some(0.0));
    }

    #[test]
    fn test_system_and_prompt_text() {
        let request = LlmRequest::builder()
            .message(Message::system("rules"))
            .user("first")
            .user("second")
            .build();

        assert_eq!(request.system_text(), Some("rules".to_string()));
        assert_eq!(request.prompt_text(), "first\n\nsecond");
    }

    #[test]
    fn test_no_system_text() {
        let request = LlmRequest::builder().user("only a prompt").build();
        assert!(request.system_text().is_none());
        assert_eq!(request.prompt_text(), "only a prompt");
    }
}
