//! Gemini API client struct, request building, and response parsing.

use crate::{AiError, AiResponse, Message, Role, TokenUsage};

use super::config::GeminiConfig;

pub(crate) const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini API client.
pub struct GeminiClient {
    pub(crate) config: GeminiConfig,
    pub(crate) http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("failed to build HTTP client"),
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub(crate) fn api_url(&self) -> String {
        format!("{}/{}:generateContent", GEMINI_API_BASE, self.config.model)
    }

    /// Build the JSON request body for the Gemini API.
    ///
    /// User messages map to the `user` role, assistant messages to `model`;
    /// a system message becomes `systemInstruction` rather than a turn.
    pub(crate) fn build_request_body(&self, messages: &[Message]) -> serde_json::Value {
        let mut contents = Vec::new();

        for msg in messages {
            let role = match msg.role {
                Role::User => "user",
                Role::Assistant => "model",
                Role::System => continue,
            };
            contents.push(serde_json::json!({
                "role": role,
                "parts": [{ "text": msg.content }]
            }));
        }

        let mut body = serde_json::json!({
            "contents": contents,
            "generationConfig": {
                "maxOutputTokens": self.config.max_output_tokens,
                "temperature": self.config.temperature,
            }
        });

        if let Some(system) = messages.iter().find(|m| m.role == Role::System) {
            body["systemInstruction"] = serde_json::json!({
                "parts": [{ "text": system.content }]
            });
        }

        body
    }

    /// Parse a Gemini response into text + token usage.
    ///
    /// The text of the first candidate's parts is concatenated; a candidate
    /// with no text parts yields the empty string.
    pub(crate) fn parse_response(&self, json: serde_json::Value) -> Result<AiResponse, AiError> {
        let candidates = json["candidates"]
            .as_array()
            .ok_or_else(|| AiError::ParseError("no candidates in response".to_string()))?;

        let first = candidates
            .first()
            .ok_or_else(|| AiError::ParseError("empty candidates".to_string()))?;

        let parts = first["content"]["parts"]
            .as_array()
            .cloned()
            .unwrap_or_default();

        let mut content = String::new();
        for part in &parts {
            if let Some(text) = part["text"].as_str() {
                content.push_str(text);
            }
        }

        let usage = TokenUsage {
            input_tokens: json["usageMetadata"]["promptTokenCount"]
                .as_u64()
                .unwrap_or(0),
            output_tokens: json["usageMetadata"]["candidatesTokenCount"]
                .as_u64()
                .unwrap_or(0),
        };

        Ok(AiResponse { content, usage })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GeminiClient {
        GeminiClient::new(GeminiConfig::new("test-key"))
    }

    #[test]
    fn api_url_targets_generate_content() {
        let url = client().api_url();
        assert_eq!(
            url,
            format!("{GEMINI_API_BASE}/gemini-2.0-flash-001:generateContent")
        );
    }

    #[test]
    fn request_body_maps_roles_and_system_instruction() {
        let messages = vec![
            Message {
                role: Role::System,
                content: "Be terse.".into(),
            },
            Message {
                role: Role::User,
                content: "What is the capital of France?".into(),
            },
            Message {
                role: Role::Assistant,
                content: "Paris.".into(),
            },
        ];

        let body = client().build_request_body(&messages);

        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 2);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            "Be terse."
        );
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 4096);
    }

    #[test]
    fn parse_response_concatenates_text_parts() {
        let json = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Ray" }, { "text": "leigh" }] }
            }],
            "usageMetadata": { "promptTokenCount": 7, "candidatesTokenCount": 3 }
        });

        let response = client().parse_response(json).unwrap();
        assert_eq!(response.content, "Rayleigh");
        assert_eq!(response.usage.input_tokens, 7);
        assert_eq!(response.usage.output_tokens, 3);
        assert_eq!(response.usage.total_tokens(), 10);
    }

    #[test]
    fn parse_response_without_text_parts_is_empty_string() {
        let json = serde_json::json!({
            "candidates": [{ "content": {} }]
        });

        let response = client().parse_response(json).unwrap();
        assert_eq!(response.content, "");
        assert_eq!(response.usage.total_tokens(), 0);
    }

    #[test]
    fn parse_response_without_candidates_is_parse_error() {
        let result = client().parse_response(serde_json::json!({}));
        assert!(matches!(result, Err(AiError::ParseError(_))));
    }
}
