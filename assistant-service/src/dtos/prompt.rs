use serde::{Deserialize, Serialize};
use serde_json::Value;
use service_core::error::AppError;

/// Message returned for a missing or blank prompt.
pub const PROMPT_REQUIRED: &str = "Prompt is required";

/// A validated prompt: trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    text: String,
}

impl PromptRequest {
    pub fn new(raw: &str) -> Result<Self, AppError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(AppError::BadRequest(PROMPT_REQUIRED.to_string()));
        }

        Ok(Self {
            text: text.to_string(),
        })
    }

    /// Extract the prompt from a raw `POST /prompt` body.
    ///
    /// An empty or unparsable body, an empty JSON value (`null`, `false`, `0`,
    /// `""`, `[]`), and a missing or `null` `prompt` field are client errors.
    /// Any other non-object body, or a non-string `prompt`, is an internal
    /// error.
    pub fn from_json_body(body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(AppError::BadRequest(PROMPT_REQUIRED.to_string()));
        }

        let value: Value = serde_json::from_slice(body).map_err(|e| {
            tracing::debug!(error = %e, "Request body is not valid JSON");
            AppError::BadRequest(PROMPT_REQUIRED.to_string())
        })?;

        match value {
            ref empty if is_empty_value(empty) => {
                Err(AppError::BadRequest(PROMPT_REQUIRED.to_string()))
            }
            Value::Object(mut fields) => match fields.remove("prompt") {
                None | Some(Value::Null) => {
                    Err(AppError::BadRequest(PROMPT_REQUIRED.to_string()))
                }
                Some(Value::String(raw)) => Self::new(&raw),
                Some(other) => Err(AppError::InternalError(anyhow::anyhow!(
                    "prompt must be a string, got {}",
                    json_type(&other)
                ))),
            },
            other => Err(AppError::InternalError(anyhow::anyhow!(
                "request body must be a JSON object, got {}",
                json_type(&other)
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_inner(self) -> String {
        self.text
    }
}

/// `null`, `false`, zero, `""` and `[]` carry no prompt at all.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(_) => false,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Body of a successful `POST /prompt`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptResponse {
    pub prompt: String,
    pub response: String,
    pub status: String,
}

impl PromptResponse {
    pub fn success(prompt: String, response: String) -> Self {
        Self {
            prompt,
            response,
            status: "success".to_string(),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_prompt_required(err: AppError) -> bool {
        matches!(err, AppError::BadRequest(ref msg) if msg == PROMPT_REQUIRED)
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let request = PromptRequest::new("  \n How do I share a file?\t ").unwrap();
        assert_eq!(request.as_str(), "How do I share a file?");
    }

    #[test]
    fn inner_whitespace_is_untouched() {
        let request = PromptRequest::new(" a  b \n c ").unwrap();
        assert_eq!(request.into_inner(), "a  b \n c");
    }

    #[test]
    fn blank_prompts_are_rejected() {
        for raw in ["", " ", "   ", "\n\t  \r\n"] {
            assert!(is_prompt_required(PromptRequest::new(raw).unwrap_err()));
        }
    }

    #[test]
    fn body_without_usable_prompt_is_a_client_error() {
        let bodies: [&[u8]; 14] = [
            b"",
            b"   ",
            b"{not json",
            b"null",
            b"false",
            b"0",
            b"0.0",
            b"-0",
            br#""""#,
            b"[]",
            b"{}",
            br#"{"prompt": null}"#,
            br#"{"prompt": ""}"#,
            br#"{"prompt": "   "}"#,
        ];

        for body in bodies {
            let err = PromptRequest::from_json_body(body).unwrap_err();
            assert!(
                is_prompt_required(err),
                "expected 400 for {:?}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn wrong_shapes_are_internal_errors() {
        let bodies: [&[u8]; 7] = [
            br#"["prompt"]"#,
            br#""just a string""#,
            br#"" ""#,
            b"true",
            b"1",
            br#"{"prompt": 42}"#,
            br#"{"prompt": ["a"]}"#,
        ];

        for body in bodies {
            let err = PromptRequest::from_json_body(body).unwrap_err();
            assert!(matches!(err, AppError::InternalError(_)));
        }
    }

    #[test]
    fn extra_fields_are_ignored() {
        let request =
            PromptRequest::from_json_body(br#"{"prompt": " hi ", "model": "other"}"#).unwrap();
        assert_eq!(request.as_str(), "hi");
    }

    #[test]
    fn success_response_serializes_in_field_order() {
        let body = PromptResponse::success("q".to_string(), "a".to_string());
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"prompt":"q","response":"a","status":"success"}"#
        );
    }
}
