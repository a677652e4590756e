//! Mock provider implementation for tests and credential-less local runs.

use super::{FinishReason, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::Mutex;

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return the composed prompt unchanged.
    Echo,
    /// Return a fixed text regardless of input.
    Fixed(String),
    /// Fail every call with a network error.
    Fail,
}

/// Mock text provider for testing.
pub struct MockTextProvider {
    behavior: MockBehavior,
    prompts: Mutex<Vec<String>>,
}

impl MockTextProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    pub fn fixed(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::Fixed(text.into()))
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Fail)
    }

    /// Prompts received so far, oldest first.
    pub fn received_prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        let text = match &self.behavior {
            MockBehavior::Echo => prompt.to_string(),
            MockBehavior::Fixed(text) => text.clone(),
            MockBehavior::Fail => {
                return Err(ProviderError::NetworkError(
                    "mock provider configured to fail".to_string(),
                ));
            }
        };

        Ok(ProviderResponse {
            text,
            input_tokens: estimated_tokens(prompt.len()),
            output_tokens: 10,
            finish_reason: FinishReason::Complete,
        })
    }
}

/// Rough token count: four bytes per token, saturating.
fn estimated_tokens(len: usize) -> i32 {
    i32::try_from(len / 4).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_estimate_saturates_on_huge_input() {
        assert_eq!(estimated_tokens(40), 10);
        assert_eq!(estimated_tokens(usize::MAX), i32::MAX);
    }

    #[tokio::test]
    async fn echo_records_prompt() {
        let provider = MockTextProvider::echo();
        let response = provider.generate("hello world!").await.unwrap();

        assert_eq!(response.text, "hello world!");
        assert_eq!(response.input_tokens, 3);
        assert_eq!(provider.received_prompts(), vec!["hello world!".to_string()]);
    }
}
