pub mod prompt;

pub use prompt::{HealthResponse, PromptRequest, PromptResponse, PROMPT_REQUIRED};
