//! HTTP handlers for the assistant service.

pub mod health;
pub mod prompt;

pub use health::{health_check, metrics_endpoint, readiness_check};
pub use prompt::{prompt_preflight, submit_prompt};
