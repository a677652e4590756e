//! The prompt relay: system instruction + user text in, model text out.
//!
//! Provider failures never reach the caller. They are logged, counted and
//! replaced by [`FALLBACK_RESPONSE`]; [`RelayReply::source`] records which
//! path produced the text.

use crate::dtos::PromptRequest;
use crate::services::metrics;
use crate::services::providers::TextProvider;
use std::sync::Arc;
use std::time::Instant;

/// Persona and response style prepended to every prompt.
pub const SYSTEM_INSTRUCTION: &str = r#"You are SealVault's enterprise assistant, focused on providing clear, concise guidance for document management and security. Keep responses direct and actionable.

Platform Overview:
SealVault is a decentralized enterprise document management platform built on Sui blockchain that enables:
- Secure storage of sensitive documents (contracts, HR records, compliance docs)
- Blockchain-based access control and audit trails
- End-to-end encryption for all documents
- Smart contract-based permissions management

Core Focus:
- Enterprise document security and management
- Blockchain-based access control and audit trails
- Compliance and governance
- Practical implementation guidance

Response Guidelines:
- Keep responses concise and to the point
- Use bullet points for multiple items
- Focus on actionable information
- Avoid unnecessary explanations
- Maintain professional but conversational tone
- Break down complex topics into simple steps
- Use clear headings for different topics
- Include specific examples when relevant

Key Topics (respond directly to user queries about):
- Document security and encryption
- Access control and permissions
- Audit trails and compliance
- Document management workflows
- Integration and deployment
- Best practices and troubleshooting

Remember:
- Prioritize clarity over comprehensiveness
- Focus on practical, implementable solutions
- Use enterprise-appropriate language
- Reference specific features when relevant
- Keep technical explanations simple"#;

/// Separator between the system instruction and the user's text.
pub const PROMPT_DELIMITER: &str = "\n\nUser question: ";

/// Returned whenever the provider call fails.
pub const FALLBACK_RESPONSE: &str = "I'm having trouble connecting to the SealVault knowledge base right now. Please try again in a moment!";

/// Which path produced a reply's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    Model,
    Fallback,
}

impl ResponseSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseSource::Model => "model",
            ResponseSource::Fallback => "fallback",
        }
    }
}

/// Outcome of a relayed prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayReply {
    /// The trimmed prompt, exactly as forwarded after the system instruction.
    pub prompt: String,
    pub response: String,
    pub source: ResponseSource,
}

#[derive(Clone)]
pub struct PromptRelay {
    provider: Arc<dyn TextProvider>,
}

impl PromptRelay {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }

    /// Prefix the system instruction to the user's text.
    pub fn compose_prompt(user_prompt: &str) -> String {
        let mut composed = String::with_capacity(
            SYSTEM_INSTRUCTION.len() + PROMPT_DELIMITER.len() + user_prompt.len(),
        );
        composed.push_str(SYSTEM_INSTRUCTION);
        composed.push_str(PROMPT_DELIMITER);
        composed.push_str(user_prompt);
        composed
    }

    /// Forward a validated prompt to the provider.
    pub async fn relay(&self, request: PromptRequest) -> RelayReply {
        let composed = Self::compose_prompt(request.as_str());
        let provider = self.provider.name();
        let model = self.provider.model();

        let start = Instant::now();
        let result = self.provider.generate(&composed).await;
        metrics::record_provider_latency(provider, model, start.elapsed().as_secs_f64());

        let (response, source) = match result {
            Ok(reply) => {
                tracing::info!(
                    provider,
                    model,
                    input_tokens = reply.input_tokens,
                    output_tokens = reply.output_tokens,
                    finish_reason = reply.finish_reason.as_str(),
                    "Provider returned a response"
                );
                (reply.text, ResponseSource::Model)
            }
            Err(e) => {
                tracing::error!(
                    provider,
                    model,
                    error = %e,
                    error_type = e.kind(),
                    "Provider call failed, returning fallback response"
                );
                metrics::record_provider_error(provider, e.kind());
                (FALLBACK_RESPONSE.to_string(), ResponseSource::Fallback)
            }
        };

        metrics::record_relay_outcome(source.as_str());

        RelayReply {
            prompt: request.into_inner(),
            response,
            source,
        }
    }
}
