//! ModelProvider trait and LLM integration.
//!
//! Provides an abstraction layer over rig-core so the review handler never
//! talks to a concrete LLM library, and tests can swap in a fake.

pub mod parse;
pub mod rig;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Persona, ReviewResult};

/// Errors from the model provider.
///
/// Every variant is a "communication failed" condition from the caller's
/// point of view. The kinds exist for logging, not for clients.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("provider not configured: {0}")]
    NotConfigured(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("LLM API error: {0}")]
    Upstream(String),

    #[error("model returned an empty response")]
    EmptyResponse,

    #[error("failed to parse LLM response: {0}")]
    Parse(String),

    #[error("nothing to review: content is empty")]
    EmptyContent,
}

/// A single outbound generation call.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// System instruction (persona prompt).
    pub system_instruction: String,
    /// User content, i.e. the code under review.
    pub content: String,
    /// When set, the provider is asked for JSON matching this persona's
    /// review schema. When `None`, free text is returned.
    pub schema: Option<Persona>,
}

/// Trait for an LLM backend.
///
/// Implementations perform exactly one outbound call per [`complete`]
/// invocation. No retries, no backoff.
///
/// [`complete`]: ModelProvider::complete
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Send one request and return the raw response text.
    async fn complete(&self, request: &GenerationRequest) -> Result<String, ProviderError>;

    /// Request a structured review for `persona` and parse it.
    ///
    /// The result is guaranteed to match the persona's schema; anything
    /// else is reported as [`ProviderError::Parse`].
    async fn generate_review(
        &self,
        persona: Persona,
        system_instruction: &str,
        content: &str,
    ) -> Result<ReviewResult, ProviderError> {
        if content.trim().is_empty() {
            return Err(ProviderError::EmptyContent);
        }
        let request = GenerationRequest {
            system_instruction: system_instruction.to_string(),
            content: content.to_string(),
            schema: Some(persona),
        };
        let response = self.complete(&request).await?;
        parse::parse_review_response(persona, &response)
    }
}
