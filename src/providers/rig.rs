//! rig-core integration for LLM-backed code review.
//!
//! Uses rig-core's provider clients and Agent abstraction for multi-provider
//! support. Currently supports: Gemini, Anthropic, OpenAI, Groq, DeepSeek,
//! and any OpenAI-compatible API.
//!
//! Structured calls pass the persona's review type to rig's
//! `output_schema`, so the schema sent to the provider is generated from
//! the same Rust types the response is parsed into.

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::{CompletionError, Prompt, PromptError};
use rig::http_client;
use rig::providers;

use crate::config::ProviderConfig;
use crate::models::{JuniorReview, Persona, ProviderName, SeniorReview};

use super::{GenerationRequest, ModelProvider, ProviderError};

/// Maximum tokens per completion response.
///
/// Set high enough to accommodate thinking models (e.g. Gemini 2.5) that
/// spend part of the budget on internal reasoning tokens.
const MAX_TOKENS: u64 = 32768;

/// Build an agent for one request and prompt it.
///
/// The output schema is chosen by an exhaustive match on the persona, so
/// adding a persona without a schema does not compile.
macro_rules! prompt_model {
    ($client:expr, $model:expr, $request:expr, $label:expr) => {{
        let builder = $client
            .agent($model)
            .preamble(&$request.system_instruction)
            .temperature(0.0)
            .max_tokens(MAX_TOKENS);
        let content = $request.content.as_str();
        let response = match $request.schema {
            Some(Persona::Senior) => {
                let agent = builder.output_schema::<SeniorReview>().build();
                agent.prompt(content).await
            }
            Some(Persona::Junior) => {
                let agent = builder.output_schema::<JuniorReview>().build();
                agent.prompt(content).await
            }
            None => {
                let agent = builder.build();
                agent.prompt(content).await
            }
        };
        response.map_err(|e| classify_prompt_error($label, e))
    }};
}

/// Create a rig-core client using the `Client::new(api_key)` convention.
macro_rules! new_client {
    ($provider_mod:path, $api_key:expr, $label:expr) => {{
        <$provider_mod>::new($api_key).map_err(|e| {
            ProviderError::NotConfigured(format!("failed to create {} client: {e}", $label))
        })
    }};
}

/// rig-core based model provider.
///
/// Holds only configuration; a fresh rig client is built per call, so the
/// provider is cheap to share behind an `Arc`.
pub struct RigProvider {
    config: ProviderConfig,
}

impl RigProvider {
    /// Create a provider, failing fast when it cannot possibly work.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        if config.api_key.is_none() {
            return Err(ProviderError::NotConfigured(format!(
                "no API key found for provider '{}'. Set {} or {}.",
                config.name,
                crate::constants::ENV_API_KEY,
                config.name.api_key_env_var(),
            )));
        }
        if config.name == ProviderName::OpenAICompatible && config.base_url.is_none() {
            return Err(ProviderError::NotConfigured(format!(
                "openai-compatible provider requires a base URL. Set {}.",
                crate::constants::ENV_BASE_URL
            )));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn api_key(&self) -> Result<&str, ProviderError> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::NotConfigured("missing API key".to_string()))
    }

    /// Build an OpenAI-style client, optionally with a custom base URL.
    fn build_openai_client(
        &self,
        api_key: &str,
    ) -> Result<providers::openai::CompletionsClient, ProviderError> {
        let mut builder = providers::openai::CompletionsClient::builder().api_key(api_key);
        if let Some(ref base_url) = self.config.base_url {
            builder = builder.base_url(base_url);
        }
        builder.build().map_err(|e| {
            ProviderError::NotConfigured(format!("failed to create OpenAI client: {e}"))
        })
    }
}

#[async_trait]
impl ModelProvider for RigProvider {
    async fn complete(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        let api_key = self.api_key()?;
        let model = self.config.model();

        tracing::debug!(
            provider = %self.config.name,
            model,
            schema = ?request.schema,
            content_len = request.content.len(),
            "sending generation request"
        );

        match self.config.name {
            ProviderName::Gemini => {
                let client = new_client!(providers::gemini::Client, api_key, "Gemini")?;
                prompt_model!(client, model, request, "Gemini")
            }
            ProviderName::Anthropic => {
                let client: providers::anthropic::Client = providers::anthropic::Client::builder()
                    .api_key(api_key)
                    .build()
                    .map_err(|e| {
                        ProviderError::NotConfigured(format!(
                            "failed to create Anthropic client: {e}"
                        ))
                    })?;
                prompt_model!(client, model, request, "Anthropic")
            }
            ProviderName::OpenAI => {
                let client = self.build_openai_client(api_key)?;
                prompt_model!(client, model, request, "OpenAI")
            }
            ProviderName::OpenAICompatible => {
                let client = self.build_openai_client(api_key)?;
                prompt_model!(client, model, request, "OpenAI-compatible")
            }
            ProviderName::Groq => {
                let client = new_client!(providers::groq::Client, api_key, "Groq")?;
                prompt_model!(client, model, request, "Groq")
            }
            ProviderName::DeepSeek => {
                let client = new_client!(providers::deepseek::Client, api_key, "DeepSeek")?;
                prompt_model!(client, model, request, "DeepSeek")
            }
        }
    }
}

/// Split rig's error into transport and upstream failures.
///
/// An HTTP error carrying a status code means the provider answered, so it
/// is upstream (unknown model, rate limit, 5xx). Only failures to reach the
/// provider at all are transport.
fn classify_prompt_error(label: &str, err: PromptError) -> ProviderError {
    match err {
        PromptError::CompletionError(CompletionError::HttpError(
            e @ (http_client::Error::InvalidStatusCode(_)
            | http_client::Error::InvalidStatusCodeWithMessage(..)),
        )) => ProviderError::Upstream(format!("{label}: {e}")),
        PromptError::CompletionError(CompletionError::HttpError(e)) => {
            ProviderError::Transport(format!("{label}: {e}"))
        }
        other => ProviderError::Upstream(format!("{label}: {other}")),
    }
}
