//! Shared types used across all modules.
//!
//! This module defines the core data structures for review requests,
//! persona-specific review results, and saved history entries. Other
//! modules import from here rather than reaching into each other's
//! internals.

pub mod history;
pub mod persona;
pub mod review;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use history::{HistoryEntry, SaveHistoryRequest};
pub use persona::Persona;
pub use review::{
    Issue, IssueSeverity, JuniorReview, ReviewRequest, ReviewResult, RiskLevel, SeniorReview, Tip,
};

/// Supported LLM provider backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderName {
    #[default]
    Gemini,
    Anthropic,
    #[serde(rename = "openai")]
    OpenAI,
    Groq,
    #[serde(rename = "deepseek")]
    DeepSeek,
    /// Any OpenAI-compatible API (e.g. Ollama, Together, local servers).
    #[serde(rename = "openai-compatible")]
    OpenAICompatible,
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderName::Gemini => "gemini",
            ProviderName::Anthropic => "anthropic",
            ProviderName::OpenAI => "openai",
            ProviderName::Groq => "groq",
            ProviderName::DeepSeek => "deepseek",
            ProviderName::OpenAICompatible => "openai-compatible",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for ProviderName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(ProviderName::Gemini),
            "anthropic" => Ok(ProviderName::Anthropic),
            "openai" => Ok(ProviderName::OpenAI),
            "groq" => Ok(ProviderName::Groq),
            "deepseek" => Ok(ProviderName::DeepSeek),
            "openai-compatible" => Ok(ProviderName::OpenAICompatible),
            other => Err(format!(
                "unsupported provider: '{other}'. Supported: gemini, anthropic, openai, \
                 groq, deepseek, openai-compatible"
            )),
        }
    }
}

impl ProviderName {
    /// Provider-specific environment variable holding the API key.
    pub fn api_key_env_var(self) -> &'static str {
        match self {
            ProviderName::Gemini => "GEMINI_API_KEY",
            ProviderName::Anthropic => "ANTHROPIC_API_KEY",
            ProviderName::OpenAI | ProviderName::OpenAICompatible => "OPENAI_API_KEY",
            ProviderName::Groq => "GROQ_API_KEY",
            ProviderName::DeepSeek => "DEEPSEEK_API_KEY",
        }
    }

    /// Model used when neither config nor environment names one.
    pub fn default_model(self) -> &'static str {
        match self {
            ProviderName::Gemini => "gemini-2.5-flash",
            ProviderName::Anthropic => "claude-sonnet-4-20250514",
            ProviderName::OpenAI | ProviderName::OpenAICompatible => "gpt-4o-mini",
            ProviderName::Groq => "llama-3.3-70b-versatile",
            ProviderName::DeepSeek => "deepseek-chat",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_name_default_is_gemini() {
        assert_eq!(ProviderName::default(), ProviderName::Gemini);
        assert_eq!(ProviderName::default().default_model(), "gemini-2.5-flash");
    }

    #[test]
    fn provider_name_parses_case_insensitively() {
        assert_eq!("GEMINI".parse::<ProviderName>(), Ok(ProviderName::Gemini));
        assert_eq!("google".parse::<ProviderName>(), Ok(ProviderName::Gemini));
        assert_eq!(" OpenAI ".parse::<ProviderName>(), Ok(ProviderName::OpenAI));
        assert_eq!(
            "openai-compatible".parse::<ProviderName>(),
            Ok(ProviderName::OpenAICompatible)
        );
    }

    #[test]
    fn provider_name_rejects_unknown() {
        let err = "cohere".parse::<ProviderName>().unwrap_err();
        assert!(err.contains("unsupported provider"));
        assert!(err.contains("cohere"));
    }

    #[test]
    fn display_matches_serde_name() {
        for name in [
            ProviderName::Gemini,
            ProviderName::Anthropic,
            ProviderName::OpenAI,
            ProviderName::Groq,
            ProviderName::DeepSeek,
            ProviderName::OpenAICompatible,
        ] {
            let json = serde_json::to_string(&name).unwrap();
            assert_eq!(json, format!("\"{name}\""));
        }
    }

    #[test]
    fn compatible_provider_shares_openai_key() {
        assert_eq!(
            ProviderName::OpenAICompatible.api_key_env_var(),
            ProviderName::OpenAI.api_key_env_var()
        );
        assert_eq!(ProviderName::Gemini.api_key_env_var(), "GEMINI_API_KEY");
    }
}
