//! Review request handling.
//!
//! Validates an inbound [`ReviewRequest`], picks the persona's prompt and
//! schema, and delegates to the injected [`ModelProvider`]. Stateless: one
//! request, one provider call, one result or one error.

pub mod prompt;

use std::sync::Arc;

use thiserror::Error;

use crate::models::{ReviewRequest, ReviewResult};
use crate::providers::{ModelProvider, ProviderError};

/// Errors from a review request.
#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("Code is required")]
    MissingCode,

    #[error("review generation failed: {0}")]
    Provider(#[from] ProviderError),
}

/// Runs reviews against a model provider.
#[derive(Clone)]
pub struct ReviewService {
    provider: Arc<dyn ModelProvider>,
}

impl ReviewService {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self { provider }
    }

    /// Review the code in `request`.
    ///
    /// Returns [`ReviewError::MissingCode`] without touching the provider
    /// when `code` is absent or blank.
    pub async fn review(&self, request: &ReviewRequest) -> Result<ReviewResult, ReviewError> {
        let code = request.code().ok_or(ReviewError::MissingCode)?;
        let persona = request.persona;

        let system = prompt::system_instruction(
            persona,
            request.focus_area.as_deref(),
            request.description.as_deref(),
        );
        let content = prompt::user_content(code, request.language.as_deref());

        let result = self
            .provider
            .generate_review(persona, &system, &content)
            .await?;

        tracing::info!(
            %persona,
            language = request.language.as_deref().unwrap_or("unknown"),
            score = result.score(),
            "review generated"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::models::Persona;
    use crate::providers::GenerationRequest;

    struct Fake {
        reply: Result<String, String>,
        calls: AtomicUsize,
        last: Mutex<Option<GenerationRequest>>,
    }

    impl Fake {
        fn ok(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                calls: AtomicUsize::new(0),
                last: Mutex::new(None),
            })
        }

        fn failing(msg: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(msg.to_string()),
                calls: AtomicUsize::new(0),
                last: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl ModelProvider for Fake {
        async fn complete(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(request.clone());
            self.reply.clone().map_err(ProviderError::Transport)
        }
    }

    const SENIOR: &str = r#"{"verdict":"Block","riskLevel":"High","score":20,"issues":[],"tradeoff":"none"}"#;
    const JUNIOR: &str = r#"{"verdict":"Great","score":88,"summary":"Nice","tips":[]}"#;

    fn request(code: Option<&str>, persona: Persona) -> ReviewRequest {
        ReviewRequest {
            code: code.map(str::to_string),
            language: Some("javascript".into()),
            persona,
            focus_area: Some("Security".into()),
            description: None,
        }
    }

    #[tokio::test]
    async fn missing_code_never_calls_provider() {
        let fake = Fake::ok(JUNIOR);
        let service = ReviewService::new(fake.clone());

        for code in [None, Some(""), Some("   ")] {
            let err = service.review(&request(code, Persona::Junior)).await.unwrap_err();
            assert!(matches!(err, ReviewError::MissingCode));
        }
        assert_eq!(fake.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn senior_persona_uses_senior_prompt_and_schema() {
        let fake = Fake::ok(SENIOR);
        let service = ReviewService::new(fake.clone());

        let result = service
            .review(&request(Some("function f(){return 1}"), Persona::Senior))
            .await
            .unwrap();
        assert_eq!(result.persona(), Persona::Senior);

        let last = fake.last.lock().unwrap().clone().unwrap();
        assert_eq!(last.schema, Some(Persona::Senior));
        assert!(last.system_instruction.contains("Principal Software Engineer"));
        assert!(last.system_instruction.contains("Focus: Security"));
        assert!(last.content.contains("javascript"));
        assert!(last.content.ends_with("function f(){return 1}"));
    }

    #[tokio::test]
    async fn junior_persona_uses_mentor_prompt() {
        let fake = Fake::ok(JUNIOR);
        let service = ReviewService::new(fake.clone());

        let result = service
            .review(&request(Some("x"), Persona::Junior))
            .await
            .unwrap();
        assert_eq!(result.persona(), Persona::Junior);

        let last = fake.last.lock().unwrap().clone().unwrap();
        assert!(last.system_instruction.contains("Friendly Senior Mentor"));
    }

    #[tokio::test]
    async fn provider_failure_is_wrapped() {
        let service = ReviewService::new(Fake::failing("connection reset"));
        let err = service
            .review(&request(Some("x"), Persona::Junior))
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewError::Provider(ProviderError::Transport(_))));
    }
}
