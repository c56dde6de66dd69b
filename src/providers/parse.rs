//! Parsing of structured review responses.
//!
//! With an output schema set, providers are expected to return bare JSON.
//! Some still wrap it in markdown fences or a sentence of prose, so a few
//! candidate slices are tried before giving up.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Persona, ReviewResult};

use super::ProviderError;

/// Maximum length of response text included in parse error messages.
const PARSE_ERROR_PREVIEW_LEN: usize = 500;

/// Content inside markdown code fences.
///
/// The closing fence must start a line so that backticks embedded in JSON
/// string values (e.g. a `codeSnippet` holding a fenced example) do not
/// terminate the match early.
static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*\n(.*?)\n```").expect("fence regex is valid")
});

/// Parse a model response into the review variant selected by `persona`.
pub fn parse_review_response(persona: Persona, response: &str) -> Result<ReviewResult, ProviderError> {
    let trimmed = response.trim();
    if trimmed.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }

    let mut last_error = None;
    for candidate in extract_json_candidates(trimmed) {
        match ReviewResult::from_json(persona, &candidate) {
            Ok(result) => return Ok(result),
            Err(e) => last_error = Some(e),
        }
    }

    let reason = last_error.map(|e| e.to_string()).unwrap_or_default();
    Err(ProviderError::Parse(format!(
        "response does not match the {persona} review schema ({reason}). Response: {}",
        preview(trimmed)
    )))
}

/// Candidate JSON strings, most likely first: the raw text, the outermost
/// `{...}` slice, then the contents of any code fences.
fn extract_json_candidates(text: &str) -> Vec<String> {
    let mut candidates = vec![text.to_string()];

    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            let slice = &text[start..=end];
            if slice != text {
                candidates.push(slice.to_string());
            }
        }
    }

    for cap in FENCE_RE.captures_iter(text) {
        if let Some(inner) = cap.get(1) {
            let inner = inner.as_str().trim();
            if !inner.is_empty() {
                candidates.push(inner.to_string());
            }
        }
    }

    candidates
}

fn preview(text: &str) -> &str {
    match text.char_indices().nth(PARSE_ERROR_PREVIEW_LEN) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IssueSeverity, RiskLevel};

    const SENIOR: &str = r#"{"verdict":"Block","riskLevel":"Medium","score":55,
        "issues":[{"id":1,"severity":"Medium","title":"N+1 query","impact":"Slow pages","trigger":"Large lists"}],
        "tradeoff":"Simplicity vs throughput"}"#;

    #[test]
    fn parses_bare_json() {
        let result = parse_review_response(Persona::Senior, SENIOR).unwrap();
        let ReviewResult::Senior(review) = result else {
            panic!("expected senior");
        };
        assert_eq!(review.risk_level, RiskLevel::Medium);
        assert_eq!(review.issues[0].severity, IssueSeverity::Medium);
    }

    #[test]
    fn parses_fenced_json() {
        let response = format!("Here is the review:\n```json\n{SENIOR}\n```\n");
        assert!(parse_review_response(Persona::Senior, &response).is_ok());
    }

    #[test]
    fn parses_json_embedded_in_prose() {
        let response = format!("Sure! {SENIOR} Hope this helps.");
        assert!(parse_review_response(Persona::Senior, &response).is_ok());
    }

    #[test]
    fn fenced_snippet_inside_string_does_not_break_parsing() {
        let response = "```json\n{\"verdict\":\"ok\",\"score\":90,\"summary\":\"s\",\"tips\":[{\"id\":1,\"title\":\"t\",\"desc\":\"d\",\"fix\":\"f\",\"codeSnippet\":\"```\\nlet x = 1;\\n```\"}]}\n```";
        let result = parse_review_response(Persona::Junior, response).unwrap();
        assert_eq!(result.persona(), Persona::Junior);
    }

    #[test]
    fn empty_response_is_its_own_error() {
        let err = parse_review_response(Persona::Junior, "  \n ").unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResponse));
    }

    #[test]
    fn prose_without_json_fails() {
        let err = parse_review_response(Persona::Junior, "I cannot review this.").unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
        assert!(err.to_string().contains("junior review schema"));
    }

    #[test]
    fn candidates_start_with_raw_text() {
        let candidates = extract_json_candidates("no json here");
        assert_eq!(candidates, vec!["no json here".to_string()]);
    }

    #[test]
    fn preview_is_bounded_and_char_safe() {
        let long = "é".repeat(PARSE_ERROR_PREVIEW_LEN + 10);
        assert_eq!(preview(&long).chars().count(), PARSE_ERROR_PREVIEW_LEN);
        assert_eq!(preview("short"), "short");
    }
}
