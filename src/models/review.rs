//! Review request and persona-specific review result types.
//!
//! The result structs double as the structured-output contract: their
//! `JsonSchema` derive is what the model is asked to conform to, and their
//! `Deserialize` impl is what decides whether a response conforms.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Persona;

/// Inbound review request.
///
/// Every field is optional on the wire so that a missing `code` reaches the
/// handler (and gets a descriptive 400) instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub persona: Persona,
    #[serde(default)]
    pub focus_area: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ReviewRequest {
    /// The code to review, if present and not blank.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref().filter(|c| !c.trim().is_empty())
    }
}

/// Overall risk assessment in a senior review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// Severity of a single senior-review issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub enum IssueSeverity {
    Low,
    Medium,
    Critical,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueSeverity::Low => write!(f, "Low"),
            IssueSeverity::Medium => write!(f, "Medium"),
            IssueSeverity::Critical => write!(f, "Critical"),
        }
    }
}

/// A blocking or notable problem found by the senior reviewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Issue {
    /// Sequential identifier, starting at 1.
    pub id: i64,
    pub severity: IssueSeverity,
    /// Short headline for the issue.
    pub title: String,
    /// What goes wrong in production if this ships.
    pub impact: String,
    /// The input or condition that triggers the problem.
    pub trigger: String,
}

/// Strict, issue-oriented review produced by the senior persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeniorReview {
    /// One-sentence merge verdict.
    pub verdict: String,
    pub risk_level: RiskLevel,
    /// Quality score from 0 to 100.
    pub score: i64,
    /// The focus area the review concentrated on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
    pub issues: Vec<Issue>,
    /// The main engineering tradeoff the author should weigh.
    pub tradeoff: String,
}

/// A teaching tip from the junior mentor persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tip {
    /// Sequential identifier, starting at 1.
    pub id: i64,
    pub title: String,
    /// Explanation of the problem in plain language.
    pub desc: String,
    /// How to fix it.
    pub fix: String,
    /// Corrected code demonstrating the fix.
    pub code_snippet: String,
}

/// Encouraging, tip-oriented review produced by the junior persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct JuniorReview {
    /// One-sentence overall verdict.
    pub verdict: String,
    /// Quality score from 0 to 100.
    pub score: i64,
    /// Friendly summary of the code's strengths and weaknesses.
    pub summary: String,
    pub tips: Vec<Tip>,
}

/// A review conforming to exactly one persona's schema.
///
/// Serialized untagged so clients receive the bare schema shape. Untagged
/// deserialization reads back stored history and history saves that name no
/// persona; otherwise results are parsed against a known persona with
/// [`ReviewResult::from_value`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReviewResult {
    Senior(SeniorReview),
    Junior(JuniorReview),
}

impl ReviewResult {
    /// Parse a JSON value against the schema selected by `persona`.
    pub fn from_value(persona: Persona, value: serde_json::Value) -> serde_json::Result<Self> {
        match persona {
            Persona::Senior => serde_json::from_value(value).map(ReviewResult::Senior),
            Persona::Junior => serde_json::from_value(value).map(ReviewResult::Junior),
        }
    }

    /// Parse JSON text against the schema selected by `persona`.
    pub fn from_json(persona: Persona, text: &str) -> serde_json::Result<Self> {
        match persona {
            Persona::Senior => serde_json::from_str(text).map(ReviewResult::Senior),
            Persona::Junior => serde_json::from_str(text).map(ReviewResult::Junior),
        }
    }

    pub fn persona(&self) -> Persona {
        match self {
            ReviewResult::Senior(_) => Persona::Senior,
            ReviewResult::Junior(_) => Persona::Junior,
        }
    }

    pub fn verdict(&self) -> &str {
        match self {
            ReviewResult::Senior(r) => &r.verdict,
            ReviewResult::Junior(r) => &r.verdict,
        }
    }

    pub fn score(&self) -> i64 {
        match self {
            ReviewResult::Senior(r) => r.score,
            ReviewResult::Junior(r) => r.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SENIOR_JSON: &str = r#"{
        "verdict": "Do not merge",
        "riskLevel": "High",
        "score": 35,
        "issues": [
            {"id": 1, "severity": "Critical", "title": "SQL injection",
             "impact": "Data exfiltration", "trigger": "Untrusted id param"}
        ],
        "tradeoff": "Speed of delivery over safety"
    }"#;

    const JUNIOR_JSON: &str = r#"{
        "verdict": "Nice start!",
        "score": 80,
        "summary": "Readable and small.",
        "tips": [
            {"id": 1, "title": "Name things", "desc": "f is vague",
             "fix": "Rename f", "codeSnippet": "function one() { return 1 }"}
        ]
    }"#;

    #[test]
    fn request_accepts_camel_case_and_missing_fields() {
        let req: ReviewRequest =
            serde_json::from_str(r#"{"code":"x","focusArea":"Security","persona":"senior"}"#)
                .unwrap();
        assert_eq!(req.code(), Some("x"));
        assert_eq!(req.focus_area.as_deref(), Some("Security"));
        assert_eq!(req.persona, Persona::Senior);
        assert_eq!(req.language, None);

        let empty: ReviewRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.code(), None);
        assert_eq!(empty.persona, Persona::Junior);
    }

    #[test]
    fn blank_code_is_treated_as_missing() {
        let req = ReviewRequest {
            code: Some("  \n\t ".into()),
            ..Default::default()
        };
        assert_eq!(req.code(), None);
    }

    #[test]
    fn senior_json_parses_for_senior_persona() {
        let result = ReviewResult::from_json(Persona::Senior, SENIOR_JSON).unwrap();
        let ReviewResult::Senior(review) = &result else {
            panic!("expected senior review, got {result:?}");
        };
        assert_eq!(review.risk_level, RiskLevel::High);
        assert_eq!(review.issues[0].severity, IssueSeverity::Critical);
        assert_eq!(result.persona(), Persona::Senior);
        assert_eq!(result.score(), 35);
    }

    #[test]
    fn junior_json_does_not_satisfy_senior_schema() {
        assert!(ReviewResult::from_json(Persona::Senior, JUNIOR_JSON).is_err());
        assert!(ReviewResult::from_json(Persona::Junior, SENIOR_JSON).is_err());
    }

    #[test]
    fn out_of_range_enum_values_are_rejected() {
        let bad_risk = SENIOR_JSON.replace("\"High\"", "\"Extreme\"");
        assert!(ReviewResult::from_json(Persona::Senior, &bad_risk).is_err());

        let bad_severity = SENIOR_JSON.replace("\"Critical\"", "\"Blocker\"");
        assert!(ReviewResult::from_json(Persona::Senior, &bad_severity).is_err());
    }

    #[test]
    fn non_integer_score_is_rejected() {
        let fractional = JUNIOR_JSON.replace("80", "7.5");
        assert!(ReviewResult::from_json(Persona::Junior, &fractional).is_err());
    }

    #[test]
    fn serializes_bare_schema_shape() {
        let result = ReviewResult::from_json(Persona::Junior, JUNIOR_JSON).unwrap();
        let value = serde_json::to_value(&result).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["score", "summary", "tips", "verdict"]);
        assert_eq!(value["tips"][0]["codeSnippet"], "function one() { return 1 }");
    }

    #[test]
    fn untagged_deserialize_recovers_variant() {
        let senior: ReviewResult = serde_json::from_str(SENIOR_JSON).unwrap();
        let junior: ReviewResult = serde_json::from_str(JUNIOR_JSON).unwrap();
        assert_eq!(senior.persona(), Persona::Senior);
        assert_eq!(junior.persona(), Persona::Junior);
    }

    #[test]
    fn schema_lists_required_senior_fields() {
        let schema = serde_json::to_value(schemars::schema_for!(SeniorReview)).unwrap();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        for field in ["verdict", "riskLevel", "score", "issues", "tradeoff"] {
            assert!(required.contains(&field), "missing required {field}");
        }
        assert!(!required.contains(&"focus"));
    }
}
