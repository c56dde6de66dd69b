//! JSON output renderer.
//!
//! Prints the review in exactly the shape the HTTP endpoint returns.

use crate::models::ReviewResult;
use crate::output::OutputRenderer;

pub struct JsonRenderer;

impl OutputRenderer for JsonRenderer {
    fn render(&self, review: &ReviewResult) -> String {
        serde_json::to_string_pretty(review).unwrap_or_else(|_| "{}".to_string())
    }
}
