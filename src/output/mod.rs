//! Output renderers for reviews printed by the CLI: terminal and JSON.

pub mod json;
pub mod terminal;

use crate::models::ReviewResult;

/// Trait for rendering a review to an output format.
pub trait OutputRenderer {
    fn render(&self, review: &ReviewResult) -> String;
}
