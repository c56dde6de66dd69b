//! Reviewer persona selection.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Tone and strictness profile for a review.
///
/// The persona selects both the prompt template and the output schema the
/// model is asked to follow, so exactly one [`ReviewResult`] variant
/// corresponds to each persona.
///
/// [`ReviewResult`]: super::ReviewResult
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    /// Strict principal engineer looking for blocking issues.
    Senior,
    /// Encouraging mentor teaching best practices.
    #[default]
    Junior,
}

/// Lenient deserializer: only `"senior"` selects [`Persona::Senior`].
///
/// Clients send whatever their form holds (`null`, `""`, `"mentor"`, a
/// number). Anything that is not the senior tag falls back to the junior
/// mentor rather than failing the request.
impl<'de> Deserialize<'de> for Persona {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(value.as_str().map(Persona::from_tag).unwrap_or_default())
    }
}

impl Persona {
    /// Map a free-form tag to a persona. Total: never fails.
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim().eq_ignore_ascii_case("senior") {
            Persona::Senior
        } else {
            Persona::Junior
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Persona::Senior => "senior",
            Persona::Junior => "junior",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
