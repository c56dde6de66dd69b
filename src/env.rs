//! Environment variable abstraction for testability.
//!
//! Production code reads the process environment through [`Env::real()`].
//! Tests build an [`Env::mock()`] from a fixed map so config resolution can
//! be exercised without touching `std::env`.

use std::collections::HashMap;

/// Environment variable reader.
///
/// Empty values are treated the same as missing ones: `GEMINI_API_KEY=`
/// must not count as a configured credential.
#[derive(Clone, Debug, Default)]
pub struct Env {
    overrides: Option<HashMap<String, String>>,
}

impl Env {
    /// Read from the real process environment.
    pub fn real() -> Self {
        Self { overrides: None }
    }

    /// Read from explicit key-value pairs only.
    pub fn mock(vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        let map = vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self {
            overrides: Some(map),
        }
    }

    /// Look up a variable, returning `None` when it is unset or blank.
    pub fn get(&self, name: &str) -> Option<String> {
        let value = match &self.overrides {
            Some(map) => map.get(name).cloned(),
            None => std::env::var(name).ok(),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    /// Return the first non-blank value among `names`, in order.
    pub fn first_of(&self, names: &[&str]) -> Option<String> {
        names.iter().find_map(|name| self.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_env_reads_cargo_manifest_dir() {
        assert!(Env::real().get("CARGO_MANIFEST_DIR").is_some());
    }

    #[test]
    fn mock_env_returns_set_values() {
        let env = Env::mock([("FOO", "bar")]);
        assert_eq!(env.get("FOO").as_deref(), Some("bar"));
        assert_eq!(env.get("MISSING"), None);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let env = Env::mock([("EMPTY", ""), ("SPACES", "   ")]);
        assert_eq!(env.get("EMPTY"), None);
        assert_eq!(env.get("SPACES"), None);
    }

    #[test]
    fn first_of_respects_order() {
        let env = Env::mock([("B", "second"), ("C", "third")]);
        assert_eq!(env.first_of(&["A", "B", "C"]).as_deref(), Some("second"));
        assert_eq!(env.first_of(&["X", "Y"]), None);
    }
}
