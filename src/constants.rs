//! App-wide constants.
//!
//! Centralises the service name, config paths, environment variable names,
//! and HTTP defaults so a rename only requires changing this file.

/// Display name of the service (lowercase).
pub const APP_NAME: &str = "codelens";

/// Crate version baked in at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Local config filename (e.g. `codelens.toml` in the working directory).
pub const CONFIG_FILENAME: &str = "codelens.toml";

/// Directory name under `~/.config/` for global config and history.
pub const CONFIG_DIR: &str = "codelens";

/// Filename of the persisted review history inside [`CONFIG_DIR`].
pub const HISTORY_FILENAME: &str = "history.json";

/// Maximum number of saved reviews kept in history.
pub const HISTORY_CAPACITY: usize = 20;

/// Default address the HTTP server binds to.
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

/// Default maximum accepted request body size in bytes.
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Default `tracing` filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "codelens=info,tower_http=info";

// ── Environment variable names ──────────────────────────────────────

pub const ENV_PROVIDER: &str = "CODELENS_PROVIDER";
pub const ENV_MODEL: &str = "CODELENS_MODEL";
pub const ENV_API_KEY: &str = "CODELENS_API_KEY";
pub const ENV_BASE_URL: &str = "CODELENS_BASE_URL";
pub const ENV_BIND: &str = "CODELENS_BIND";
pub const ENV_PORT: &str = "PORT";
pub const ENV_HISTORY_PATH: &str = "CODELENS_HISTORY_PATH";
