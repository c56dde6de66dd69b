//! codelens — AI-powered code review web service (library crate).
//!
//! Re-exports public modules for integration tests and the binary.

pub mod config;
pub mod constants;
pub mod env;
pub mod history;
pub mod models;
pub mod output;
pub mod providers;
pub mod review;
pub mod server;
