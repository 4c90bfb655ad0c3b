//! Shared helpers for integration tests.
//!
//! - `logger`: phase-tracking test logger
//! - `cli`: preconfigured `assert_cmd` commands with isolated storage

pub mod cli;
pub mod logger;
