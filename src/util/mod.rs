//! Utility functions.

pub mod env;
pub mod format;
pub mod time;

pub use format::{format_count, mask_secret, wrap_text};
pub use time::{describe_expiry, format_countdown};
