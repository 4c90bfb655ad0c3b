//! yt2spotify - YouTube to Spotify playlist converter client
//!
//! Logs in to Spotify with the authorization code flow and PKCE, keeps the
//! token record on disk, shows the account profile and submits YouTube URLs
//! to a conversion backend.

#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod core;
pub mod error;
pub mod render;
pub mod storage;
pub mod util;

/// Test utilities module - included in test builds or when test-utils feature is enabled.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{ExitCode, Result, Yt2sError};

#[cfg(any(test, feature = "test-utils"))]
pub use test_utils::*;
