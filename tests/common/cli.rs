//! `assert_cmd` helpers with storage and config isolated in a temp dir.
#![allow(dead_code)]

use assert_cmd::Command;
use yt2spotify::test_utils::TestDir;

/// A `yt2spotify` command with a clean environment.
///
/// The config file path points inside `dir` (and usually does not exist),
/// so only the variables passed here and CLI flags take effect.
#[allow(deprecated)]
pub fn yt2spotify(dir: &TestDir) -> Command {
    let mut cmd = Command::cargo_bin("yt2spotify").expect("binary built");
    cmd.env_clear()
        .env("YT2S_STORAGE", dir.storage_path())
        .env("YT2S_CONFIG", dir.file_path("config.toml"))
        .env("NO_COLOR", "1")
        .write_stdin("");
    cmd
}

/// Read the storage file as a JSON object.
pub fn read_storage(dir: &TestDir) -> serde_json::Map<String, serde_json::Value> {
    let content = std::fs::read_to_string(dir.storage_path()).unwrap_or_else(|_| "{}".to_string());
    serde_json::from_str(&content).expect("storage is a JSON object")
}
