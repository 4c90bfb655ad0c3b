//! Storage for configuration and tokens.

pub mod config;
pub mod paths;
pub mod token_store;

pub use config::{
    Config, ConfigSource, ENV_API_URL, ENV_CLIENT_ID, ENV_CONFIG, ENV_FORMAT, ENV_NO_COLOR,
    ENV_NO_COLOR_STD, ENV_PRETTY, ENV_REDIRECT_URL, ENV_STORAGE, ENV_TIMEOUT, ResolvedConfig,
    Sourced,
};
pub use paths::AppPaths;
pub use token_store::{LocalStorage, StoredToken, clear_token, save_token};
