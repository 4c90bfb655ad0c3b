//! Core flows: PKCE login, token lifecycle, profile and submission.

pub mod callback;
pub mod http;
pub mod logging;
pub mod models;
pub mod oauth;
pub mod pkce;
pub mod profile;
pub mod session;
pub mod submit;

pub use models::{AccountView, LoginReport, LogoutReport, RobotOutput, SubmissionReport, TokenSummary};
pub use oauth::{OAuthSettings, TokenResponse};
pub use pkce::PkcePair;
pub use profile::UserProfile;
pub use session::{TokenState, complete_login, ensure_valid};
pub use submit::{SubmissionOutcome, SubmissionRequest, SubmissionResponse};
