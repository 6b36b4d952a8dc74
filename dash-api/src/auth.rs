//! Authentication API: signup, login, logout and session verification.

use crate::models::{Credentials, MessageBody};
use async_trait::async_trait;
use thiserror::Error;

pub const SIGNUP_PATH: &str = "/auth/signup";
pub const LOGIN_PATH: &str = "/auth/login";
pub const LOGOUT_PATH: &str = "/auth/logout";
pub const VERIFY_PATH: &str = "/auth/verify";

pub const LOGIN_FAILED: &str = "Login failed";
pub const SIGNUP_FAILED: &str = "Signup failed";

/// Failure of a login or signup attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The server answered with an error body
    #[error("{message}")]
    Rejected { message: String },

    /// No usable answer from the server
    #[error("An unexpected error occurred")]
    Unexpected,
}

impl AuthError {
    /// Map an error response body to an `AuthError`.
    ///
    /// A body carrying `message` yields that message; any other non-empty
    /// body yields `fallback`; an empty body is unexpected.
    pub fn from_error_body(body: &str, fallback: &str) -> Self {
        if body.trim().is_empty() {
            return AuthError::Unexpected;
        }
        let message = serde_json::from_str::<MessageBody>(body)
            .ok()
            .and_then(|body| body.message)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        AuthError::Rejected { message }
    }
}

#[async_trait(?Send)]
pub trait AuthApi {
    /// Create an account; returns the server's confirmation message.
    async fn signup(&self, credentials: &Credentials) -> Result<String, AuthError>;

    /// Open a session; the server sets its session cookie. Returns the raw body.
    async fn login(&self, credentials: &Credentials) -> Result<String, AuthError>;

    /// Close the session. Best effort: failures are logged, never returned.
    async fn logout(&self);

    /// Whether the current session is valid. Any failure counts as `false`.
    async fn verify(&self) -> bool;
}
