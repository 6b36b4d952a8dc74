//! Route gating and the login/signup/logout flows.
//!
//! The session is trusted only when the server says so (`GET /auth/verify`);
//! the client never inspects the session cookie itself.

use crate::intent::{safe_redirect_target, IntentStore, HOME_ROUTE, LOGIN_ROUTE};
use crate::store::CookieJar;
use chrono::{DateTime, Utc};
use dash_api::models::Credentials;
use dash_api::{AuthApi, AuthError};
use log::{debug, error, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// Navigate here instead (the login page, carrying the way back).
    Redirect(String),
}

/// Check the session before rendering a protected view at `path?query`.
pub async fn guard<A: AuthApi + ?Sized, J: CookieJar>(
    api: &A,
    intents: &mut IntentStore<J>,
    path: &str,
    query: &str,
    now: DateTime<Utc>,
) -> Access {
    if api.verify().await {
        debug!("Session verified for {path}");
        return Access::Granted;
    }
    info!("Unauthenticated access to {path}, redirecting to login");
    Access::Redirect(intents.capture(path, query, now))
}

/// Log in and pick where to go next: the `redirect` parameter if it is a
/// safe local path, else the pending intent, else home.
pub async fn complete_login<A: AuthApi + ?Sized, J: CookieJar>(
    api: &A,
    credentials: &Credentials,
    redirect_param: Option<&str>,
    intents: &mut IntentStore<J>,
    now: DateTime<Utc>,
) -> Result<String, AuthError> {
    if let Err(e) = api.login(credentials).await {
        error!("Login failed: {e}");
        return Err(e);
    }

    let resumed = intents.resume(now);
    if let Some(intent) = &resumed {
        debug!("Resuming view {} with {:?}", intent.target, intent.filters);
        intents.restore_filters(&intent.filters);
    }

    Ok(redirect_param
        .and_then(safe_redirect_target)
        .or_else(|| resumed.map(|intent| intent.target))
        .unwrap_or_else(|| HOME_ROUTE.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupOutcome {
    pub message: String,
    pub target: String,
}

pub async fn complete_signup<A: AuthApi + ?Sized>(
    api: &A,
    credentials: &Credentials,
) -> Result<SignupOutcome, AuthError> {
    match api.signup(credentials).await {
        Ok(message) => {
            info!("Signed up {}", credentials.email);
            Ok(SignupOutcome {
                message,
                target: HOME_ROUTE.to_string(),
            })
        }
        Err(e) => {
            error!("Signup failed: {e}");
            Err(e)
        }
    }
}

/// Close the session (best effort) and return the page to show next.
pub async fn logout<A: AuthApi + ?Sized>(api: &A) -> &'static str {
    api.logout().await;
    LOGIN_ROUTE
}
