//! Dashboard configuration.
//!
//! The API base URL comes from the `DASHBOARD_API_URL` environment variable
//! at runtime (native builds), else the same variable at compile time (the
//! only option inside a WASM bundle), else the local development server.

use chrono::TimeDelta;
use log::{info, warn};
use std::{
    fmt::{Debug, Display},
    str::FromStr,
    time::Duration,
};

use crate::cookie::FILTER_COOKIE;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const REDIRECT_COOKIE: &str = "dashboardRedirect";
/// Lifetime of filters stashed across an unauthenticated redirect.
pub const REDIRECT_TTL_HOURS: i64 = 12;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub filter_cookie: String,
    pub redirect_cookie: String,
    pub redirect_ttl: TimeDelta,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            filter_cookie: FILTER_COOKIE.to_string(),
            redirect_cookie: REDIRECT_COOKIE.to_string(),
            redirect_ttl: TimeDelta::hours(REDIRECT_TTL_HOURS),
        }
    }
}

impl DashboardConfig {
    pub fn load() -> Self {
        let api_base_url: String = try_load(
            "DASHBOARD_API_URL",
            option_env!("DASHBOARD_API_URL"),
            DEFAULT_API_URL.to_string(),
        );
        let timeout_ms: u64 = try_load(
            "DASHBOARD_API_TIMEOUT_MS",
            option_env!("DASHBOARD_API_TIMEOUT_MS"),
            DEFAULT_TIMEOUT_MS,
        );

        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_millis(timeout_ms),
            ..Self::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(target_arch = "wasm32")]
fn var(_key: &str) -> Option<String> {
    None
}

fn try_load<T>(key: &str, compiled: Option<&str>, default: T) -> T
where
    T: FromStr + Debug,
    T::Err: Display,
{
    let Some(raw) = var(key).or_else(|| compiled.map(str::to_string)) else {
        info!("{key} not set, using default: {default:?}");
        return default;
    };

    raw.parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default:?}");
        default
    })
}
