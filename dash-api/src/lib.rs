//! Client for the remote analytics and authentication APIs.
//!
//! Both APIs are JSON over HTTP. The `AnalyticsApi` and `AuthApi` traits are
//! the seams the filter controller and auth flow depend on; `HttpClient`
//! implements them with `reqwest` (browser `fetch` on WASM, credentials
//! included so the session cookie travels with every call).

pub mod analytics;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod timeout;

pub use analytics::{chart_responses, AnalyticsApi, AnalyticsQuery, ChartResponse};
pub use auth::{AuthApi, AuthError};
pub use client::HttpClient;
pub use error::{ApiError, Result};
pub use timeout::with_timeout;
