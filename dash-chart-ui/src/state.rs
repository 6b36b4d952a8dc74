//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use crate::browser::{BrowserCookieJar, BrowserLocation};
use dash_api::HttpClient;
use dash_core::DashboardConfig;
use dash_state::{CookieFilterStore, FilterStateController, IntentStore, UrlFilterStore};
use dioxus::prelude::*;
use log::error;

pub type BrowserController = FilterStateController<BrowserCookieJar, BrowserLocation>;

/// Shared application state for the dashboard pages.
#[derive(Clone, Copy)]
pub struct AppState {
    pub config: Signal<DashboardConfig>,
    /// API client (None if it could not be built)
    pub client: Signal<Option<HttpClient>>,
    /// Canonical filter state, its mirrors and the chart slots
    pub controller: Signal<BrowserController>,
    /// True until the session is verified and the first fetch lands
    pub loading: Signal<bool>,
    /// Error message if something went wrong
    pub error_msg: Signal<Option<String>>,
    /// Feedback from the share button
    pub share_notice: Signal<Option<String>>,
}

impl AppState {
    pub fn new() -> Self {
        let config = DashboardConfig::load();

        let (client, error_msg) = match HttpClient::new(&config) {
            Ok(client) => (Some(client), None),
            Err(e) => {
                error!("Failed to build HTTP client: {e}");
                (None, Some(format!("Cannot reach the analytics API: {e}")))
            }
        };

        let controller = FilterStateController::with_stores(
            CookieFilterStore::with_name(BrowserCookieJar, config.filter_cookie.clone()),
            UrlFilterStore::new(BrowserLocation),
        );

        Self {
            config: Signal::new(config),
            client: Signal::new(client),
            controller: Signal::new(controller),
            loading: Signal::new(true),
            error_msg: Signal::new(error_msg),
            share_notice: Signal::new(None),
        }
    }

    pub fn client(&self) -> Option<HttpClient> {
        self.client.read().clone()
    }

    pub fn intents(&self) -> IntentStore<BrowserCookieJar> {
        IntentStore::from_config(BrowserCookieJar, &self.config.read())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
