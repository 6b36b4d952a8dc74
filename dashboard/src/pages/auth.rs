//! Login and signup pages.

use chrono::Utc;
use dash_api::models::Credentials;
use dash_chart_ui::browser::{navigate, BrowserLocation};
use dash_chart_ui::components::AuthForm;
use dash_chart_ui::state::AppState;
use dash_core::query::query_value;
use dash_state::auth_gate::{complete_login, complete_signup};
use dash_state::intent::{LOGIN_ROUTE, REDIRECT_PARAM, SIGNUP_ROUTE};
use dash_state::Location;
use dioxus::prelude::*;
use log::info;

const UNAVAILABLE: &str = "The server is unavailable";

/// Login, then back to the page that sent us here.
#[component]
pub fn LoginPage() -> Element {
    let state = use_context::<AppState>();
    let mut error = use_signal(String::new);
    let mut busy = use_signal(|| false);

    let on_submit = move |credentials: Credentials| {
        let Some(client) = state.client() else {
            error.set(UNAVAILABLE.to_string());
            return;
        };
        busy.set(true);
        spawn(async move {
            let redirect = query_value(&BrowserLocation.query(), REDIRECT_PARAM);
            let mut intents = state.intents();
            match complete_login(&client, &credentials, redirect.as_deref(), &mut intents, Utc::now()).await {
                Ok(target) => {
                    info!("Logged in, continuing to {target}");
                    navigate(&target);
                }
                Err(e) => {
                    error.set(e.to_string());
                    busy.set(false);
                }
            }
        });
    };

    rsx! {
        AuthForm {
            title: "Login".to_string(),
            submit_label: "Login".to_string(),
            on_submit,
            error: error(),
            busy: busy(),
            footer_prompt: "Not have any account?".to_string(),
            footer_link: "Signup here".to_string(),
            footer_href: SIGNUP_ROUTE.to_string(),
        }
    }
}

#[component]
pub fn SignupPage() -> Element {
    let state = use_context::<AppState>();
    let mut error = use_signal(String::new);
    let mut busy = use_signal(|| false);

    let on_submit = move |credentials: Credentials| {
        let Some(client) = state.client() else {
            error.set(UNAVAILABLE.to_string());
            return;
        };
        busy.set(true);
        spawn(async move {
            match complete_signup(&client, &credentials).await {
                Ok(outcome) => navigate(&outcome.target),
                Err(e) => {
                    error.set(e.to_string());
                    busy.set(false);
                }
            }
        });
    };

    rsx! {
        AuthForm {
            title: "Signup".to_string(),
            submit_label: "Signup".to_string(),
            on_submit,
            error: error(),
            busy: busy(),
            footer_prompt: "Already have an account?".to_string(),
            footer_link: "Login here".to_string(),
            footer_href: LOGIN_ROUTE.to_string(),
        }
    }
}
