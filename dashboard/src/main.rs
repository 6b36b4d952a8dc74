//! Interactive behavior analytics dashboard.
//!
//! Three pages picked from `window.location.pathname`:
//! - `/login` and `/signup`: email/password forms against the auth API
//! - everything else: the filtered dashboard, behind a server-verified session
//!
//! Filter state lives in the URL query and the `dashboardFilters` cookie
//! (see `dash-state`); navigation between pages is a full page load.

mod pages;

use dash_chart_ui::browser::BrowserLocation;
use dash_chart_ui::state::AppState;
use dash_state::intent::{LOGIN_ROUTE, SIGNUP_ROUTE};
use dash_state::Location;
use dioxus::prelude::*;
use pages::{DashboardPage, LoginPage, SignupPage};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Page {
    Login,
    Signup,
    Dashboard,
}

impl Page {
    fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            LOGIN_ROUTE => Page::Login,
            SIGNUP_ROUTE => Page::Signup,
            _ => Page::Dashboard,
        }
    }
}

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("main"))
        .launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(AppState::new);
    let page = use_hook(|| Page::from_path(&BrowserLocation.path()));

    rsx! {
        div {
            style: "font-family: system-ui, -apple-system, sans-serif;",
            {match page {
                Page::Login => rsx! { LoginPage {} },
                Page::Signup => rsx! { SignupPage {} },
                Page::Dashboard => rsx! { DashboardPage {} },
            }}
        }
    }
}
