//! The dashboard's single writer.
//!
//! Form events and JS bar clicks both send `DashboardCommand`s to one
//! coroutine. It mutates the controller synchronously, then spawns the
//! chart fetch so that no signal borrow is held across an await. Each
//! chart's response is applied as soon as it arrives.

use crate::browser::{navigate, BrowserLocation};
use crate::state::AppState;
use chrono::Utc;
use dash_api::chart_responses;
use dash_core::FilterChange;
use dash_state::auth_gate::{guard, Access};
use dash_state::{FetchRequest, Location};
use dioxus::prelude::*;
use futures::StreamExt;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DashboardCommand {
    /// Verify the session, then load filters from URL and cookie.
    Initialize,
    Change(FilterChange),
    /// Bar chart click, by bar index.
    SelectBar(usize),
    Reset,
}

/// Start the command loop for `state`. Call once, from the dashboard page.
pub fn use_dashboard_commands(state: AppState) -> Coroutine<DashboardCommand> {
    use_coroutine(move |mut rx: UnboundedReceiver<DashboardCommand>| async move {
        let mut state = state;
        while let Some(command) = rx.next().await {
            debug!("Dashboard command: {command:?}");
            let request = match command {
                DashboardCommand::Initialize => initialize(state).await,
                DashboardCommand::Change(change) => Some(state.controller.write().on_field_change(change)),
                DashboardCommand::SelectBar(index) => state.controller.write().select_series_at(index),
                DashboardCommand::Reset => Some(state.controller.write().reset()),
            };
            if let Some(request) = request {
                spawn(refresh(state, request));
            }
        }
    })
}

async fn initialize(mut state: AppState) -> Option<FetchRequest> {
    let Some(client) = state.client() else {
        state.loading.set(false);
        return None;
    };

    let location = BrowserLocation;
    let mut intents = state.intents();
    match guard(&client, &mut intents, &location.path(), &location.query(), Utc::now()).await {
        Access::Granted => Some(state.controller.write().initialize()),
        Access::Redirect(url) => {
            navigate(&url);
            None
        }
    }
}

async fn refresh(mut state: AppState, request: FetchRequest) {
    let Some(client) = state.client() else {
        return;
    };
    let responses = chart_responses(&client, &request.query);
    futures::pin_mut!(responses);

    while let Some(response) = responses.next().await {
        state.controller.write().apply(request.seq, response);

        // Only the newest request speaks for the error banner.
        let (is_current, failure) = {
            let controller = state.controller.read();
            let is_current =
                controller.bar().applied_seq() == request.seq || controller.line().applied_seq() == request.seq;
            let failure = controller.bar().last_error().or(controller.line().last_error());
            (is_current, failure.map(str::to_string))
        };
        if is_current {
            state.error_msg.set(failure);
            state.loading.set(false);
        }
    }
}
