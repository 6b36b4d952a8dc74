//! Copy-link and reset buttons.

use crate::browser::copy_to_clipboard;
use crate::commands::DashboardCommand;
use crate::state::AppState;
use dioxus::prelude::*;
use log::warn;

#[component]
pub fn ShareControls() -> Element {
    let mut state = use_context::<AppState>();
    let commands = use_coroutine_handle::<DashboardCommand>();

    let on_share = move |_| {
        let link = state.controller.read().shareable_link();
        spawn(async move {
            let notice = match copy_to_clipboard(&link).await {
                Ok(()) => "Link copied to clipboard".to_string(),
                Err(e) => {
                    warn!("Clipboard unavailable: {e}");
                    format!("Copy this link: {link}")
                }
            };
            state.share_notice.set(Some(notice));
        });
    };

    let on_reset = move |_| {
        state.share_notice.set(None);
        commands.send(DashboardCommand::Reset);
    };

    rsx! {
        div {
            style: "display: flex; flex-wrap: wrap; gap: 12px; align-items: center; margin-bottom: 16px;",
            button {
                style: "padding: 8px 16px; background: #42A5F5; color: white; border: none; border-radius: 6px; cursor: pointer;",
                onclick: on_share,
                "Share this view"
            }
            button {
                style: "padding: 8px 16px; background: white; color: #1E88E5; border: 1px solid #1E88E5; border-radius: 6px; cursor: pointer;",
                onclick: on_reset,
                "Reset filters"
            }
            if let Some(notice) = state.share_notice.read().as_ref() {
                span {
                    style: "font-size: 13px; color: #555; word-break: break-all;",
                    "{notice}"
                }
            }
        }
    }
}
