//! The filtered dashboard: bar chart of per-series totals, trend line of
//! the selected series.

use dash_chart_ui::browser::navigate;
use dash_chart_ui::commands::{use_dashboard_commands, DashboardCommand};
use dash_chart_ui::components::{
    ChartContainer, ErrorDisplay, FilterPanel, LoadingSpinner, ShareControls,
};
use dash_chart_ui::js_bridge;
use dash_chart_ui::state::AppState;
use dash_state::auth_gate::logout;
use dash_state::charts::{BarDataset, LineDataset};
use dash_state::intent::LOGIN_ROUTE;
use dioxus::prelude::*;

/// DOM ids for the D3 chart container divs.
const BAR_CHART_ID: &str = "bar-chart";
const LINE_CHART_ID: &str = "line-chart";

#[component]
pub fn DashboardPage() -> Element {
    let state = use_context::<AppState>();
    let commands = use_dashboard_commands(state);

    // ─── Once on mount: chart scripts, bar clicks, session check ───
    use_hook(move || {
        js_bridge::init_charts();
        js_bridge::on_bar_click(move |index| commands.send(DashboardCommand::SelectBar(index)));
        commands.send(DashboardCommand::Initialize);
    });

    // ─── Re-render both charts whenever the controller changes ───
    use_effect(move || {
        let controller = state.controller.read();
        let selected = controller.state().selected_series;
        match controller.bar().data() {
            Some(data) => js_bridge::render_bar_chart(BAR_CHART_ID, &BarDataset::new(data, selected)),
            None => js_bridge::destroy_chart(BAR_CHART_ID),
        }
        match controller.line().data() {
            Some(data) => js_bridge::render_line_chart(LINE_CHART_ID, &LineDataset::new(data, selected)),
            None => js_bridge::destroy_chart(LINE_CHART_ID),
        }
    });

    let on_logout = move |_| match state.client() {
        Some(client) => {
            spawn(async move {
                navigate(logout(&client).await);
            });
        }
        None => navigate(LOGIN_ROUTE),
    };

    let loading = (state.loading)();
    let (bar_pending, line_pending) = {
        let controller = state.controller.read();
        (controller.bar().data().is_none(), controller.line().data().is_none())
    };

    rsx! {
        div {
            style: "background: #f3f4f6; min-height: 100vh; padding: 24px;",
            div {
                style: "display: flex; justify-content: space-between; align-items: center; max-width: 1000px; margin: 0 auto 24px auto;",
                h1 {
                    style: "font-size: 28px; font-weight: 600; margin: 0;",
                    "Interactive Data Dashboard"
                }
                button {
                    style: "padding: 6px 14px; background: white; border: 1px solid #ccc; border-radius: 6px; cursor: pointer;",
                    onclick: on_logout,
                    "Logout"
                }
            }

            div {
                style: "max-width: 1000px; margin: 0 auto;",

                if let Some(err) = state.error_msg.read().as_ref() {
                    ErrorDisplay { message: err.clone() }
                }

                if loading {
                    LoadingSpinner {}
                } else {
                    FilterPanel {}
                    ShareControls {}

                    div {
                        style: "display: flex; flex-wrap: wrap; justify-content: center;",
                        ChartContainer {
                            id: BAR_CHART_ID.to_string(),
                            title: "Feature Time Aggregation".to_string(),
                            loading: bar_pending,
                        }
                        ChartContainer {
                            id: LINE_CHART_ID.to_string(),
                            title: "Feature Trend".to_string(),
                            loading: line_pending,
                        }
                    }
                }
            }
        }
    }
}
