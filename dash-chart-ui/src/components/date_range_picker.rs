//! Date range picker with start and end date inputs.

use super::filter_panel::send_change;
use crate::commands::DashboardCommand;
use crate::state::AppState;
use dash_core::dates::format_date;
use dash_core::FilterField;
use dioxus::prelude::*;

/// Start and end date inputs bound to the filter state.
///
/// A reversed range is kept as picked; the API query swaps it.
#[component]
pub fn DateRangePicker() -> Element {
    let state = use_context::<AppState>();
    let commands = use_coroutine_handle::<DashboardCommand>();
    let filters = *state.controller.read().state();
    let start = format_date(&filters.start_date);
    let end = format_date(&filters.end_date);
    let reversed = filters.range().is_reversed();

    rsx! {
        div {
            style: "display: flex; gap: 12px; align-items: flex-end;",
            label {
                style: "display: flex; flex-direction: column; font-weight: bold;",
                "Start Date:"
                input {
                    r#type: "date",
                    style: "margin-top: 4px; padding: 6px;",
                    value: "{start}",
                    onchange: move |evt: Event<FormData>| send_change(commands, FilterField::StartDate, &evt.value()),
                }
            }
            label {
                style: "display: flex; flex-direction: column; font-weight: bold;",
                "End Date:"
                input {
                    r#type: "date",
                    style: "margin-top: 4px; padding: 6px;",
                    value: "{end}",
                    onchange: move |evt: Event<FormData>| send_change(commands, FilterField::EndDate, &evt.value()),
                }
            }
            if reversed {
                span {
                    style: "font-size: 12px; color: #888;",
                    "Start is after end; showing {end} to {start}."
                }
            }
        }
    }
}
