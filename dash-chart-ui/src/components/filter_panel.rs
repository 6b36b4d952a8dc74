//! Age group and gender selectors, plus the date range.

use super::DateRangePicker;
use crate::commands::DashboardCommand;
use crate::state::AppState;
use dash_core::{AgeGroup, FilterChange, FilterField, Gender};
use dioxus::prelude::*;
use log::warn;

/// Parse a form value for `field` and hand it to the command loop.
pub(crate) fn send_change(commands: Coroutine<DashboardCommand>, field: FilterField, raw: &str) {
    match FilterChange::parse(field, raw) {
        Ok(change) => commands.send(DashboardCommand::Change(change)),
        Err(e) => warn!("Ignoring {field:?} input {raw:?}: {e}"),
    }
}

#[component]
pub fn FilterPanel() -> Element {
    let state = use_context::<AppState>();
    let commands = use_coroutine_handle::<DashboardCommand>();
    let filters = *state.controller.read().state();

    rsx! {
        div {
            style: "background: white; padding: 16px; border-radius: 8px; box-shadow: 0 1px 3px rgba(0,0,0,0.15); margin-bottom: 16px; display: flex; flex-wrap: wrap; gap: 16px; align-items: flex-end;",
            label {
                style: "display: flex; flex-direction: column; font-weight: bold;",
                "Age Group:"
                select {
                    style: "margin-top: 4px; padding: 6px;",
                    onchange: move |evt: Event<FormData>| send_change(commands, FilterField::AgeGroup, &evt.value()),
                    for group in AgeGroup::ALL {
                        option {
                            value: group.as_str(),
                            selected: filters.age_group == group,
                            {group.label()}
                        }
                    }
                }
            }
            label {
                style: "display: flex; flex-direction: column; font-weight: bold;",
                "Gender:"
                select {
                    style: "margin-top: 4px; padding: 6px;",
                    onchange: move |evt: Event<FormData>| send_change(commands, FilterField::Gender, &evt.value()),
                    for gender in Gender::ALL {
                        option {
                            value: gender.as_str(),
                            selected: filters.gender == gender,
                            {gender.label()}
                        }
                    }
                }
            }
            DateRangePicker {}
        }
    }
}
