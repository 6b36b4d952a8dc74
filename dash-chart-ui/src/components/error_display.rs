//! Error banner.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
    #[props(default = "Error".to_string())]
    pub heading: String,
}

/// Shows `heading: message` in a red alert box.
#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    rsx! {
        div {
            role: "alert",
            style: "padding: 10px 14px; margin: 0 0 12px 0; background: #FFEBEE; color: #C62828; border-radius: 6px; border: 1px solid #EF9A9A; font-size: 14px;",
            strong { "{props.heading}: " }
            "{props.message}"
        }
    }
}
