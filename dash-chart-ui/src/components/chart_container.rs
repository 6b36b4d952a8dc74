//! Titled container for a D3.js chart.

use dioxus::prelude::*;

/// Props for ChartContainer
#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// The DOM id for the chart container (D3 will render into this)
    pub id: String,
    pub title: String,
    /// Whether the chart has no data yet
    #[props(default = false)]
    pub loading: bool,
    #[props(default = 220)]
    pub min_height: u32,
}

/// A card holding one chart, with a placeholder until data arrives.
#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let style = format!(
        "min-height: {}px; position: relative; width: 100%;",
        props.min_height
    );

    rsx! {
        div {
            style: "flex: 1 1 360px; max-width: 480px; margin: 12px; padding: 12px; background: white; border-radius: 8px; box-shadow: 0 1px 3px rgba(0,0,0,0.15);",
            h2 {
                style: "font-size: 18px; font-weight: 500; text-align: center; margin: 0 0 8px 0;",
                "{props.title}"
            }
            div {
                style: "{style}",
                if props.loading {
                    div {
                        style: "position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); color: #666;",
                        "Loading chart..."
                    }
                }
                div {
                    id: "{props.id}",
                    style: "width: 100%;",
                }
            }
        }
    }
}
