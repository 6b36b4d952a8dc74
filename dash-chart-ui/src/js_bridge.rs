//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The D3.js chart functions live in `assets/js/*.js`, are embedded at
//! compile time and evaluated as globals once D3 has loaded. Bar clicks
//! travel back through a Rust closure installed on `window`.

use dash_state::charts::{BarDataset, LineDataset};
use log::{error, warn};
use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;

static BAR_CHART_JS: &str = include_str!("../assets/js/bar-chart.js");
static LINE_CHART_JS: &str = include_str!("../assets/js/line-chart.js");

/// Global the bar chart calls with the clicked bar's index.
const BAR_CLICK_HOOK: &str = "__dashboardBarClick";

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('Dashboard JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Initialize chart scripts with a wait-for-D3 polling loop.
///
/// The scripts are evaluated at global scope once `d3` exists, then their
/// entry points are promoted to `window.*`.
pub fn init_charts() {
    let all_js = [BAR_CHART_JS, LINE_CHART_JS].join("\n");

    let store_js = format!(
        "window.__dashboardChartScripts = {};",
        serde_json::to_string(&all_js).unwrap_or_default()
    );
    let _ = js_sys::eval(&store_js);

    let init_js = r#"
        (function() {
            if (window.__dashboardChartsReady) return;
            var waitForD3 = setInterval(function() {
                if (typeof d3 !== 'undefined' && window.__dashboardChartScripts) {
                    clearInterval(waitForD3);
                    (0, eval)(window.__dashboardChartScripts);
                    delete window.__dashboardChartScripts;
                    if (typeof renderBarChart !== 'undefined') window.renderBarChart = renderBarChart;
                    if (typeof renderTrendChart !== 'undefined') window.renderTrendChart = renderTrendChart;
                    window.__dashboardChartsReady = true;
                }
            }, 100);
        })();
    "#;
    let _ = js_sys::eval(init_js);
}

/// Escape a JSON payload for embedding in a single-quoted JS string.
fn escape_payload<T: Serialize>(payload: &T) -> Option<String> {
    match serde_json::to_string(payload) {
        Ok(json) => Some(
            json.replace('\\', "\\\\")
                .replace('\'', "\\'")
                .replace('\n', ""),
        ),
        Err(e) => {
            error!("Failed to serialize chart data: {e}");
            None
        }
    }
}

/// Poll until the scripts and the container exist, then call `function`.
fn render_when_ready(function: &str, container_id: &str, payload: &str) {
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__dashboardChartsReady &&
                    typeof window.{function} !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.{function}('{container_id}', '{payload}');
                    }} catch(e) {{ console.error('[dashboard] {function} error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Render the horizontal per-series bar chart.
pub fn render_bar_chart(container_id: &str, dataset: &BarDataset) {
    if let Some(payload) = escape_payload(dataset) {
        render_when_ready("renderBarChart", container_id, &payload);
    }
}

/// Render the daily trend line of the selected series.
pub fn render_line_chart(container_id: &str, dataset: &LineDataset) {
    if let Some(payload) = escape_payload(dataset) {
        render_when_ready("renderTrendChart", container_id, &payload);
    }
}

/// Destroy/clean up a chart in the given container.
pub fn destroy_chart(container_id: &str) {
    call_js(&format!(
        "var el = document.getElementById('{}'); if (el) el.innerHTML = '';",
        container_id
    ));
}

/// Route bar clicks to `handler` with the clicked index.
///
/// Call once per page; the closure lives for the rest of the page.
pub fn on_bar_click(mut handler: impl FnMut(usize) + 'static) {
    let Some(window) = web_sys::window() else {
        warn!("No window to attach the bar click handler to");
        return;
    };
    let closure = Closure::<dyn FnMut(u32)>::new(move |index: u32| handler(index as usize));
    if let Err(e) = js_sys::Reflect::set(&window, &JsValue::from_str(BAR_CLICK_HOOK), closure.as_ref()) {
        error!("Failed to install bar click handler: {e:?}");
        return;
    }
    closure.forget();
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_api::models::TrendPoint;

    /// Undo `escape_payload` the way a single-quoted JS string literal does.
    fn unescape_js(literal: &str) -> String {
        let mut out = String::new();
        let mut chars = literal.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                out.extend(chars.next());
            } else {
                out.push(c);
            }
        }
        out
    }

    fn trend(label: &str) -> LineDataset {
        LineDataset {
            label: label.to_string(),
            color: "#FF6347",
            points: vec![TrendPoint {
                date: "2022-10-04".to_string(),
                value: 1.5,
            }],
        }
    }

    #[test]
    fn test_escape_payload_quotes_and_backslashes() {
        let dataset = trend(r"Feature A's \ trend");
        let payload = escape_payload(&dataset).unwrap();

        assert!(!payload.contains('\n'));
        // Every quote is escaped, so none can end the JS string early.
        let bare_quotes = payload
            .match_indices('\'')
            .filter(|(i, _)| !payload[..*i].ends_with('\\'))
            .count();
        assert_eq!(bare_quotes, 0);

        let json = unescape_js(&payload);
        assert_eq!(json, serde_json::to_string(&dataset).unwrap());
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["label"], r"Feature A's \ trend");
    }

    #[test]
    fn test_escape_payload_plain_dataset_unchanged() {
        let dataset = trend("Feature B Trend");
        assert_eq!(escape_payload(&dataset).unwrap(), serde_json::to_string(&dataset).unwrap());
    }
}
