//! Browser-backed storage adapters and navigation helpers.
//!
//! Cookie values are percent-encoded so the JSON filter payload survives
//! `document.cookie`. Query rewrites use `history.replaceState`, never
//! `pushState`, so filter edits do not pile up in the back button.

use chrono::TimeDelta;
use dash_state::store::{CookieJar, Location, Result, StoreError};
use log::{debug, error};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlDocument, Window};

fn js_error(e: JsValue) -> StoreError {
    StoreError::Unavailable(format!("{e:?}"))
}

fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".to_string()))
}

fn html_document() -> Result<HtmlDocument> {
    window()?
        .document()
        .ok_or_else(|| StoreError::Unavailable("no document".to_string()))?
        .dyn_into::<HtmlDocument>()
        .map_err(|_| StoreError::Unavailable("document is not an HTML document".to_string()))
}

/// Value of cookie `name` in a `document.cookie` string, percent-decoded.
/// Names must match exactly; a value that does not decode is returned as is.
pub(crate) fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| match urlencoding::decode(value) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => value.to_string(),
        })
}

/// The `document.cookie` assignment storing `value` under `name`.
pub(crate) fn cookie_assignment(name: &str, value: &str, max_age: Option<TimeDelta>) -> String {
    let mut cookie = format!("{name}={}; path=/; SameSite=Lax", urlencoding::encode(value));
    if let Some(max_age) = max_age {
        cookie.push_str(&format!("; max-age={}", max_age.num_seconds()));
    }
    cookie
}

/// `document.cookie`, scoped to `path=/`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrowserCookieJar;

impl CookieJar for BrowserCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        let cookies = html_document().ok()?.cookie().ok()?;
        cookie_value(&cookies, name)
    }

    fn set(&mut self, name: &str, value: &str, max_age: Option<TimeDelta>) -> Result<()> {
        html_document()?
            .set_cookie(&cookie_assignment(name, value, max_age))
            .map_err(js_error)
    }

    fn remove(&mut self, name: &str) -> Result<()> {
        html_document()?
            .set_cookie(&format!("{name}=; path=/; max-age=0; SameSite=Lax"))
            .map_err(js_error)
    }
}

/// `window.location`, rewritten through `window.history`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrowserLocation;

impl Location for BrowserLocation {
    fn origin(&self) -> String {
        window()
            .ok()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default()
    }

    fn path(&self) -> String {
        window()
            .ok()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_else(|| "/".to_string())
    }

    fn query(&self) -> String {
        window()
            .ok()
            .and_then(|w| w.location().search().ok())
            .map(|search| search.trim_start_matches('?').to_string())
            .unwrap_or_default()
    }

    fn replace_query(&mut self, query: &str) -> Result<()> {
        let window = window()?;
        let path = window.location().pathname().map_err(js_error)?;
        let url = if query.is_empty() {
            path
        } else {
            format!("{path}?{query}")
        };
        window
            .history()
            .map_err(js_error)?
            .replace_state_with_url(&JsValue::NULL, "", Some(&url))
            .map_err(js_error)
    }
}

/// Full page navigation to a same-origin URL.
pub fn navigate(url: &str) {
    debug!("Navigating to {url}");
    let result = window().and_then(|w| w.location().assign(url).map_err(js_error));
    if let Err(e) = result {
        error!("Navigation to {url} failed: {e}");
    }
}

/// `navigator.clipboard.writeText(text)`.
pub async fn copy_to_clipboard(text: &str) -> Result<()> {
    let navigator = window()?.navigator();
    let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard")).map_err(js_error)?;
    let write_text: js_sys::Function = js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))
        .map_err(js_error)?
        .dyn_into()
        .map_err(js_error)?;
    let promise: js_sys::Promise = write_text
        .call1(&clipboard, &JsValue::from_str(text))
        .map_err(js_error)?
        .dyn_into()
        .map_err(js_error)?;
    JsFuture::from(promise).await.map_err(js_error)?;
    Ok(())
}
