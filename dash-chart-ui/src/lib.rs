//! Shared Dioxus components and D3.js bridge for the analytics dashboard.
//!
//! This crate provides:
//! - `browser`: `CookieJar`/`Location` backed by `document.cookie` and `window.history`
//! - `js_bridge`: Rust wrappers for the D3.js bar and line charts via `js_sys::eval()`
//! - `state`: Reactive AppState with Dioxus Signals
//! - `commands`: the coroutine that owns every filter mutation
//! - `components`: Reusable RSX components (filters, charts, auth form, etc.)

pub mod browser;
pub mod commands;
pub mod components;
pub mod js_bridge;
pub mod state;
