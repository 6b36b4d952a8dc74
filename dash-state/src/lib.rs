//! Filter state synchronization for the analytics dashboard.
//!
//! `FilterStateController` owns the canonical `FilterState` and keeps its
//! two mirrors (the `dashboardFilters` cookie and the URL query string)
//! consistent, hands out sequenced fetch requests and applies their
//! responses to the chart slots.
//!
//! # Adapters
//!
//! Cookie and URL access go through the `CookieJar` and `Location` traits,
//! wrapped by `CookieFilterStore` and `UrlFilterStore` (both `FilterStore`).
//! `memory` provides shared in-memory implementations; browser-backed ones
//! live in `dash-chart-ui`.
//!
//! # Auth
//!
//! `auth_gate` verifies the session against the server and, for anonymous
//! visitors, records a redirect intent (`intent`) so the original filtered
//! view is restored after login.

pub mod auth_gate;
pub mod charts;
pub mod controller;
pub mod intent;
pub mod memory;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use auth_gate::{Access, SignupOutcome};
pub use charts::ChartSlot;
pub use controller::{FetchRequest, FilterStateController};
pub use intent::{IntentStore, ResumedIntent};
pub use memory::{MemoryCookieJar, MemoryLocation};
pub use store::{CookieFilterStore, CookieJar, FilterStore, Location, StoreError, UrlFilterStore};
