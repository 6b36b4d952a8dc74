//! The filter state controller.
//!
//! Every operation leaves memory, cookie and URL holding the same
//! `FilterState` and returns a `FetchRequest` for the caller to run (the
//! UI spawns it, tests await `refresh`). Requests carry a monotonic
//! sequence number so late responses cannot overwrite newer charts.

use crate::charts::ChartSlot;
use crate::store::{CookieFilterStore, CookieJar, FilterStore, Location, UrlFilterStore};
use dash_api::models::{BarChartData, LineChartData};
use dash_api::{chart_responses, AnalyticsApi, AnalyticsQuery, ChartResponse};
use dash_core::{FilterChange, FilterState, PartialFilters, Series};
use futures::StreamExt;
use log::{debug, warn};

/// A chart refresh to perform for one filter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub query: AnalyticsQuery,
}

pub struct FilterStateController<J, L> {
    cookie: CookieFilterStore<J>,
    url: UrlFilterStore<L>,
    state: FilterState,
    last_seq: u64,
    bar: ChartSlot<BarChartData>,
    line: ChartSlot<LineChartData>,
}

impl<J: CookieJar, L: Location> FilterStateController<J, L> {
    pub fn new(jar: J, location: L) -> Self {
        Self::with_stores(CookieFilterStore::new(jar), UrlFilterStore::new(location))
    }

    pub fn with_stores(cookie: CookieFilterStore<J>, url: UrlFilterStore<L>) -> Self {
        Self {
            cookie,
            url,
            state: FilterState::default(),
            last_seq: 0,
            bar: ChartSlot::default(),
            line: ChartSlot::default(),
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn bar(&self) -> &ChartSlot<BarChartData> {
        &self.bar
    }

    pub fn line(&self) -> &ChartSlot<LineChartData> {
        &self.line
    }

    /// Build the state from URL > cookie > defaults, persist it to the
    /// cookie and request the first fetch.
    ///
    /// A cookie that does not decode is deleted and ignored.
    pub fn initialize(&mut self) -> FetchRequest {
        let from_cookie = match self.cookie.load() {
            Ok(filters) => filters.unwrap_or_default(),
            Err(e) => {
                warn!("Discarding unreadable {} cookie: {e}", self.cookie.name());
                if let Err(e) = self.cookie.clear() {
                    warn!("Failed to remove {} cookie: {e}", self.cookie.name());
                }
                PartialFilters::default()
            }
        };
        let from_url = match self.url.load() {
            Ok(filters) => filters.unwrap_or_default(),
            Err(e) => {
                warn!("Ignoring URL filters: {e}");
                PartialFilters::default()
            }
        };

        self.state = from_url.or(from_cookie).resolve();
        debug!("Filters initialized: {:?}", self.state);

        self.persist_cookie();
        self.next_request()
    }

    /// Apply a single-field edit to memory, URL and cookie.
    pub fn on_field_change(&mut self, change: FilterChange) -> FetchRequest {
        self.state = self.state.with_change(change);
        debug!("Filter changed: {change:?}");

        self.persist_url();
        self.persist_cookie();
        self.next_request()
    }

    /// A click on the bar at `index`. Indices outside the six series are ignored.
    pub fn select_series_at(&mut self, index: usize) -> Option<FetchRequest> {
        match Series::from_index(index) {
            Some(series) => Some(self.on_field_change(FilterChange::Series(series))),
            None => {
                warn!("Ignoring click on bar index {index}");
                None
            }
        }
    }

    /// Back to defaults: cookie deleted, URL rewritten with the defaults.
    pub fn reset(&mut self) -> FetchRequest {
        self.state = FilterState::default();
        debug!("Filters reset");

        if let Err(e) = self.cookie.clear() {
            warn!("Failed to remove {} cookie: {e}", self.cookie.name());
        }
        self.persist_url();
        self.next_request()
    }

    /// Link reproducing the current view without any cookie.
    pub fn shareable_link(&self) -> String {
        self.url.share_url(&self.state)
    }

    /// Record one chart's response to request `seq` in that chart's slot.
    /// Returns whether the chart's data changed.
    pub fn apply(&mut self, seq: u64, response: ChartResponse) -> bool {
        match response {
            ChartResponse::Bar(outcome) => self.bar.apply(seq, outcome, "bar chart"),
            ChartResponse::Line(outcome) => self.line.apply(seq, outcome, "line chart"),
        }
    }

    /// Fetch both charts for `request`, applying each response on arrival.
    pub async fn refresh<A: AnalyticsApi + ?Sized>(&mut self, api: &A, request: FetchRequest) {
        let responses = chart_responses(api, &request.query);
        futures::pin_mut!(responses);
        while let Some(response) = responses.next().await {
            self.apply(request.seq, response);
        }
    }

    fn next_request(&mut self) -> FetchRequest {
        self.last_seq += 1;
        FetchRequest {
            seq: self.last_seq,
            query: AnalyticsQuery::from(&self.state),
        }
    }

    fn persist_cookie(&mut self) {
        if let Err(e) = self.cookie.save(&self.state) {
            warn!("Failed to write {} cookie: {e}", self.cookie.name());
        }
    }

    fn persist_url(&mut self) {
        if let Err(e) = self.url.save(&self.state) {
            warn!("Failed to update URL query: {e}");
        }
    }
}
