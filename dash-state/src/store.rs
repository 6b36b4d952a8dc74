//! Storage adapters for the two filter mirrors.
//!
//! `CookieJar` and `Location` are the raw platform capabilities.
//! `CookieFilterStore` and `UrlFilterStore` put the filter codecs on top of
//! them behind the common `FilterStore` interface.

use chrono::TimeDelta;
use dash_core::cookie::{decode_cookie, encode_cookie, FILTER_COOKIE};
use dash_core::query::{encode_query, parse_query, QueryMode};
use dash_core::{FilterError, FilterState, PartialFilters};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Stored value could not be decoded or encoded
    #[error(transparent)]
    Corrupt(#[from] FilterError),

    /// The platform refused the read or write
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Name/value cookie storage.
pub trait CookieJar {
    fn get(&self, name: &str) -> Option<String>;

    /// Write a cookie; `None` max-age means a session cookie.
    fn set(&mut self, name: &str, value: &str, max_age: Option<TimeDelta>) -> Result<()>;

    fn remove(&mut self, name: &str) -> Result<()>;
}

/// The current page address.
pub trait Location {
    /// Scheme, host and port, without a trailing slash.
    fn origin(&self) -> String;

    fn path(&self) -> String;

    /// Query string without the leading `?`.
    fn query(&self) -> String;

    /// Swap the query string in place. Must not add a history entry.
    fn replace_query(&mut self, query: &str) -> Result<()>;
}

/// Common read/write interface of the filter mirrors.
pub trait FilterStore {
    /// Whatever filter fields the store holds, `None` if it holds nothing.
    fn load(&self) -> Result<Option<PartialFilters>>;

    fn save(&mut self, state: &FilterState) -> Result<()>;

    fn clear(&mut self) -> Result<()>;
}

/// Filter state persisted as JSON in a cookie.
#[derive(Debug, Clone)]
pub struct CookieFilterStore<J> {
    jar: J,
    name: String,
    max_age: Option<TimeDelta>,
}

impl<J: CookieJar> CookieFilterStore<J> {
    pub fn new(jar: J) -> Self {
        Self::with_name(jar, FILTER_COOKIE)
    }

    pub fn with_name(jar: J, name: impl Into<String>) -> Self {
        Self {
            jar,
            name: name.into(),
            max_age: None,
        }
    }

    pub fn with_max_age(mut self, max_age: TimeDelta) -> Self {
        self.max_age = Some(max_age);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<J: CookieJar> FilterStore for CookieFilterStore<J> {
    fn load(&self) -> Result<Option<PartialFilters>> {
        match self.jar.get(&self.name) {
            Some(raw) => Ok(Some(decode_cookie(&raw)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, state: &FilterState) -> Result<()> {
        let value = encode_cookie(state)?;
        self.jar.set(&self.name, &value, self.max_age)
    }

    fn clear(&mut self) -> Result<()> {
        self.jar.remove(&self.name)
    }
}

/// Filter state mirrored into the URL query string.
#[derive(Debug, Clone)]
pub struct UrlFilterStore<L> {
    location: L,
}

impl<L: Location> UrlFilterStore<L> {
    pub fn new(location: L) -> Self {
        Self { location }
    }

    /// `{origin}/?{query}` with unset fields omitted.
    pub fn share_url(&self, state: &FilterState) -> String {
        let origin = self.location.origin();
        let origin = origin.trim_end_matches('/');
        let query = encode_query(state, QueryMode::Share);
        if query.is_empty() {
            format!("{origin}/")
        } else {
            format!("{origin}/?{query}")
        }
    }
}

impl<L: Location> FilterStore for UrlFilterStore<L> {
    fn load(&self) -> Result<Option<PartialFilters>> {
        let filters = parse_query(&self.location.query());
        Ok((!filters.is_empty()).then_some(filters))
    }

    fn save(&mut self, state: &FilterState) -> Result<()> {
        self.location
            .replace_query(&encode_query(state, QueryMode::Mirror))
    }

    fn clear(&mut self) -> Result<()> {
        self.location.replace_query("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryCookieJar, MemoryLocation};
    use dash_core::{Gender, Series};

    #[test]
    fn test_cookie_store_round_trip() {
        let jar = MemoryCookieJar::new();
        let mut store = CookieFilterStore::new(jar.clone());
        assert!(store.load().unwrap().is_none());

        let state = FilterState {
            gender: Gender::Female,
            ..Default::default()
        };
        store.save(&state).unwrap();
        assert!(jar.contains("dashboardFilters"));
        assert_eq!(store.load().unwrap().unwrap().resolve(), state);

        store.clear().unwrap();
        assert!(!jar.contains("dashboardFilters"));
    }

    #[test]
    fn test_cookie_store_reports_corruption() {
        let jar = MemoryCookieJar::new().with_cookie("dashboardFilters", "{oops");
        let store = CookieFilterStore::new(jar);
        assert!(matches!(store.load(), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn test_cookie_store_max_age() {
        let jar = MemoryCookieJar::new();
        let mut store = CookieFilterStore::new(jar.clone()).with_max_age(TimeDelta::hours(12));
        store.save(&FilterState::default()).unwrap();
        assert_eq!(
            jar.cookie("dashboardFilters").unwrap().max_age,
            Some(TimeDelta::hours(12))
        );
    }

    #[test]
    fn test_url_store_replaces_without_history() {
        let location = MemoryLocation::new("https://dash.example.test");
        let mut store = UrlFilterStore::new(location.clone());
        assert!(store.load().unwrap().is_none());

        let state = FilterState {
            selected_series: Series::D,
            ..Default::default()
        };
        store.save(&state).unwrap();
        assert_eq!(location.history_len(), 1);
        assert_eq!(location.replacements(), 1);
        assert_eq!(store.load().unwrap().unwrap().resolve(), state);
    }

    #[test]
    fn test_share_url_anchored_at_root() {
        let location = MemoryLocation::new("https://dash.example.test/").with_path("/reports");
        let store = UrlFilterStore::new(location);
        assert_eq!(
            store.share_url(&FilterState::default()),
            "https://dash.example.test/?startDate=2022-10-04&endDate=2022-10-10&selectedBar=A"
        );
    }
}
