//! URL query-string codec for `FilterState`.
//!
//! Two encodings are produced: `Mirror` keeps every field (unset enums as
//! empty values, so an explicit "All" overrides a stale cookie on reload)
//! and `Share` drops unset fields for compact links. Parsing is defensive:
//! unknown keys are ignored and bad values are skipped with a warning so
//! the field falls back to the cookie or the default.

use crate::dates::format_date;
use crate::filters::{parse_filter_date, FilterState, PartialFilters};
use log::warn;

pub const START_DATE_PARAM: &str = "startDate";
pub const END_DATE_PARAM: &str = "endDate";
pub const AGE_GROUP_PARAM: &str = "ageGroup";
pub const GENDER_PARAM: &str = "gender";
pub const SELECTED_SERIES_PARAM: &str = "selectedBar";
/// Accepted on input as a synonym of `selectedBar`.
pub const SELECTED_SERIES_ALIAS: &str = "selectedSeries";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// Every field, unset ones as empty values.
    Mirror,
    /// Unset fields omitted.
    Share,
}

/// Serialize `state` as `key=value&...` (no leading `?`).
pub fn encode_query(state: &FilterState, mode: QueryMode) -> String {
    let start = format_date(&state.start_date);
    let end = format_date(&state.end_date);
    let pairs = [
        (START_DATE_PARAM, start.as_str(), false),
        (END_DATE_PARAM, end.as_str(), false),
        (AGE_GROUP_PARAM, state.age_group.as_str(), state.age_group.is_unset()),
        (GENDER_PARAM, state.gender.as_str(), state.gender.is_unset()),
        (SELECTED_SERIES_PARAM, state.selected_series.as_str(), false),
    ];

    pairs
        .iter()
        .filter(|(_, _, unset)| mode == QueryMode::Mirror || !unset)
        .map(|(key, value, _)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Split a query string into decoded key/value pairs, in order.
pub fn query_pairs(query: &str) -> Vec<(String, String)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

/// Look up the first value for `key`.
pub fn query_value(query: &str, key: &str) -> Option<String> {
    query_pairs(query)
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, value)| value)
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Recover whichever filter fields the query carries.
pub fn parse_query(query: &str) -> PartialFilters {
    let mut filters = PartialFilters::default();

    for (key, value) in query_pairs(query) {
        match key.as_str() {
            START_DATE_PARAM if filters.start_date.is_none() => {
                filters.start_date = keep_valid(&key, &value, parse_filter_date(&value));
            }
            END_DATE_PARAM if filters.end_date.is_none() => {
                filters.end_date = keep_valid(&key, &value, parse_filter_date(&value));
            }
            AGE_GROUP_PARAM if filters.age_group.is_none() => {
                filters.age_group = keep_valid(&key, &value, value.parse());
            }
            GENDER_PARAM if filters.gender.is_none() => {
                filters.gender = keep_valid(&key, &value, value.parse());
            }
            SELECTED_SERIES_PARAM | SELECTED_SERIES_ALIAS if filters.selected_series.is_none() => {
                filters.selected_series = keep_valid(&key, &value, value.parse());
            }
            _ => {}
        }
    }

    filters
}

fn keep_valid<T>(key: &str, value: &str, parsed: crate::Result<T>) -> Option<T> {
    match parsed {
        Ok(v) => Some(v),
        Err(e) => {
            // Empty dates are simply absent; anything else is worth a warning.
            if !value.is_empty() {
                warn!("Ignoring query parameter {key}={value:?}: {e}");
            }
            None
        }
    }
}
