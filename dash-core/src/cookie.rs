//! JSON encoding of the persisted `dashboardFilters` cookie.

use crate::error::Result;
use crate::filters::{FilterState, PartialFilters};

/// Cookie holding the serialized filter state.
pub const FILTER_COOKIE: &str = "dashboardFilters";

/// Serialize the full state for the cookie.
pub fn encode_cookie(state: &FilterState) -> Result<String> {
    Ok(serde_json::to_string(state)?)
}

/// Decode a cookie value. Missing fields stay `None`; anything that is not
/// a JSON object of valid field values is a `MalformedCookie` error.
pub fn decode_cookie(raw: &str) -> Result<PartialFilters> {
    Ok(serde_json::from_str(raw)?)
}
