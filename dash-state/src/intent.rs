//! Redirect-preserving login.
//!
//! When an anonymous visitor opens a filtered view, `capture` records the
//! path and query in a short-lived cookie, stashes the URL filters in the
//! filter cookie with the same lifetime and returns the login URL carrying
//! a `redirect` parameter. After login, `resume` consumes the record and
//! `restore_filters` writes the resumed view back as the regular filter
//! cookie, so the dashboard opens on it whatever the landing URL carries.

use crate::store::CookieJar;
use chrono::{DateTime, TimeDelta, Utc};
use dash_core::config::{REDIRECT_COOKIE, REDIRECT_TTL_HOURS};
use dash_core::cookie::{decode_cookie, encode_cookie, FILTER_COOKIE};
use dash_core::query::parse_query;
use dash_core::{DashboardConfig, FilterState};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

pub const HOME_ROUTE: &str = "/";
pub const LOGIN_ROUTE: &str = "/login";
pub const SIGNUP_ROUTE: &str = "/signup";
pub const REDIRECT_PARAM: &str = "redirect";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectIntent {
    pub path: String,
    pub query: String,
    pub expires_at: DateTime<Utc>,
}

impl RedirectIntent {
    /// `path` or `path?query`.
    pub fn target(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }
}

/// The view to return to after login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumedIntent {
    pub target: String,
    pub filters: FilterState,
}

pub struct IntentStore<J> {
    jar: J,
    intent_cookie: String,
    filter_cookie: String,
    ttl: TimeDelta,
}

impl<J: CookieJar> IntentStore<J> {
    pub fn new(jar: J) -> Self {
        Self {
            jar,
            intent_cookie: REDIRECT_COOKIE.to_string(),
            filter_cookie: FILTER_COOKIE.to_string(),
            ttl: TimeDelta::hours(REDIRECT_TTL_HOURS),
        }
    }

    pub fn from_config(jar: J, config: &DashboardConfig) -> Self {
        Self {
            jar,
            intent_cookie: config.redirect_cookie.clone(),
            filter_cookie: config.filter_cookie.clone(),
            ttl: config.redirect_ttl,
        }
    }

    /// Remember `path?query` and return the login URL that leads back to it.
    pub fn capture(&mut self, path: &str, query: &str, now: DateTime<Utc>) -> String {
        let intent = RedirectIntent {
            path: path.to_string(),
            query: query.trim_start_matches('?').to_string(),
            expires_at: now + self.ttl,
        };

        match serde_json::to_string(&intent) {
            Ok(json) => {
                if let Err(e) = self.jar.set(&self.intent_cookie, &json, Some(self.ttl)) {
                    warn!("Failed to store redirect intent: {e}");
                }
            }
            Err(e) => warn!("Failed to encode redirect intent: {e}"),
        }
        self.stash_filters(&intent.query);

        login_url(&intent.target())
    }

    /// Take the pending intent, if any and not expired.
    pub fn resume(&mut self, now: DateTime<Utc>) -> Option<ResumedIntent> {
        let raw = self.jar.get(&self.intent_cookie)?;
        if let Err(e) = self.jar.remove(&self.intent_cookie) {
            warn!("Failed to clear redirect intent: {e}");
        }

        let intent: RedirectIntent = match serde_json::from_str(&raw) {
            Ok(intent) => intent,
            Err(e) => {
                warn!("Discarding unreadable redirect intent: {e}");
                return None;
            }
        };
        if intent.expires_at <= now {
            debug!("Redirect intent for {} expired at {}", intent.path, intent.expires_at);
            return None;
        }

        let target = safe_redirect_target(&intent.target())?;
        let filters = parse_query(&intent.query)
            .or(self.stashed_filters().unwrap_or_default())
            .resolve();
        Some(ResumedIntent { target, filters })
    }

    /// Persist `filters` as the filter cookie, replacing the short-lived stash.
    pub fn restore_filters(&mut self, filters: &FilterState) {
        match encode_cookie(filters) {
            Ok(value) => {
                if let Err(e) = self.jar.set(&self.filter_cookie, &value, None) {
                    warn!("Failed to restore filters: {e}");
                }
            }
            Err(e) => warn!("Failed to encode restored filters: {e}"),
        }
    }

    fn stashed_filters(&self) -> Option<dash_core::PartialFilters> {
        let raw = self.jar.get(&self.filter_cookie)?;
        decode_cookie(&raw).ok()
    }

    /// Layer the URL filters over the existing filter cookie and persist
    /// the result with the intent's lifetime.
    fn stash_filters(&mut self, query: &str) {
        let from_url = parse_query(query);
        if from_url.is_empty() {
            return;
        }
        let state = from_url
            .or(self.stashed_filters().unwrap_or_default())
            .resolve();
        match encode_cookie(&state) {
            Ok(value) => {
                if let Err(e) = self.jar.set(&self.filter_cookie, &value, Some(self.ttl)) {
                    warn!("Failed to stash filters: {e}");
                }
            }
            Err(e) => warn!("Failed to encode stashed filters: {e}"),
        }
    }
}

/// `/login?redirect=<target>`.
pub fn login_url(target: &str) -> String {
    format!(
        "{LOGIN_ROUTE}?{REDIRECT_PARAM}={}",
        urlencoding::encode(target)
    )
}

/// Accept only same-origin paths that do not lead back into the auth pages.
pub fn safe_redirect_target(raw: &str) -> Option<String> {
    let target = raw.trim();
    if !target.starts_with('/') || target.starts_with("//") || target.starts_with("/\\") {
        warn!("Refusing redirect target {target:?}");
        return None;
    }
    let path = target.split(['?', '#']).next().unwrap_or(target);
    if path == LOGIN_ROUTE || path == SIGNUP_ROUTE {
        return None;
    }
    Some(target.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryCookieJar;
    use chrono::{NaiveDate, TimeZone};
    use dash_core::query::query_value;
    use dash_core::{AgeGroup, Gender, Series};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_capture_returns_login_url_with_redirect() {
        let jar = MemoryCookieJar::new();
        let mut intents = IntentStore::new(jar.clone());
        let url = intents.capture("/", "?gender=Female&selectedBar=C", now());

        assert!(url.starts_with("/login?redirect="));
        let redirect = query_value(url.split_once('?').unwrap().1, REDIRECT_PARAM).unwrap();
        assert_eq!(redirect, "/?gender=Female&selectedBar=C");
        assert_eq!(
            jar.cookie(REDIRECT_COOKIE).unwrap().max_age,
            Some(TimeDelta::hours(12))
        );
    }

    #[test]
    fn test_capture_stashes_filters_for_twelve_hours() {
        let jar = MemoryCookieJar::new().with_cookie(FILTER_COOKIE, r#"{"ageGroup":"15-25"}"#);
        let mut intents = IntentStore::new(jar.clone());
        intents.capture("/", "gender=Male", now());

        let stashed = jar.cookie(FILTER_COOKIE).unwrap();
        assert_eq!(stashed.max_age, Some(TimeDelta::hours(12)));
        let state = decode_cookie(&stashed.value).unwrap().resolve();
        assert_eq!(state.gender, Gender::Male);
        assert_eq!(state.age_group, AgeGroup::Youth);
    }

    #[test]
    fn test_capture_without_filters_keeps_filter_cookie() {
        let jar = MemoryCookieJar::new();
        let mut intents = IntentStore::new(jar.clone());
        intents.capture("/", "", now());
        assert!(!jar.contains(FILTER_COOKIE));
    }

    #[test]
    fn test_resume_consumes_intent() {
        let jar = MemoryCookieJar::new();
        let mut intents = IntentStore::new(jar.clone());
        intents.capture("/", "startDate=2022-11-01&selectedBar=F", now());

        let resumed = intents.resume(now() + TimeDelta::hours(1)).unwrap();
        assert_eq!(resumed.target, "/?startDate=2022-11-01&selectedBar=F");
        assert_eq!(resumed.filters.start_date, NaiveDate::from_ymd_opt(2022, 11, 1).unwrap());
        assert_eq!(resumed.filters.selected_series, Series::F);

        assert!(!jar.contains(REDIRECT_COOKIE));
        assert!(intents.resume(now()).is_none());
    }

    #[test]
    fn test_restore_filters_replaces_stash() {
        let jar = MemoryCookieJar::new();
        let mut intents = IntentStore::new(jar.clone());
        intents.capture("/", "gender=Female&selectedBar=C", now());
        let resumed = intents.resume(now()).unwrap();

        intents.restore_filters(&resumed.filters);
        let cookie = jar.cookie(FILTER_COOKIE).unwrap();
        assert_eq!(cookie.max_age, None);
        assert_eq!(decode_cookie(&cookie.value).unwrap().resolve(), resumed.filters);
        assert_eq!(resumed.filters.gender, Gender::Female);
    }

    #[test]
    fn test_resume_after_expiry_yields_nothing() {
        let jar = MemoryCookieJar::new();
        let mut intents = IntentStore::new(jar.clone());
        intents.capture("/", "gender=Female", now());

        assert!(intents.resume(now() + TimeDelta::hours(12)).is_none());
        assert!(!jar.contains(REDIRECT_COOKIE));
    }

    #[test]
    fn test_resume_ignores_malformed_intent() {
        let jar = MemoryCookieJar::new().with_cookie(REDIRECT_COOKIE, "garbage");
        let mut intents = IntentStore::new(jar.clone());
        assert!(intents.resume(now()).is_none());
        assert!(!jar.contains(REDIRECT_COOKIE));
    }

    #[test]
    fn test_from_config_uses_configured_names() {
        let config = DashboardConfig {
            redirect_cookie: "pending".to_string(),
            redirect_ttl: TimeDelta::minutes(5),
            ..DashboardConfig::default()
        };
        let jar = MemoryCookieJar::new();
        let mut intents = IntentStore::from_config(jar.clone(), &config);
        intents.capture("/", "", now());
        assert_eq!(jar.cookie("pending").unwrap().max_age, Some(TimeDelta::minutes(5)));
        assert!(intents.resume(now() + TimeDelta::minutes(6)).is_none());
    }

    #[test]
    fn test_safe_redirect_target() {
        assert_eq!(safe_redirect_target("/?gender=Male").as_deref(), Some("/?gender=Male"));
        assert_eq!(safe_redirect_target("/reports").as_deref(), Some("/reports"));
        assert_eq!(safe_redirect_target("https://evil.test/"), None);
        assert_eq!(safe_redirect_target("//evil.test"), None);
        assert_eq!(safe_redirect_target("/\\evil.test"), None);
        assert_eq!(safe_redirect_target("/login?redirect=/"), None);
        assert_eq!(safe_redirect_target("/signup"), None);
    }
}
